//! The home-base ring: copies of one model spaced evenly on a circle, with
//! a single slot left open.

use std::f32::consts::TAU;

use engine::{MeshHandle, NodeId, World};
use glam::{Vec3, Vec4};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSlot {
    pub index: usize,
    pub angle: f32,
    pub position: Vec3,
    pub color: Vec4,
}

/// Lays out `count` slots on a circle of `radius` around the origin, skipping
/// `gap_index`. An out-of-range gap skips nothing; it is logged but kept, so
/// the caller sees a full ring.
pub fn ring_layout<R: Rng + ?Sized>(
    count: usize,
    radius: f32,
    gap_index: usize,
    rng: &mut R,
) -> Vec<RingSlot> {
    if count == 0 {
        log::warn!("Ring has no slots");
        return Vec::new();
    }
    if gap_index >= count {
        log::warn!("Ring gap index {gap_index} is outside 0..{count}; the ring will have no gap");
    }

    (0..count)
        .filter(|&i| i != gap_index)
        .map(|i| {
            let angle = TAU / count as f32 * i as f32;
            RingSlot {
                index: i,
                angle,
                position: Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0),
                color: Vec4::new(rng.gen(), rng.gen(), rng.gen(), 1.0),
            }
        })
        .collect()
}

/// Instantiates `model` once per slot: a placeholder node at the slot
/// position under `parent`, holding the scaled and tinted model.
pub fn spawn_ring(
    world: &mut World,
    parent: NodeId,
    model: MeshHandle,
    layout: &[RingSlot],
    model_scale: f32,
) -> Vec<NodeId> {
    let scene = &mut world.scene;
    layout
        .iter()
        .map(|slot| {
            let placeholder = scene.attach_new_node(parent, "Placeholder");
            scene.set_pos(placeholder, slot.position);
            let cube = scene.attach_model(placeholder, "Cube", model);
            scene.set_scale(cube, model_scale);
            scene.set_color(cube, slot.color);
            placeholder
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Primitive;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn twenty_slots_with_gap_at_five() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = ring_layout(20, 8.0, 5, &mut rng);
        assert_eq!(layout.len(), 19);
        assert!(layout.iter().all(|s| s.index != 5));
        for slot in &layout {
            let expected = TAU * slot.index as f32 / 20.0;
            assert!((slot.angle - expected).abs() < 1e-5);
            assert!((slot.position.truncate().length() - 8.0).abs() < 1e-4);
            assert_eq!(slot.position.z, 0.0);
        }
        let indices: Vec<usize> = layout.iter().map(|s| s.index).collect();
        assert_eq!(indices, (0..20).filter(|&i| i != 5).collect::<Vec<_>>());
    }

    #[test]
    fn colors_are_opaque_and_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for slot in ring_layout(20, 8.0, 0, &mut rng) {
            assert_eq!(slot.color.w, 1.0);
            let rgb = slot.color.truncate();
            assert!(rgb.min_element() >= 0.0 && rgb.max_element() < 1.0);
        }
    }

    #[test]
    fn out_of_range_gap_keeps_every_slot() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ring_layout(20, 8.0, 20, &mut rng).len(), 20);
        assert!(ring_layout(0, 8.0, 0, &mut rng).is_empty());
    }

    #[test]
    fn spawn_places_one_tinted_model_per_slot() {
        let mut world = World::new();
        let cube = world.assets.primitive(Primitive::Cube);
        let root = world.render();
        let parent = world.scene.attach_new_node(root, "CubeParent");
        let mut rng = StdRng::seed_from_u64(3);
        let layout = ring_layout(20, 8.0, 19, &mut rng);

        let placeholders = spawn_ring(&mut world, parent, cube, &layout, 0.5);
        assert_eq!(placeholders.len(), 19);
        assert_eq!(world.scene.children(parent).len(), 19);

        let renderables = world.scene.renderables();
        assert_eq!(renderables.len(), 19);
        for (r, slot) in renderables.iter().zip(&layout) {
            assert_eq!(r.color, slot.color);
            assert!((r.transform.w_axis.truncate() - slot.position).length() < 1e-5);
            assert!((r.transform.x_axis.x - 0.5).abs() < 1e-6);
        }
    }
}
