//! Camera-relative avatar movement.

use glam::Vec3;

use crate::controls::{Direction, KeyState};

/// Flattens `v` onto the ground plane. A vertical vector flattens to zero.
fn ground(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0).normalize_or_zero()
}

/// Displacement for one frame: W/S along the camera's flattened forward
/// axis, A/D along its flattened right axis, each scaled by `speed * dt`.
pub fn movement_delta(keys: &KeyState, forward: Vec3, right: Vec3, speed: f32, dt: f32) -> Vec3 {
    let step = speed * dt;
    let forward = ground(forward);
    let right = ground(right);

    let mut delta = Vec3::ZERO;
    if keys.is_down(Direction::Forward) {
        delta += forward * step;
    }
    if keys.is_down(Direction::Back) {
        delta -= forward * step;
    }
    if keys.is_down(Direction::Left) {
        delta -= right * step;
    }
    if keys.is_down(Direction::Right) {
        delta += right * step;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Camera;

    fn orbit_camera() -> Camera {
        let mut cam = Camera::new();
        cam.set_pos(Vec3::new(25.0, 0.0, 15.0));
        cam.look_at(Vec3::ZERO);
        cam
    }

    #[test]
    fn forward_moves_one_unit_along_flattened_view() {
        let cam = orbit_camera();
        let keys = KeyState {
            forward: true,
            ..Default::default()
        };
        let delta = movement_delta(&keys, cam.forward(), cam.right(), 10.0, 0.1);
        assert!((delta.length() - 1.0).abs() < 1e-5);
        assert!(delta.z.abs() < 1e-6);
        // camera sits on +X looking at the origin
        assert!((delta - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn opposite_keys_cancel() {
        let cam = orbit_camera();
        let keys = KeyState {
            forward: true,
            back: true,
            left: true,
            right: true,
        };
        let delta = movement_delta(&keys, cam.forward(), cam.right(), 10.0, 0.1);
        assert!(delta.length() < 1e-6);
    }

    #[test]
    fn strafe_uses_right_axis() {
        let keys = KeyState {
            right: true,
            ..Default::default()
        };
        let delta = movement_delta(&keys, Vec3::Y, Vec3::X, 10.0, 0.5);
        assert_eq!(delta, Vec3::new(5.0, 0.0, 0.0));

        let keys = KeyState {
            left: true,
            ..Default::default()
        };
        let delta = movement_delta(&keys, Vec3::Y, Vec3::X, 10.0, 0.5);
        assert_eq!(delta, Vec3::new(-5.0, 0.0, 0.0));
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let keys = KeyState {
            forward: true,
            right: true,
            ..Default::default()
        };
        let delta = movement_delta(&keys, Vec3::Y, Vec3::X, 10.0, 0.1);
        assert!((delta.length() - 2.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn zero_dt_or_vertical_view_does_not_move() {
        let keys = KeyState {
            forward: true,
            ..Default::default()
        };
        assert_eq!(movement_delta(&keys, Vec3::Y, Vec3::X, 10.0, 0.0), Vec3::ZERO);
        assert_eq!(movement_delta(&keys, Vec3::NEG_Z, Vec3::X, 10.0, 0.1), Vec3::ZERO);
    }
}
