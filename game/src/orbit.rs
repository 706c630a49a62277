//! Orbiting camera rig with clamped zoom.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRig {
    distance: f32,
    pub height: f32,
    min_distance: f32,
    max_distance: f32,
    step: f32,
    /// Angular speed in radians per second.
    pub rate: f32,
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self::new(25.0, 15.0, 5.0, 60.0, 1.0, 0.5)
    }
}

impl OrbitRig {
    /// `distance` is clamped into `[min_distance, max_distance]`.
    pub fn new(
        distance: f32,
        height: f32,
        min_distance: f32,
        max_distance: f32,
        step: f32,
        rate: f32,
    ) -> Self {
        Self {
            distance: distance.clamp(min_distance, max_distance),
            height,
            min_distance,
            max_distance,
            step,
            rate,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn zoom_in(&mut self) {
        self.distance = (self.distance - self.step).max(self.min_distance);
    }

    pub fn zoom_out(&mut self) {
        self.distance = (self.distance + self.step).min(self.max_distance);
    }

    /// Camera position `t` seconds into the orbit.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let angle = t * self.rate;
        Vec3::new(
            angle.cos() * self.distance,
            angle.sin() * self.distance,
            self.height,
        )
    }
}
