use std::time::Instant;

/// Frame clock. `dt` is the time between the two most recent ticks.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    last: Option<Instant>,
    dt: f32,
    elapsed: f64,
    frame: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples wall time. The first tick reports a zero delta.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        self.advance(dt)
    }

    /// Moves the clock forward by an explicit delta.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.dt = dt.max(0.0);
        self.elapsed += f64::from(self.dt);
        self.frame += 1;
        self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Seconds since the clock was created.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = Clock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn advance_accumulates_and_rejects_negative_deltas() {
        let mut clock = Clock::new();
        clock.advance(0.5);
        clock.advance(-1.0);
        clock.advance(0.25);
        assert_eq!(clock.dt(), 0.25);
        assert!((clock.elapsed() - 0.75).abs() < 1e-9);
        assert_eq!(clock.frame_count(), 3);
    }
}
