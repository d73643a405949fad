//! Frame timing for the simulation loop.

use std::time::Duration;

/// Tracks simulated frame deltas. The headless loop advances it by a fixed
/// step each frame.
#[derive(Debug, Default)]
pub struct Time {
    /// Duration of the last frame.
    delta: Duration,
    /// Total simulated time since start.
    elapsed: Duration,
    /// Frames since start.
    frame_count: u64,
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame with an explicit, simulated delta.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    /// Delta time of the current frame in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_simulated_time() {
        let mut time = Time::new();
        for _ in 0..60 {
            time.advance(Duration::from_millis(16));
        }
        assert_eq!(time.frame_count(), 60);
        assert!((time.elapsed_seconds() - 0.96).abs() < 1e-4);
        assert!((time.delta_seconds() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn fresh_clock_is_at_zero() {
        let time = Time::new();
        assert_eq!(time.frame_count(), 0);
        assert_eq!(time.delta_seconds(), 0.0);
        assert_eq!(time.elapsed_seconds(), 0.0);
    }
}
