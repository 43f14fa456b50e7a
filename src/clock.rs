//! Wall clock for the main loop
//!
//! The simulation only ever sees plain seconds (`f64`), so tests can drive time
//! directly. Nothing here pauses: time spent in Pause still counts toward round
//! and power-up deadlines.

use std::time::{Duration, Instant};

/// Monotonic clock measuring seconds since process start
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    origin: Instant,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock was created
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    /// Duration of one frame at the given rate
    pub fn frame_duration(fps: u32) -> Duration {
        Duration::from_secs_f64(1.0 / fps.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let clock = GameClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[test]
    fn test_frame_duration() {
        let d = GameClock::frame_duration(30);
        assert!((d.as_secs_f64() - 1.0 / 30.0).abs() < 1e-9);
        // Zero rate never divides by zero
        assert_eq!(GameClock::frame_duration(0), Duration::from_secs(1));
    }
}
