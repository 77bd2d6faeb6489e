//! Frame timing
//!
//! Turns raw frame timestamps into clamped delta-times. The clamp keeps a
//! stalled frame (backgrounded tab, debugger pause) from moving the avatar far
//! enough in one step to skip over an obstacle.

use std::cell::Cell;

/// Source of monotonically increasing timestamps in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Derives per-frame delta-time from successive timestamps
#[derive(Debug, Clone)]
pub struct Ticker {
    last_ms: Option<f64>,
    max_dt_ms: f32,
}

impl Ticker {
    pub fn new(max_dt_ms: f32) -> Self {
        Self {
            last_ms: None,
            max_dt_ms,
        }
    }

    /// Record a frame timestamp and return the clamped delta since the previous one.
    ///
    /// The first frame, and any timestamp that runs backwards, yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) as f32).min(self.max_dt_ms),
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (next frame yields dt = 0)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Hand-driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut ticker = Ticker::new(50.0);
        assert_eq!(ticker.advance(1234.0), 0.0);
        assert!((ticker.advance(1250.0) - 16.0).abs() < 0.001);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut ticker = Ticker::new(50.0);
        ticker.advance(0.0);
        assert_eq!(ticker.advance(5000.0), 50.0);
        // Following frame measures from the stalled timestamp, not the clamp
        assert!((ticker.advance(5016.0) - 16.0).abs() < 0.001);
    }

    #[test]
    fn test_backwards_timestamp() {
        let mut ticker = Ticker::new(50.0);
        ticker.advance(100.0);
        assert_eq!(ticker.advance(90.0), 0.0);
        assert!((ticker.advance(100.0) - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_reset() {
        let mut ticker = Ticker::new(50.0);
        ticker.advance(100.0);
        ticker.reset();
        assert_eq!(ticker.advance(140.0), 0.0);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(10.0);
        clock.advance(6.5);
        assert!((clock.now_ms() - 16.5).abs() < f64::EPSILON);
        clock.set(3.0);
        assert!((clock.now_ms() - 3.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn dt_never_exceeds_clamp(steps in proptest::collection::vec(0.0f64..10_000.0, 1..50)) {
            let mut ticker = Ticker::new(50.0);
            let mut now = 0.0;
            for step in steps {
                now += step;
                let dt = ticker.advance(now);
                prop_assert!((0.0..=50.0).contains(&dt));
            }
        }
    }
}
