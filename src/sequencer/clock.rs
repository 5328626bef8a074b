//! Fixed-rate tick scheduling for the frame loop.
use std::time::{Duration, Instant};

/// Ticks we are willing to replay after a stall before dropping time.
const MAX_CATCH_UP: u32 = 8;

pub struct FrameClock {
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self { last_tick: now }
    }

    pub fn interval(fps: u32) -> Duration {
        Duration::from_secs_f64(1.0 / fps.max(1) as f64)
    }

    /// Number of whole frame intervals elapsed since the last tick at the
    /// given rate. Leftover time carries over to the next call.
    pub fn ticks_due(&mut self, now: Instant, fps: u32) -> u32 {
        let interval = Self::interval(fps);
        let elapsed = now.saturating_duration_since(self.last_tick);
        if elapsed < interval {
            return 0;
        }

        let ticks = (elapsed.as_secs_f64() / interval.as_secs_f64()).floor() as u32;
        if ticks > MAX_CATCH_UP {
            self.last_tick = now;
            return MAX_CATCH_UP;
        }
        self.last_tick += interval * ticks;
        ticks
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self, now: Instant, fps: u32) -> Duration {
        (self.last_tick + Self::interval(fps)).saturating_duration_since(now)
    }
}
