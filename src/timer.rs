//! Drop scheduler: accumulates elapsed time against the gravity interval

use std::time::Duration;

/// Default interval between automatic drops
pub const NORMAL_INTERVAL: Duration = Duration::from_millis(1000);
/// Accelerated interval is the normal one divided by this
pub const FAST_DROP_DIVISOR: u32 = 3;

#[derive(Debug, Clone)]
pub struct DropTimer {
    /// Time accumulated since the last forced drop
    counter: Duration,
    normal: Duration,
    fast: Duration,
    accelerated: bool,
}

impl Default for DropTimer {
    fn default() -> Self {
        Self::new(NORMAL_INTERVAL, FAST_DROP_DIVISOR)
    }
}

impl DropTimer {
    pub fn new(normal: Duration, fast_divisor: u32) -> Self {
        assert!(fast_divisor > 0, "fast drop divisor must be positive");
        Self {
            counter: Duration::ZERO,
            normal,
            fast: normal / fast_divisor,
            accelerated: false,
        }
    }

    /// Add elapsed time; true once the accumulator strictly exceeds the interval.
    /// The accumulator is not reset here; the drop that follows does that.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.counter += delta;
        self.counter > self.interval()
    }

    pub fn reset(&mut self) {
        self.counter = Duration::ZERO;
    }

    pub fn set_accelerated(&mut self) {
        self.accelerated = true;
    }

    pub fn set_normal(&mut self) {
        self.accelerated = false;
    }

    pub fn is_accelerated(&self) -> bool {
        self.accelerated
    }

    /// The interval currently in effect
    pub fn interval(&self) -> Duration {
        if self.accelerated { self.fast } else { self.normal }
    }
}
