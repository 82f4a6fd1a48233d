//! Fixed-step conversion from frame time to whole ticks.

use std::time::Duration;

/// Accumulates frame time and releases it as fixed-length ticks.
///
/// Time left over after the per-frame cap is discarded so a long stall does
/// not turn into a burst of catch-up ticks.
#[derive(Clone, Copy, Debug)]
pub struct TickClock {
    step: Duration,
    accumulator: Duration,
    max_ticks_per_frame: u32,
}

impl TickClock {
    /// Default cap on ticks released by a single frame.
    pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 8;

    /// Creates a clock that ticks `ticks_per_second` times per simulated second.
    #[must_use]
    pub fn new(ticks_per_second: u32, max_ticks_per_frame: u32) -> Self {
        let step = if ticks_per_second == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / ticks_per_second
        };
        Self {
            step,
            accumulator: Duration::ZERO,
            max_ticks_per_frame,
        }
    }

    /// Length of a single tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Adds `dt` and returns how many ticks are now due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.step.is_zero() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if ticks == self.max_ticks_per_frame && self.accumulator >= self.step {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}
