//! Countdown cooldown timer.

/// A cooldown compared against zero: arm with a duration, tick by elapsed
/// seconds, ready once it reaches zero.
///
/// Every ability gate in the crate runs on one of these.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    /// A cooldown that is ready immediately.
    pub fn ready_now() -> Self {
        Self { remaining: 0.0 }
    }

    /// A cooldown that must first wait out `secs`.
    pub fn armed(secs: f32) -> Self {
        Self { remaining: secs }
    }

    /// Restarts the countdown at `secs`.
    pub fn arm(&mut self, secs: f32) {
        self.remaining = secs;
    }

    /// Counts down by the tick delta. A ready cooldown stays at zero.
    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
        }
    }

    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Seconds left before the cooldown is ready, never negative.
    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}
