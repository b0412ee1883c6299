//! Time source abstraction.
//!
//! Simulation functions never read the wall clock themselves. They take an
//! explicit `now: Millis` argument, and callers obtain it from a [`Clock`].
//! Tests drive a [`ManualClock`] to any instant they need, which makes every
//! growth timing deterministic.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub type Millis = u64;

/// Source of the current time.
pub trait Clock {
    /// Current time in epoch milliseconds.
    fn now(&self) -> Millis;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Settable time for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Millis,
}

impl ManualClock {
    /// Create a clock frozen at the given instant.
    #[must_use]
    pub const fn new(now: Millis) -> Self {
        Self { now }
    }

    /// Move the clock forward.
    pub const fn advance(&mut self, delta: Millis) {
        self.now = self.now.saturating_add(delta);
    }

    /// Jump the clock to an absolute instant.
    pub const fn set(&mut self, now: Millis) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now
    }
}
