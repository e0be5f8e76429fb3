//! Millisecond-resolution monotonic time
//!
//! Every deadline in the core is computed against instants supplied by the
//! caller from a single monotonic clock, which keeps the control loop
//! deterministic and testable with plain numbers.

use core::ops::{Add, AddAssign, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point on the monotonic timeline, in milliseconds since boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instant {
    ms: u64,
}

impl Instant {
    /// The start of the timeline
    pub const EPOCH: Instant = Instant { ms: 0 };

    /// Create an instant from milliseconds since boot
    pub const fn from_millis(ms: u64) -> Self {
        Self { ms }
    }

    /// Milliseconds since boot
    pub const fn as_millis(self) -> u64 {
        self.ms
    }

    /// Time elapsed since an earlier instant
    ///
    /// Saturates to zero if `earlier` is actually later.
    pub const fn since(self, earlier: Instant) -> Duration {
        Duration {
            ms: self.ms.saturating_sub(earlier.ms),
        }
    }
}

/// A span of time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Duration {
    ms: u64,
}

impl Duration {
    /// Zero-length span
    pub const ZERO: Duration = Duration { ms: 0 };

    /// Create a duration from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { ms }
    }

    /// Create a duration from whole seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self { ms: secs * 1000 }
    }

    /// Length in milliseconds
    pub const fn as_millis(self) -> u64 {
        self.ms
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant {
            ms: self.ms.saturating_add(rhs.ms),
        }
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration {
            ms: self.ms.saturating_add(rhs.ms),
        }
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        self.ms = self.ms.saturating_add(rhs.ms);
    }
}

impl Sub for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        self.since(rhs)
    }
}
