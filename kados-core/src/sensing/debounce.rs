//! Digital debounce filter
//!
//! A transition on a digital channel is reported only after the new level
//! has held for at least the configured delay; until then the previous
//! stable level is returned.

use crate::time::{Duration, Instant};

/// Debounce filter for one digital channel
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
    stable: bool,
    /// Pending level and when it was first observed
    candidate: Option<(bool, Instant)>,
}

impl Debouncer {
    /// Create a filter with a known initial level
    pub fn new(initial: bool, delay: Duration) -> Self {
        Self {
            delay,
            stable: initial,
            candidate: None,
        }
    }

    /// Feed one raw sample and return the current stable level
    pub fn update(&mut self, raw: bool, now: Instant) -> bool {
        if raw == self.stable {
            // Bounced back before the delay elapsed
            self.candidate = None;
            return self.stable;
        }

        match self.candidate {
            Some((level, since)) if level == raw => {
                if now.since(since) >= self.delay {
                    self.stable = raw;
                    self.candidate = None;
                }
            }
            _ => {
                self.candidate = Some((raw, now));
            }
        }

        self.stable
    }

    /// Current stable level without feeding a sample
    pub fn stable(&self) -> bool {
        self.stable
    }
}
