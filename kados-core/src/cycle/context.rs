//! Per-cycle transient state

use heapless::Deque;

use crate::actuate::ActuatorIntent;
use crate::classify::WasteCategory;
use crate::time::Instant;

/// Maximum queued post-sort actions (sanitize + reward)
pub const MAX_POST_ACTIONS: usize = 2;

/// Transient record for one deposit cycle
///
/// Created when presence is detected, destroyed when the door finishes
/// closing or the cycle aborts. The controller owns exactly zero or one of
/// these; deposits are processed serially by construction.
#[derive(Debug)]
pub struct CycleContext {
    /// When presence started the cycle
    pub started_at: Instant,
    /// An object passed the chute sensor
    pub deposit_confirmed: bool,
    /// Category chosen for this deposit
    pub category: Option<WasteCategory>,
    /// Give-up time while awaiting a deposit
    pub deposit_deadline: Option<Instant>,
    /// When the settling window ends and classification runs
    pub settle_deadline: Option<Instant>,
    /// Remaining post-sort actions, issued one at a time
    pub post_queue: Deque<ActuatorIntent, MAX_POST_ACTIONS>,
}

impl CycleContext {
    /// Begin a cycle at the given time
    pub fn begin(now: Instant) -> Self {
        Self {
            started_at: now,
            deposit_confirmed: false,
            category: None,
            deposit_deadline: None,
            settle_deadline: None,
            post_queue: Deque::new(),
        }
    }

    /// Check if a deadline has passed
    pub fn deadline_reached(deadline: Option<Instant>, now: Instant) -> bool {
        matches!(deadline, Some(d) if now >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context() {
        let ctx = CycleContext::begin(Instant::from_millis(42));
        assert_eq!(ctx.started_at, Instant::from_millis(42));
        assert!(!ctx.deposit_confirmed);
        assert!(ctx.category.is_none());
        assert!(ctx.post_queue.is_empty());
    }

    #[test]
    fn test_deadline_check() {
        let deadline = Some(Instant::from_millis(100));

        assert!(!CycleContext::deadline_reached(deadline, Instant::from_millis(99)));
        assert!(CycleContext::deadline_reached(deadline, Instant::from_millis(100)));
        assert!(CycleContext::deadline_reached(deadline, Instant::from_millis(500)));
        assert!(!CycleContext::deadline_reached(None, Instant::from_millis(500)));
    }
}
