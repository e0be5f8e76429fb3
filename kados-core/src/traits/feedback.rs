//! Feedback sink trait
//!
//! Display, audio, and LED feedback live outside the core; the controller
//! hands them a stream of cycle events and never waits on them.

use crate::cycle::CycleEvent;

/// Consumer of cycle events
///
/// Implementations must be fire-and-forget: `on_event` may drop events but
/// must never block the control loop.
pub trait FeedbackSink {
    fn on_event(&mut self, event: CycleEvent);
}

/// No-op sink for tests and headless operation
impl FeedbackSink for () {
    fn on_event(&mut self, _event: CycleEvent) {}
}
