//! Events that drive and report the deposit cycle
//!
//! [`Event`] is internal: it feeds the state machine's transition
//! function. [`CycleEvent`] is external: the controller emits it to the
//! feedback sink for display, audio, and LED reactions.

use crate::classify::WasteCategory;

use super::machine::AbortReason;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Debounced presence appeared at the approach sensor
    PresenceDetected,
    /// Door servo finished opening
    DoorOpened,
    /// Debounced presence appeared at the chute sensor
    DepositDetected,
    /// The open door waited its full timeout with no deposit
    DepositTimedOut,
    /// A sorting sweep was issued for the classified category
    SortStarted,
    /// Classification produced no sortable category
    SortSkipped,
    /// The sorting sweep finished
    SortCompleted,
    /// The post-action queue drained
    PostActionsCompleted,
    /// Abort recovery issued the door-close intent
    CloseStarted,
    /// Abort recovery gave up on the door; cycle ends where it stands
    CycleReset,
    /// Door servo finished closing
    DoorClosed,
    /// An actuator failed; reason decides the abort kind
    FaultDetected(AbortReason),
    /// External emergency stop
    EmergencyStop,
}

impl Event {
    /// Check if this event reports an actuator completion
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Event::DoorOpened | Event::SortCompleted | Event::DoorClosed
        )
    }

    /// Check if this event ends the cycle abnormally
    pub fn is_abort(&self) -> bool {
        matches!(
            self,
            Event::DepositTimedOut | Event::FaultDetected(_) | Event::EmergencyStop
        )
    }
}

/// Events emitted to the feedback sink
///
/// Fire-and-forget; consumers drive lights, sounds, and the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    DoorOpened,
    DepositDetected,
    Classified(WasteCategory),
    Sorted,
    Sanitized,
    Rewarded,
    DoorClosed,
    Fault(AbortReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_events() {
        assert!(Event::DoorOpened.is_completion());
        assert!(Event::SortCompleted.is_completion());
        assert!(!Event::PresenceDetected.is_completion());
    }

    #[test]
    fn test_abort_events() {
        assert!(Event::DepositTimedOut.is_abort());
        assert!(Event::FaultDetected(AbortReason::ActuatorFault).is_abort());
        assert!(Event::EmergencyStop.is_abort());
        assert!(!Event::DoorClosed.is_abort());
    }
}
