//! State machine definition
//!
//! All door, sorting, and post-action behavior is a function of the
//! current state and an event.

use super::events::Event;

/// Deposit-cycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BinState {
    /// Door closed, waiting for someone to approach
    Idle,
    /// Door-open intent in flight
    DoorOpening,
    /// Door open, waiting for an object to pass the chute sensor
    AwaitingDeposit,
    /// Deposit seen; letting the object settle before reading it
    Classifying,
    /// Sorting sweep in flight
    Sorting,
    /// Running sanitizer/reward actions
    PostAction,
    /// Door-close intent in flight
    DoorClosing,
    /// Cycle failed or gave up; door closes best-effort next
    Aborted(AbortReason),
}

/// Why a cycle aborted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbortReason {
    /// Nothing was deposited before the door timeout; a normal path
    DepositTimeout,
    /// A mechanism did not settle in time
    ActuatorTimeout,
    /// A raw hardware write failed
    ActuatorFault,
    /// External emergency stop
    EmergencyStop,
}

impl AbortReason {
    /// Deposit timeouts are routine; everything else is a fault worth
    /// reporting to the feedback surfaces
    pub fn is_fault(self) -> bool {
        !matches!(self, AbortReason::DepositTimeout)
    }
}

impl BinState {
    /// Check if a deposit cycle is in progress
    pub fn in_cycle(&self) -> bool {
        !matches!(self, BinState::Idle)
    }

    /// Check if this is the aborted state
    pub fn is_aborted(&self) -> bool {
        matches!(self, BinState::Aborted(_))
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use BinState::*;
        use Event::*;

        match (self, event) {
            // Normal cycle progression
            (Idle, PresenceDetected) => DoorOpening,
            (DoorOpening, DoorOpened) => AwaitingDeposit,
            (AwaitingDeposit, DepositDetected) => Classifying,
            (Classifying, SortStarted) => Sorting,
            (Classifying, SortSkipped) => PostAction,
            (Sorting, SortCompleted) => PostAction,
            (PostAction, PostActionsCompleted) => DoorClosing,
            (DoorClosing, DoorClosed) => Idle,

            // Giving up on a deposit is routine, not a fault
            (AwaitingDeposit, DepositTimedOut) => Aborted(AbortReason::DepositTimeout),

            // Abort recovery: close the door, then back to idle
            (Aborted(_), CloseStarted) => DoorClosing,
            (Aborted(_), CycleReset) => Idle,

            // An emergency stop preempts everything, idle included
            (_, EmergencyStop) => Aborted(AbortReason::EmergencyStop),

            // Faults never start a cycle on their own
            (Idle, FaultDetected(_)) => Idle,
            // The first abort reason wins
            (Aborted(reason), FaultDetected(_)) => Aborted(reason),
            // A failing close ends the cycle where it stands; the next
            // cycle re-commands the door anyway
            (DoorClosing, FaultDetected(_)) => Idle,
            (_, FaultDetected(reason)) => Aborted(reason),

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle_progression() {
        let mut state = BinState::Idle;

        for (event, expected) in [
            (Event::PresenceDetected, BinState::DoorOpening),
            (Event::DoorOpened, BinState::AwaitingDeposit),
            (Event::DepositDetected, BinState::Classifying),
            (Event::SortStarted, BinState::Sorting),
            (Event::SortCompleted, BinState::PostAction),
            (Event::PostActionsCompleted, BinState::DoorClosing),
            (Event::DoorClosed, BinState::Idle),
        ] {
            state = state.transition(event);
            assert_eq!(state, expected);
        }
    }

    #[test]
    fn test_unknown_category_skips_sorting() {
        let state = BinState::Classifying.transition(Event::SortSkipped);
        assert_eq!(state, BinState::PostAction);
    }

    #[test]
    fn test_deposit_timeout_path() {
        let aborted = BinState::AwaitingDeposit.transition(Event::DepositTimedOut);
        assert_eq!(aborted, BinState::Aborted(AbortReason::DepositTimeout));
        assert!(!AbortReason::DepositTimeout.is_fault());

        // Recovery closes the door and returns to idle
        let closing = aborted.transition(Event::CloseStarted);
        assert_eq!(closing, BinState::DoorClosing);
        assert_eq!(closing.transition(Event::DoorClosed), BinState::Idle);
    }

    #[test]
    fn test_fault_from_any_cycle_state() {
        let states = [
            BinState::DoorOpening,
            BinState::AwaitingDeposit,
            BinState::Classifying,
            BinState::Sorting,
            BinState::PostAction,
        ];

        for state in states {
            let next = state.transition(Event::FaultDetected(AbortReason::ActuatorTimeout));
            assert_eq!(next, BinState::Aborted(AbortReason::ActuatorTimeout));
        }
    }

    #[test]
    fn test_failed_close_ends_the_cycle() {
        // No second recovery attempt when the close itself fails
        let next = BinState::DoorClosing.transition(Event::FaultDetected(AbortReason::ActuatorTimeout));
        assert_eq!(next, BinState::Idle);
    }

    #[test]
    fn test_fault_does_not_start_a_cycle() {
        let next = BinState::Idle.transition(Event::FaultDetected(AbortReason::ActuatorFault));
        assert_eq!(next, BinState::Idle);
    }

    #[test]
    fn test_first_abort_reason_is_kept() {
        let aborted = BinState::Sorting.transition(Event::FaultDetected(AbortReason::ActuatorFault));
        let still = aborted.transition(Event::FaultDetected(AbortReason::ActuatorTimeout));
        assert_eq!(still, BinState::Aborted(AbortReason::ActuatorFault));
    }

    #[test]
    fn test_emergency_stop_preempts_everything() {
        for state in [
            BinState::Idle,
            BinState::AwaitingDeposit,
            BinState::Sorting,
            BinState::Aborted(AbortReason::ActuatorFault),
        ] {
            let next = state.transition(Event::EmergencyStop);
            assert_eq!(next, BinState::Aborted(AbortReason::EmergencyStop));
        }
    }

    #[test]
    fn test_irrelevant_events_are_ignored() {
        // A stray completion in idle changes nothing
        assert_eq!(BinState::Idle.transition(Event::SortCompleted), BinState::Idle);
        // A second presence trigger mid-cycle changes nothing
        assert_eq!(
            BinState::AwaitingDeposit.transition(Event::PresenceDetected),
            BinState::AwaitingDeposit
        );
    }
}
