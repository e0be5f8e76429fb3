//! Actuator intents and the driver that executes them
//!
//! The controller issues [`ActuatorIntent`]s; the driver starts the raw
//! hardware action, tracks its dwell time, and reports completion through a
//! non-blocking poll. One mechanism honors one command at a time.

pub mod driver;

pub use driver::{ActuatorDriver, ActuatorOutcome, ActuatorStatus};

use crate::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Addressable mechanisms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActuatorTarget {
    /// Lid servo
    Door,
    /// Sorting servo over the wet compartment
    SortWet,
    /// Sorting servo over the dry compartment
    SortDry,
    /// Sorting servo over the paper compartment
    SortPaper,
    /// Sorting servo over the covers compartment
    SortCovers,
    /// Sanitizer pump relay
    Sanitizer,
    /// Reward dispenser relay
    Reward,
    /// LED strip relay
    Led,
}

/// Mechanism class behind a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorKind {
    Servo,
    Relay,
}

impl ActuatorTarget {
    /// Number of targets; sizes the driver's slot table
    pub const COUNT: usize = 8;

    /// Every target, in slot order
    pub const ALL: [ActuatorTarget; Self::COUNT] = [
        ActuatorTarget::Door,
        ActuatorTarget::SortWet,
        ActuatorTarget::SortDry,
        ActuatorTarget::SortPaper,
        ActuatorTarget::SortCovers,
        ActuatorTarget::Sanitizer,
        ActuatorTarget::Reward,
        ActuatorTarget::Led,
    ];

    /// Slot index for the driver's per-target bookkeeping
    pub fn index(self) -> usize {
        match self {
            ActuatorTarget::Door => 0,
            ActuatorTarget::SortWet => 1,
            ActuatorTarget::SortDry => 2,
            ActuatorTarget::SortPaper => 3,
            ActuatorTarget::SortCovers => 4,
            ActuatorTarget::Sanitizer => 5,
            ActuatorTarget::Reward => 6,
            ActuatorTarget::Led => 7,
        }
    }

    /// Which mechanism class this target addresses
    pub fn kind(self) -> ActuatorKind {
        match self {
            ActuatorTarget::Door
            | ActuatorTarget::SortWet
            | ActuatorTarget::SortDry
            | ActuatorTarget::SortPaper
            | ActuatorTarget::SortCovers => ActuatorKind::Servo,
            ActuatorTarget::Sanitizer | ActuatorTarget::Reward | ActuatorTarget::Led => {
                ActuatorKind::Relay
            }
        }
    }

    /// Whether this is one of the four sorting servos
    pub fn is_sorter(self) -> bool {
        matches!(
            self,
            ActuatorTarget::SortWet
                | ActuatorTarget::SortDry
                | ActuatorTarget::SortPaper
                | ActuatorTarget::SortCovers
        )
    }
}

/// What a target should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActuatorAction {
    /// Move a servo to an angle and leave it there (door open/close)
    Hold { angle: u8 },
    /// Move a servo to an angle, dwell, then return to neutral (sorting)
    Sweep { angle: u8 },
    /// Energize a relay for the intent's duration, then release it
    Energize,
}

/// One timed command for one target, consumed once by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActuatorIntent {
    pub target: ActuatorTarget,
    pub action: ActuatorAction,
    /// Minimum dwell before the action may report done
    pub duration: Duration,
}

/// Errors that can occur executing an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Target already has an action in flight
    Busy,
    /// Mechanism did not settle within duration + margin
    Timeout,
    /// The raw hardware write failed
    Hardware,
}
