//! Configuration type definitions
//!
//! Defaults mirror the reference hardware build: a five-servo sorting bin
//! with IR presence sensors, an ultrasonic fill sensor, and analog
//! moisture/capacitance/inductance probes.

use crate::actuate::{ActuatorAction, ActuatorIntent, ActuatorTarget};
use crate::classify::WasteCategory;
use crate::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sensor hub configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Time a digital level must hold before a transition is trusted
    pub debounce_delay: Duration,
    /// Distances beyond this are reported as "no object"
    pub max_range_cm: u16,
    /// Fill distance at or below which the bin counts as full
    pub full_distance_cm: u16,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(50),
            max_range_cm: 400,
            full_distance_cm: 10,
        }
    }
}

/// Classifier thresholds
///
/// Each analog channel gets one threshold; a raw magnitude strictly above
/// it counts as evidence for that channel's material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassifierConfig {
    /// Moisture magnitude above this reads as wet waste
    pub moisture_threshold: u16,
    /// Capacitance magnitude above this reads as paper/fibrous waste
    pub capacitance_threshold: u16,
    /// Inductance magnitude above this reads as metal covers/foil
    pub inductance_threshold: u16,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            moisture_threshold: 500,
            capacitance_threshold: 300,
            inductance_threshold: 500,
        }
    }
}

/// Servo angle assignments (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoAngles {
    pub door_open: u8,
    pub door_closed: u8,
    /// Rest position every sort servo returns to after a sweep
    pub sort_neutral: u8,
    pub sort_wet: u8,
    pub sort_dry: u8,
    pub sort_paper: u8,
    pub sort_covers: u8,
}

impl Default for ServoAngles {
    fn default() -> Self {
        Self {
            door_open: 90,
            door_closed: 0,
            sort_neutral: 90,
            sort_wet: 0,
            sort_dry: 45,
            sort_paper: 90,
            sort_covers: 135,
        }
    }
}

/// Actuator driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActuatorConfig {
    pub angles: ServoAngles,
    /// Door servo travel time (open or close)
    pub door_travel: Duration,
    /// How long a sort servo holds its sweep angle before returning to neutral
    pub sort_dwell: Duration,
    /// Sanitizer pump on-time
    pub sanitizer_pulse: Duration,
    /// Reward dispenser on-time
    pub reward_pulse: Duration,
    /// Grace period past an intent's duration before it counts as timed out
    pub settle_margin: Duration,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            angles: ServoAngles::default(),
            door_travel: Duration::from_millis(200),
            sort_dwell: Duration::from_millis(1000),
            sanitizer_pulse: Duration::from_millis(500),
            reward_pulse: Duration::from_millis(1000),
            settle_margin: Duration::from_millis(100),
        }
    }
}

impl ActuatorConfig {
    /// Intent that swings the door to its open angle and holds it there
    pub fn door_open_intent(&self) -> ActuatorIntent {
        ActuatorIntent {
            target: ActuatorTarget::Door,
            action: ActuatorAction::Hold {
                angle: self.angles.door_open,
            },
            duration: self.door_travel,
        }
    }

    /// Intent that swings the door back to its closed angle
    pub fn door_close_intent(&self) -> ActuatorIntent {
        ActuatorIntent {
            target: ActuatorTarget::Door,
            action: ActuatorAction::Hold {
                angle: self.angles.door_closed,
            },
            duration: self.door_travel,
        }
    }

    /// Sorting sweep for a category, or None for categories that stay in
    /// the default compartment
    pub fn sort_intent(&self, category: WasteCategory) -> Option<ActuatorIntent> {
        let (target, angle) = match category {
            WasteCategory::Wet => (ActuatorTarget::SortWet, self.angles.sort_wet),
            WasteCategory::Dry => (ActuatorTarget::SortDry, self.angles.sort_dry),
            WasteCategory::Paper => (ActuatorTarget::SortPaper, self.angles.sort_paper),
            WasteCategory::Covers => (ActuatorTarget::SortCovers, self.angles.sort_covers),
            WasteCategory::Unknown => return None,
        };

        Some(ActuatorIntent {
            target,
            action: ActuatorAction::Sweep { angle },
            duration: self.sort_dwell,
        })
    }

    /// Sanitizer pump pulse
    pub fn sanitize_intent(&self) -> ActuatorIntent {
        ActuatorIntent {
            target: ActuatorTarget::Sanitizer,
            action: ActuatorAction::Energize,
            duration: self.sanitizer_pulse,
        }
    }

    /// Reward dispenser pulse
    pub fn reward_intent(&self) -> ActuatorIntent {
        ActuatorIntent {
            target: ActuatorTarget::Reward,
            action: ActuatorAction::Energize,
            duration: self.reward_pulse,
        }
    }
}

/// Deposit-cycle timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CycleConfig {
    /// How long the open door waits for a deposit before giving up
    pub door_timeout: Duration,
    /// Settling time between deposit detection and the sorting sweep
    pub sorting_delay: Duration,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            door_timeout: Duration::from_millis(5000),
            sorting_delay: Duration::from_millis(2000),
        }
    }
}

/// When to run the sanitizer pump after sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SanitizePolicy {
    Never,
    /// Only after a wet classification
    #[default]
    AfterWet,
    Always,
}

/// When to dispense a reward after sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RewardPolicy {
    Never,
    /// After every deposit that classified to a known category
    #[default]
    AfterDeposit,
}

/// Post-sort action policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PostActionConfig {
    pub sanitize: SanitizePolicy,
    pub reward: RewardPolicy,
}

impl PostActionConfig {
    /// Should the sanitizer run for this category?
    pub fn sanitize_after(&self, category: WasteCategory) -> bool {
        match self.sanitize {
            SanitizePolicy::Never => false,
            SanitizePolicy::AfterWet => category == WasteCategory::Wet,
            SanitizePolicy::Always => true,
        }
    }

    /// Should a reward be dispensed for this category?
    pub fn reward_after(&self, category: WasteCategory) -> bool {
        match self.reward {
            RewardPolicy::Never => false,
            RewardPolicy::AfterDeposit => category.is_known(),
        }
    }
}

/// Complete machine configuration
///
/// Built once at startup and passed to every component; immutable after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinConfig {
    pub sensors: SensorConfig,
    pub classifier: ClassifierConfig,
    pub actuators: ActuatorConfig,
    pub cycle: CycleConfig,
    pub post_action: PostActionConfig,
    pub pins: super::hardware::BinPinout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let config = BinConfig::default();
        assert_eq!(config.cycle.door_timeout, Duration::from_millis(5000));
        assert_eq!(config.cycle.sorting_delay, Duration::from_millis(2000));
        assert_eq!(config.sensors.debounce_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_sort_intents_per_category() {
        let config = ActuatorConfig::default();

        let wet = config.sort_intent(WasteCategory::Wet).unwrap();
        assert_eq!(wet.target, ActuatorTarget::SortWet);
        assert_eq!(wet.action, ActuatorAction::Sweep { angle: 0 });

        let covers = config.sort_intent(WasteCategory::Covers).unwrap();
        assert_eq!(covers.target, ActuatorTarget::SortCovers);
        assert_eq!(covers.action, ActuatorAction::Sweep { angle: 135 });

        // Unknown stays in the default compartment
        assert!(config.sort_intent(WasteCategory::Unknown).is_none());
    }

    #[test]
    fn test_post_action_policy() {
        let policy = PostActionConfig::default();

        assert!(policy.sanitize_after(WasteCategory::Wet));
        assert!(!policy.sanitize_after(WasteCategory::Dry));
        assert!(policy.reward_after(WasteCategory::Dry));
        assert!(!policy.reward_after(WasteCategory::Unknown));

        let always = PostActionConfig {
            sanitize: SanitizePolicy::Always,
            reward: RewardPolicy::Never,
        };
        assert!(always.sanitize_after(WasteCategory::Paper));
        assert!(!always.reward_after(WasteCategory::Paper));
    }
}
