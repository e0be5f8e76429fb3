//! Hardware configuration types
//!
//! Pin assignments for the sensors, servos, and relays. The board support
//! code owns the actual peripheral setup; this map is the single place the
//! wiring is written down.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// Complete pin map for the bin hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinPinout {
    /// IR sensor watching the approach zone in front of the door
    pub door_sensor: PinConfig,
    /// IR sensor watching the drop chute below the door
    pub waste_sensor: PinConfig,
    /// Ultrasonic fill sensor trigger output
    pub ultrasonic_trig: PinConfig,
    /// Ultrasonic fill sensor echo input
    pub ultrasonic_echo: PinConfig,
    pub door_servo: PinConfig,
    pub sort_servo_wet: PinConfig,
    pub sort_servo_dry: PinConfig,
    pub sort_servo_paper: PinConfig,
    pub sort_servo_covers: PinConfig,
    pub sanitizer_relay: PinConfig,
    pub reward_relay: PinConfig,
    pub led_strip: PinConfig,
    /// ADC channel for the moisture probe
    pub moisture_adc: u8,
    /// ADC channel for the capacitive probe
    pub capacitance_adc: u8,
    /// ADC channel for the inductive probe
    pub inductance_adc: u8,
}

impl Default for BinPinout {
    fn default() -> Self {
        Self {
            door_sensor: PinConfig::with_pullup(2),
            waste_sensor: PinConfig::with_pullup(3),
            ultrasonic_trig: PinConfig::new(4),
            ultrasonic_echo: PinConfig::new(5),
            door_servo: PinConfig::new(6),
            sort_servo_wet: PinConfig::new(7),
            sort_servo_dry: PinConfig::new(8),
            sort_servo_paper: PinConfig::new(9),
            sort_servo_covers: PinConfig::new(10),
            sanitizer_relay: PinConfig::new(11),
            reward_relay: PinConfig::new(12),
            led_strip: PinConfig::new(13),
            moisture_adc: 0,
            capacitance_adc: 1,
            inductance_adc: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_config() {
        let pin = PinConfig::new(10);
        assert_eq!(pin.pin, 10);
        assert!(!pin.inverted);
        assert!(!pin.pull_up);

        let inverted = PinConfig::inverted(12);
        assert!(inverted.inverted);

        let pullup = PinConfig::with_pullup(4);
        assert!(pullup.pull_up);
    }

    #[test]
    fn test_default_pinout_is_distinct() {
        let pins = BinPinout::default();
        let all = [
            pins.door_sensor.pin,
            pins.waste_sensor.pin,
            pins.ultrasonic_trig.pin,
            pins.ultrasonic_echo.pin,
            pins.door_servo.pin,
            pins.sort_servo_wet.pin,
            pins.sort_servo_dry.pin,
            pins.sort_servo_paper.pin,
            pins.sort_servo_covers.pin,
            pins.sanitizer_relay.pin,
            pins.reward_relay.pin,
            pins.led_strip.pin,
        ];

        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b, "pin {} assigned twice", a);
            }
        }
    }
}
