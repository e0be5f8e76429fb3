//! Raw hardware I/O port traits
//!
//! The sensor hub and actuator driver are thin layers over these two
//! ports. Board support code implements them with real pins and ADC
//! channels; tests implement them with scripted values.

use crate::actuate::{ActuatorError, ActuatorTarget};

/// Errors that can occur reading a sensor channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// The channel did not respond in time (e.g. no ultrasonic echo)
    Timeout,
    /// The conversion failed at the hardware level
    ReadFailed,
}

/// Raw sensor channel reads
///
/// Digital channels return the electrical level as a plain bool; the hub
/// owns debouncing. Analog channels return raw magnitudes; thresholding is
/// the classifier's job. A failed read must return an error, never block.
pub trait SensorIo {
    /// Level of the IR sensor watching the approach zone
    fn door_presence_raw(&mut self) -> bool;

    /// Level of the IR sensor watching the drop chute
    fn waste_presence_raw(&mut self) -> bool;

    /// Ultrasonic round-trip echo time in microseconds
    fn echo_round_trip_us(&mut self) -> Result<u32, SensorError>;

    /// Raw moisture probe magnitude
    fn moisture_raw(&mut self) -> Result<u16, SensorError>;

    /// Raw capacitive probe magnitude
    fn capacitance_raw(&mut self) -> Result<u16, SensorError>;

    /// Raw inductive probe magnitude
    fn inductance_raw(&mut self) -> Result<u16, SensorError>;
}

/// Raw actuator writes
///
/// One method per mechanism class; the driver routes by target kind and
/// never calls a servo write for a relay target or vice versa.
pub trait ActuatorIo {
    /// Command a servo target to an absolute angle in degrees
    fn set_servo_angle(&mut self, target: ActuatorTarget, degrees: u8)
        -> Result<(), ActuatorError>;

    /// Energize or release a relay target
    fn set_relay(&mut self, target: ActuatorTarget, on: bool) -> Result<(), ActuatorError>;

    /// Whether the mechanism has physically reached its commanded state
    ///
    /// Open-loop mechanisms (hobby servos, relays) have no feedback and
    /// report settled unconditionally; the driver then completes actions
    /// purely on dwell time.
    fn is_settled(&self, target: ActuatorTarget) -> bool {
        let _ = target;
        true
    }
}
