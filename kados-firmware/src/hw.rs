//! Board implementations of the core hardware ports
//!
//! Wires the RP2040 peripherals into the `SensorIo`/`ActuatorIo`/`Clock`
//! seams the core expects. Everything here is thin: levels, magnitudes,
//! and angle writes, with no control logic.

use core::sync::atomic::Ordering;

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::{Input, Output};
use embassy_rp::pwm::PwmOutput;

use kados_core::actuate::{ActuatorError, ActuatorTarget};
use kados_core::time::Instant;
use kados_core::traits::{ActuatorIo, Clock, SensorError, SensorIo};
use kados_drivers::relay::GpioRelay;
use kados_drivers::servo::PulseServo;

use crate::tasks::ranger::{ECHO_US, NO_ECHO};

/// Monotonic clock over the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::from_millis(embassy_time::Instant::now().as_millis())
    }
}

/// Sensor port wired to the board peripherals
pub struct BoardSensors {
    pub door: Input<'static>,
    pub waste: Input<'static>,
    pub adc: Adc<'static, Blocking>,
    pub moisture: Channel<'static>,
    pub capacitance: Channel<'static>,
    pub inductance: Channel<'static>,
}

impl SensorIo for BoardSensors {
    fn door_presence_raw(&mut self) -> bool {
        // IR reflectance modules pull their output low on detection
        self.door.is_low()
    }

    fn waste_presence_raw(&mut self) -> bool {
        self.waste.is_low()
    }

    fn echo_round_trip_us(&mut self) -> Result<u32, SensorError> {
        // The ranger task measures in the background; this reads its
        // latest capture without waiting
        match ECHO_US.load(Ordering::Relaxed) {
            NO_ECHO => Err(SensorError::Timeout),
            us => Ok(us),
        }
    }

    fn moisture_raw(&mut self) -> Result<u16, SensorError> {
        read_channel(&mut self.adc, &mut self.moisture)
    }

    fn capacitance_raw(&mut self) -> Result<u16, SensorError> {
        read_channel(&mut self.adc, &mut self.capacitance)
    }

    fn inductance_raw(&mut self) -> Result<u16, SensorError> {
        read_channel(&mut self.adc, &mut self.inductance)
    }
}

/// Read one ADC channel, scaled from 12-bit to the 10-bit range the
/// configured thresholds assume
fn read_channel(
    adc: &mut Adc<'static, Blocking>,
    channel: &mut Channel<'static>,
) -> Result<u16, SensorError> {
    adc.blocking_read(channel)
        .map(|raw| raw >> 2)
        .map_err(|_| SensorError::ReadFailed)
}

/// Actuator port wired to the board peripherals
pub struct BoardActuators {
    pub door: PulseServo<PwmOutput<'static>>,
    pub sort_wet: PulseServo<PwmOutput<'static>>,
    pub sort_dry: PulseServo<PwmOutput<'static>>,
    pub sort_paper: PulseServo<PwmOutput<'static>>,
    pub sort_covers: PulseServo<PwmOutput<'static>>,
    pub sanitizer: GpioRelay<Output<'static>>,
    pub reward: GpioRelay<Output<'static>>,
}

impl BoardActuators {
    /// Park every servo at its rest angle
    pub fn park(&mut self, angles: &kados_core::config::ServoAngles) {
        let _ = self.door.set_angle(angles.door_closed);
        let _ = self.sort_wet.set_angle(angles.sort_neutral);
        let _ = self.sort_dry.set_angle(angles.sort_neutral);
        let _ = self.sort_paper.set_angle(angles.sort_neutral);
        let _ = self.sort_covers.set_angle(angles.sort_neutral);
    }
}

impl ActuatorIo for BoardActuators {
    fn set_servo_angle(
        &mut self,
        target: ActuatorTarget,
        degrees: u8,
    ) -> Result<(), ActuatorError> {
        let servo = match target {
            ActuatorTarget::Door => &mut self.door,
            ActuatorTarget::SortWet => &mut self.sort_wet,
            ActuatorTarget::SortDry => &mut self.sort_dry,
            ActuatorTarget::SortPaper => &mut self.sort_paper,
            ActuatorTarget::SortCovers => &mut self.sort_covers,
            _ => return Err(ActuatorError::Hardware),
        };

        servo.set_angle(degrees).map_err(|_| ActuatorError::Hardware)
    }

    fn set_relay(&mut self, target: ActuatorTarget, on: bool) -> Result<(), ActuatorError> {
        let relay = match target {
            ActuatorTarget::Sanitizer => &mut self.sanitizer,
            ActuatorTarget::Reward => &mut self.reward,
            // The LED strip belongs to the feedback task on this board
            _ => return Err(ActuatorError::Hardware),
        };

        relay.set_on(on).map_err(|_| ActuatorError::Hardware)
    }
}
