//! Pulse-width servo adapter
//!
//! Converts an angle in degrees to the hobby-servo pulse width and applies
//! it through an embedded-hal PWM channel. The channel must already be
//! configured for the servo frame period (20 ms for standard servos).

use embedded_hal::pwm::SetDutyCycle;

/// Pulse timing for a servo model
#[derive(Debug, Clone, Copy)]
pub struct ServoTiming {
    /// Pulse width at 0 degrees (µs)
    pub min_pulse_us: u16,
    /// Pulse width at `max_angle` degrees (µs)
    pub max_pulse_us: u16,
    /// PWM frame period (µs)
    pub period_us: u16,
    /// Mechanical range in degrees
    pub max_angle: u8,
}

impl Default for ServoTiming {
    fn default() -> Self {
        // SG90-class hobby servo: 500-2500µs over 180° at 50Hz
        Self {
            min_pulse_us: 500,
            max_pulse_us: 2500,
            period_us: 20_000,
            max_angle: 180,
        }
    }
}

impl ServoTiming {
    /// Pulse width for an angle, clamped to the mechanical range
    pub fn pulse_us(&self, degrees: u8) -> u16 {
        let degrees = degrees.min(self.max_angle) as u32;
        let span = (self.max_pulse_us - self.min_pulse_us) as u32;

        self.min_pulse_us + (span * degrees / self.max_angle as u32) as u16
    }
}

/// Angle-addressed servo over a PWM channel
pub struct PulseServo<P> {
    pwm: P,
    timing: ServoTiming,
    angle: u8,
}

impl<P: SetDutyCycle> PulseServo<P> {
    /// Create a servo adapter and leave the output wherever it was
    pub fn new(pwm: P, timing: ServoTiming) -> Self {
        Self {
            pwm,
            timing,
            angle: 0,
        }
    }

    /// Command the servo to an absolute angle
    pub fn set_angle(&mut self, degrees: u8) -> Result<(), P::Error> {
        let pulse_us = self.timing.pulse_us(degrees);

        // Scale the pulse into the channel's duty range
        let max_duty = self.pwm.max_duty_cycle() as u32;
        let duty = (pulse_us as u32 * max_duty / self.timing.period_us as u32) as u16;

        self.pwm.set_duty_cycle(duty)?;
        self.angle = degrees.min(self.timing.max_angle);
        Ok(())
    }

    /// Last commanded angle
    pub fn angle(&self) -> u8 {
        self.angle
    }
}
