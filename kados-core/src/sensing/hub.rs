//! Sensor hub implementation

use crate::config::SensorConfig;
use crate::time::Instant;
use crate::traits::SensorIo;

use super::debounce::Debouncer;
use super::reading::SensorReading;

/// Ultrasonic round-trip time per centimeter of distance
///
/// Sound covers 1 cm out and 1 cm back in roughly 58 µs at room
/// temperature.
pub const ROUND_TRIP_US_PER_CM: u32 = 58;

/// Debouncing front-end over the raw sensor port
///
/// `poll` samples every channel exactly once and is cheap enough to call
/// each control tick.
pub struct SensorHub<S> {
    io: S,
    config: SensorConfig,
    door: Debouncer,
    waste: Debouncer,
}

impl<S: SensorIo> SensorHub<S> {
    /// Create a hub over a sensor port
    ///
    /// Both presence channels start from the released (false) level.
    pub fn new(io: S, config: SensorConfig) -> Self {
        Self {
            io,
            config,
            door: Debouncer::new(false, config.debounce_delay),
            waste: Debouncer::new(false, config.debounce_delay),
        }
    }

    /// Sample all channels once and return the stable reading
    pub fn poll(&mut self, now: Instant) -> SensorReading {
        let door_raw = self.io.door_presence_raw();
        let waste_raw = self.io.waste_presence_raw();

        SensorReading {
            door_presence: self.door.update(door_raw, now),
            waste_presence: self.waste.update(waste_raw, now),
            fill_distance_cm: self.read_distance(),
            moisture: self.io.moisture_raw().ok(),
            capacitance: self.io.capacitance_raw().ok(),
            inductance: self.io.inductance_raw().ok(),
        }
    }

    /// Convert the echo round-trip into centimeters
    ///
    /// Out-of-range echoes and read failures both collapse to "no object";
    /// a numeric outlier never escapes the hub.
    fn read_distance(&mut self) -> Option<u16> {
        let us = self.io.echo_round_trip_us().ok()?;
        let cm = us / ROUND_TRIP_US_PER_CM;

        if cm > self.config.max_range_cm as u32 {
            None
        } else {
            Some(cm as u16)
        }
    }

    /// Configured "bin full" distance, for feedback consumers
    pub fn full_distance_cm(&self) -> u16 {
        self.config.full_distance_cm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Duration;
    use crate::traits::SensorError;

    /// Scriptable sensor port
    struct FakeIo {
        door: bool,
        waste: bool,
        echo_us: Result<u32, SensorError>,
        moisture: Result<u16, SensorError>,
        capacitance: Result<u16, SensorError>,
        inductance: Result<u16, SensorError>,
    }

    impl FakeIo {
        fn quiet() -> Self {
            Self {
                door: false,
                waste: false,
                echo_us: Err(SensorError::Timeout),
                moisture: Ok(100),
                capacitance: Ok(100),
                inductance: Ok(100),
            }
        }
    }

    impl SensorIo for FakeIo {
        fn door_presence_raw(&mut self) -> bool {
            self.door
        }

        fn waste_presence_raw(&mut self) -> bool {
            self.waste
        }

        fn echo_round_trip_us(&mut self) -> Result<u32, SensorError> {
            self.echo_us
        }

        fn moisture_raw(&mut self) -> Result<u16, SensorError> {
            self.moisture
        }

        fn capacitance_raw(&mut self) -> Result<u16, SensorError> {
            self.capacitance
        }

        fn inductance_raw(&mut self) -> Result<u16, SensorError> {
            self.inductance
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_presence_is_debounced() {
        let mut hub = SensorHub::new(FakeIo::quiet(), SensorConfig::default());

        hub.io.door = true;
        assert!(!hub.poll(at(0)).door_presence);
        assert!(!hub.poll(at(30)).door_presence);
        assert!(hub.poll(at(60)).door_presence);
    }

    #[test]
    fn test_distance_conversion() {
        let mut hub = SensorHub::new(FakeIo::quiet(), SensorConfig::default());

        // 580 µs round trip = 10 cm
        hub.io.echo_us = Ok(580);
        assert_eq!(hub.poll(at(0)).fill_distance_cm, Some(10));
    }

    #[test]
    fn test_no_echo_reports_no_object() {
        let mut hub = SensorHub::new(FakeIo::quiet(), SensorConfig::default());

        // Timed-out echo
        hub.io.echo_us = Err(SensorError::Timeout);
        assert_eq!(hub.poll(at(0)).fill_distance_cm, None);

        // Echo past the sane maximum (400 cm)
        hub.io.echo_us = Ok(401 * ROUND_TRIP_US_PER_CM);
        assert_eq!(hub.poll(at(10)).fill_distance_cm, None);
    }

    #[test]
    fn test_analog_failure_degrades_to_unavailable() {
        let mut hub = SensorHub::new(FakeIo::quiet(), SensorConfig::default());
        hub.io.moisture = Err(SensorError::ReadFailed);

        let reading = hub.poll(at(0));
        assert_eq!(reading.moisture, None);
        assert_eq!(reading.capacitance, Some(100));
    }

    #[test]
    fn test_analog_passes_through_raw() {
        let mut hub = SensorHub::new(FakeIo::quiet(), SensorConfig::default());
        hub.io.inductance = Ok(987);

        // No thresholding in the hub; the magnitude arrives untouched
        assert_eq!(hub.poll(at(0)).inductance, Some(987));
    }
}
