//! One debounced snapshot of every sensor channel

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable readings for one control tick
///
/// `None` on an optional channel means the sensor was unavailable (read
/// timed out or failed) or, for the fill channel, that nothing echoed
/// within range. Callers treat `None` as zero evidence, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorReading {
    /// Debounced approach-zone presence
    pub door_presence: bool,
    /// Debounced drop-chute presence
    pub waste_presence: bool,
    /// Distance from the fill sensor to the waste surface
    pub fill_distance_cm: Option<u16>,
    /// Raw moisture magnitude
    pub moisture: Option<u16>,
    /// Raw capacitance magnitude
    pub capacitance: Option<u16>,
    /// Raw inductance magnitude
    pub inductance: Option<u16>,
}

impl SensorReading {
    /// Whether the fill surface is at or above the "bin full" line
    pub fn bin_full(&self, threshold_cm: u16) -> bool {
        matches!(self.fill_distance_cm, Some(d) if d <= threshold_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_full() {
        let mut reading = SensorReading::default();
        assert!(!reading.bin_full(10));

        reading.fill_distance_cm = Some(8);
        assert!(reading.bin_full(10));

        reading.fill_distance_cm = Some(25);
        assert!(!reading.bin_full(10));
    }
}
