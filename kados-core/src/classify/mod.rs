//! Waste material classifier
//!
//! Maps one snapshot of analog readings to a category. Stateless and pure:
//! the same reading always classifies the same way.
//!
//! The combination policy is strict priority: inductive evidence wins
//! (metal detection is the least ambiguous signal), then moisture, then
//! capacitance, with Dry as the default bucket. Anything unmeasurable still
//! has to land somewhere, so an all-unavailable reading classifies as Dry.

use crate::config::ClassifierConfig;
use crate::sensing::SensorReading;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Material categories the bin can sort into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WasteCategory {
    /// Moist organic waste
    Wet,
    /// Default bucket for anything not positively identified
    Dry,
    /// Fibrous material detected capacitively
    Paper,
    /// Metal lids and foil detected inductively
    Covers,
    /// No classification; the deposit stays in the default compartment
    Unknown,
}

impl WasteCategory {
    /// Whether a classification was actually reached
    pub fn is_known(self) -> bool {
        !matches!(self, WasteCategory::Unknown)
    }

    /// Human-readable label for feedback surfaces
    pub fn label(self) -> &'static str {
        match self {
            WasteCategory::Wet => "WET",
            WasteCategory::Dry => "DRY",
            WasteCategory::Paper => "PAPER",
            WasteCategory::Covers => "COVERS",
            WasteCategory::Unknown => "UNKNOWN",
        }
    }
}

/// Per-channel boolean threshold results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Evidence {
    pub wet: bool,
    pub paper: bool,
    pub covers: bool,
}

impl Evidence {
    /// Whether any channel produced positive evidence
    pub fn any(&self) -> bool {
        self.wet || self.paper || self.covers
    }
}

/// Threshold classifier over one sensor snapshot
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given thresholds
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Evaluate each channel's threshold independently
    ///
    /// An unavailable channel contributes no evidence.
    pub fn evidence(&self, reading: &SensorReading) -> Evidence {
        Evidence {
            wet: exceeds(reading.moisture, self.config.moisture_threshold),
            paper: exceeds(reading.capacitance, self.config.capacitance_threshold),
            covers: exceeds(reading.inductance, self.config.inductance_threshold),
        }
    }

    /// Pick the category for a reading
    ///
    /// Priority on simultaneous evidence: Covers > Wet > Paper.
    pub fn classify(&self, reading: &SensorReading) -> WasteCategory {
        let evidence = self.evidence(reading);

        if evidence.covers {
            WasteCategory::Covers
        } else if evidence.wet {
            WasteCategory::Wet
        } else if evidence.paper {
            WasteCategory::Paper
        } else {
            WasteCategory::Dry
        }
    }
}

fn exceeds(value: Option<u16>, threshold: u16) -> bool {
    matches!(value, Some(v) if v > threshold)
}
