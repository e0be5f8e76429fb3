//! Feedback sink implementations

pub mod led;

pub use led::LedFeedback;
