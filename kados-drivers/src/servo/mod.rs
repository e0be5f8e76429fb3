//! Servo adapters

pub mod pulse;

pub use pulse::{PulseServo, ServoTiming};
