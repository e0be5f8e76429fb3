//! Sensor hub
//!
//! Converts noisy electrical signals into stable semantic readings: digital
//! channels are debounced, the ultrasonic channel is converted to
//! centimeters, analog channels pass through raw, and any failed read
//! degrades to "unavailable" instead of propagating an error.

pub mod debounce;
pub mod hub;
pub mod reading;

pub use debounce::Debouncer;
pub use hub::SensorHub;
pub use reading::SensorReading;
