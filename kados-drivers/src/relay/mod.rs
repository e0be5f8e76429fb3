//! Relay adapters

pub mod gpio;

pub use gpio::GpioRelay;
