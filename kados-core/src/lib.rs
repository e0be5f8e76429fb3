//! Board-agnostic core logic for the smart waste bin firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (sensor port, actuator port, clock)
//! - Sensor hub with digital debouncing and range conversion
//! - Waste material classifier
//! - Actuator driver with per-target serialization and dwell tracking
//! - Deposit-cycle state machine and controller
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod actuate;
pub mod classify;
pub mod config;
pub mod cycle;
pub mod sensing;
pub mod time;
pub mod traits;
