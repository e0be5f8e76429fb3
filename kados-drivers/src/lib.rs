//! Hardware driver implementations
//!
//! This crate bridges the port traits defined in kados-core to
//! embedded-hal peripherals:
//!
//! - Pulse-width servo adapter over `SetDutyCycle`
//! - Relay switching over `OutputPin`
//! - LED feedback sink over `OutputPin`

#![no_std]
#![deny(unsafe_code)]

pub mod feedback;
pub mod relay;
pub mod servo;
