//! Deposit-cycle state machine and controller
//!
//! One deposit cycle runs from presence detection to the door closing.
//! The state machine is pure; the controller drives it from sensor
//! readings, owns every timer, and issues actuator intents.

pub mod context;
pub mod controller;
pub mod events;
pub mod machine;

pub use context::CycleContext;
pub use controller::BinController;
pub use events::{CycleEvent, Event};
pub use machine::{AbortReason, BinState};
