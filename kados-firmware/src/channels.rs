//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use kados_core::cycle::CycleEvent;

/// Channel capacity for cycle events to the feedback task
const EVENT_CHANNEL_SIZE: usize = 8;

/// Cycle events from the control loop (display, audio, LED reactions)
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, CycleEvent, EVENT_CHANNEL_SIZE> =
    Channel::new();
