//! LED strip feedback
//!
//! Lights the strip while the door is open so the user can see the bin is
//! paying attention, and drops it on faults.

use embedded_hal::digital::OutputPin;

use kados_core::cycle::CycleEvent;
use kados_core::traits::FeedbackSink;

/// Door-following LED strip
pub struct LedFeedback<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> LedFeedback<P> {
    /// Create the sink with the strip dark
    pub fn new(mut pin: P) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self { pin, lit: false })
    }

    /// Check if the strip is lit
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn set(&mut self, lit: bool) {
        // Feedback is fire-and-forget; a failed pin write must not
        // propagate into the control loop
        let result = if lit {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_ok() {
            self.lit = lit;
        }
    }
}

impl<P: OutputPin> FeedbackSink for LedFeedback<P> {
    fn on_event(&mut self, event: CycleEvent) {
        match event {
            CycleEvent::DoorOpened => self.set(true),
            CycleEvent::DoorClosed | CycleEvent::Fault(_) => self.set(false),
            _ => {}
        }
    }
}
