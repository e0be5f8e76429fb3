//! Feedback task
//!
//! Consumes cycle events off the channel and drives the user-facing
//! surfaces. On this board that is the LED strip plus the defmt log; the
//! display and audio modules hang off the same event stream when fitted.

use defmt::*;
use embassy_rp::gpio::Output;

use kados_core::cycle::CycleEvent;
use kados_core::traits::FeedbackSink;
use kados_drivers::feedback::LedFeedback;

use crate::channels::EVENT_CHANNEL;

/// Feedback task - event-driven lights and logging
#[embassy_executor::task]
pub async fn feedback_task(led_pin: Output<'static>) {
    info!("Feedback task started");

    // Output pins cannot fail on this chip
    let mut led = match LedFeedback::new(led_pin) {
        Ok(led) => led,
        Err(e) => match e {},
    };

    loop {
        let event = EVENT_CHANNEL.receive().await;

        match event {
            CycleEvent::Classified(category) => info!("classified: {}", category.label()),
            CycleEvent::Fault(reason) => warn!("cycle fault: {:?}", reason),
            _ => debug!("cycle event: {:?}", event),
        }

        led.on_event(event);
    }
}
