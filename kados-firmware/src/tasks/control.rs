//! Control loop task
//!
//! The single cooperative tick loop: poll the sensor hub once, advance the
//! cycle controller by at most one transition, let the actuator driver
//! track its dwell times. Nothing in here blocks past one tick.

use defmt::*;
use embassy_time::{Duration, Ticker};

use kados_core::actuate::ActuatorDriver;
use kados_core::config::BinConfig;
use kados_core::cycle::{BinController, CycleEvent};
use kados_core::sensing::SensorHub;
use kados_core::traits::{Clock, FeedbackSink};

use crate::channels::EVENT_CHANNEL;
use crate::hw::{BoardActuators, BoardSensors, EmbassyClock};

/// Control tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 20;

/// Forwards cycle events into the feedback channel without blocking
struct ChannelSink;

impl FeedbackSink for ChannelSink {
    fn on_event(&mut self, event: CycleEvent) {
        // Feedback must never stall the loop; drop on overflow
        if EVENT_CHANNEL.try_send(event).is_err() {
            warn!("feedback channel full, dropping {:?}", event);
        }
    }
}

/// Control task - main coordination loop
#[embassy_executor::task]
pub async fn control_task(
    sensors: BoardSensors,
    actuators: BoardActuators,
    config: BinConfig,
) {
    info!("Control task started");

    let clock = EmbassyClock;
    let mut hub = SensorHub::new(sensors, config.sensors);
    let mut driver = ActuatorDriver::new(actuators, config.actuators);
    let mut controller = BinController::new(config);
    let mut sink = ChannelSink;

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut last_state = controller.state();
    let mut bin_full = false;

    loop {
        ticker.next().await;

        let now = clock.now();
        let reading = hub.poll(now);
        controller.tick(&reading, &mut driver, &mut sink, now);

        let state = controller.state();
        if state != last_state {
            debug!("state: {:?} -> {:?}", last_state, state);
            last_state = state;
        }

        // Fill-level watch for the maintenance log
        let full = reading.bin_full(hub.full_distance_cm());
        if full != bin_full {
            if full {
                warn!("bin full, fill distance {:?} cm", reading.fill_distance_cm);
            } else {
                info!("bin level back below the full line");
            }
            bin_full = full;
        }
    }
}
