//! Ultrasonic fill sensor task
//!
//! Measures the echo round-trip in the background and publishes the
//! latest capture through an atomic, so the control loop's sensor poll
//! never waits on a pulse.

use core::sync::atomic::{AtomicU32, Ordering};

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{with_timeout, Duration, Instant, Ticker, Timer};

/// Sentinel meaning "no echo captured"
pub const NO_ECHO: u32 = u32::MAX;

/// Latest round-trip time in microseconds, or [`NO_ECHO`]
pub static ECHO_US: AtomicU32 = AtomicU32::new(NO_ECHO);

/// How often the fill level is measured
const MEASURE_INTERVAL_MS: u64 = 100;

/// Longest plausible echo wait; a 4m round trip is about 23ms
const ECHO_TIMEOUT_MS: u64 = 30;

/// Ranger task - periodic ultrasonic measurement
#[embassy_executor::task]
pub async fn ranger_task(mut trig: Output<'static>, mut echo: Input<'static>) {
    info!("Ranger task started");

    let mut ticker = Ticker::every(Duration::from_millis(MEASURE_INTERVAL_MS));

    loop {
        ticker.next().await;

        // 10µs trigger pulse starts a measurement
        trig.set_high();
        Timer::after_micros(10).await;
        trig.set_low();

        let us = match measure(&mut echo).await {
            Some(us) => us,
            None => {
                trace!("no echo");
                NO_ECHO
            }
        };
        ECHO_US.store(us, Ordering::Relaxed);
    }
}

/// Time the echo pulse, bailing out if it never arrives or never ends
async fn measure(echo: &mut Input<'static>) -> Option<u32> {
    with_timeout(Duration::from_millis(ECHO_TIMEOUT_MS), echo.wait_for_high())
        .await
        .ok()?;
    let start = Instant::now();
    with_timeout(Duration::from_millis(ECHO_TIMEOUT_MS), echo.wait_for_low())
        .await
        .ok()?;

    Some(start.elapsed().as_micros() as u32)
}
