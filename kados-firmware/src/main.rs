//! Kados - Smart Waste Bin Firmware
//!
//! Main firmware binary for RP2040-based sorting bins. Brings up the
//! board peripherals, parks the mechanics, and spawns the control,
//! ranger, and feedback tasks.
//!
//! Named after the Greek "kados" (κάδος) meaning "bin" - the vessel
//! this firmware opens, watches, and sorts into.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::traits::ToFixed;
use {defmt_rtt as _, panic_probe as _};

use kados_core::config::BinConfig;
use kados_drivers::relay::GpioRelay;
use kados_drivers::servo::{PulseServo, ServoTiming};

mod channels;
mod hw;
mod tasks;

/// PWM wrap value for a 20ms servo frame at one tick per microsecond
const SERVO_TOP: u16 = 19_999;

/// 50Hz servo PWM: 125MHz system clock / 125 = 1MHz tick
fn servo_pwm_config() -> PwmConfig {
    let mut config = PwmConfig::default();
    config.divider = 125.to_fixed();
    config.top = SERVO_TOP;
    config
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kados firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Compile-time configuration; thresholds, angles, and timings are
    // immutable for the life of the process
    let config = BinConfig::default();

    // IR presence sensors (approach on GPIO2, chute on GPIO3)
    let door_sensor = Input::new(p.PIN_2, Pull::Up);
    let waste_sensor = Input::new(p.PIN_3, Pull::Up);

    // Ultrasonic fill sensor (trigger GPIO4, echo GPIO5)
    let trig = Output::new(p.PIN_4, Level::Low);
    let echo = Input::new(p.PIN_5, Pull::None);

    // Analog probes on ADC0-2 (GPIO26-28)
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let moisture = Channel::new_pin(p.PIN_26, Pull::None);
    let capacitance = Channel::new_pin(p.PIN_27, Pull::None);
    let inductance = Channel::new_pin(p.PIN_28, Pull::None);

    info!("Sensors initialized");

    // Servo PWM on GPIO6-10 across slices 3, 4, and 5
    let slice3 = Pwm::new_output_ab(p.PWM_SLICE3, p.PIN_6, p.PIN_7, servo_pwm_config());
    let slice4 = Pwm::new_output_ab(p.PWM_SLICE4, p.PIN_8, p.PIN_9, servo_pwm_config());
    let slice5 = Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, servo_pwm_config());

    let (door_pwm, wet_pwm) = slice3.split();
    let (dry_pwm, paper_pwm) = slice4.split();
    let (covers_pwm, _) = slice5.split();

    let timing = ServoTiming::default();
    let mut actuators = hw::BoardActuators {
        door: PulseServo::new(door_pwm.unwrap(), timing),
        sort_wet: PulseServo::new(wet_pwm.unwrap(), timing),
        sort_dry: PulseServo::new(dry_pwm.unwrap(), timing),
        sort_paper: PulseServo::new(paper_pwm.unwrap(), timing),
        sort_covers: PulseServo::new(covers_pwm.unwrap(), timing),
        sanitizer: GpioRelay::new_active_high(Output::new(p.PIN_11, Level::Low)).unwrap(),
        reward: GpioRelay::new_active_high(Output::new(p.PIN_12, Level::Low)).unwrap(),
    };

    // Known mechanical state before the first cycle: door closed,
    // sorters at neutral
    actuators.park(&config.actuators.angles);
    info!("Actuators initialized and parked");

    let sensors = hw::BoardSensors {
        door: door_sensor,
        waste: waste_sensor,
        adc,
        moisture,
        capacitance,
        inductance,
    };

    // LED strip relay (GPIO13) is driven by the feedback task
    let led_pin = Output::new(p.PIN_13, Level::Low);

    // Spawn tasks
    spawner.spawn(tasks::ranger_task(trig, echo)).unwrap();
    spawner.spawn(tasks::feedback_task(led_pin)).unwrap();
    spawner
        .spawn(tasks::control_task(sensors, actuators, config))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
