//! PlantBot Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     LogDisplay     LogEventSink   NoCamera    │
//! │  (Sensor+Actuator)   (DisplayPort)  (EventSink)    (FramePort) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │                ControlLoop (domain)                    │    │
//! │  │  FireGuard · DistanceFilter · Follow · Plant health    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Stop button ISR ──▶ ShutdownSignal ──▶ cleanup                │
//! └────────────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::delay::{Delay, Ets};
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, InterruptType, Output, PinDriver, Pull};
use log::{error, info, warn};

use plantbot::adapters::camera::NoCamera;
use plantbot::adapters::display::LogDisplay;
use plantbot::adapters::hardware::{Board, HardwareAdapter};
use plantbot::adapters::log_sink::LogEventSink;
use plantbot::adapters::time::MonotonicClock;
use plantbot::app::service::ControlLoop;
use plantbot::app::shutdown::ShutdownSignal;
use plantbot::config::SystemConfig;
use plantbot::drivers::buzzer::Buzzer;
use plantbot::drivers::motors::MotorDriver;
use plantbot::drivers::pump::PumpDriver;
use plantbot::drivers::status_led::StatusLed;
use plantbot::labels::DiseaseLabels;
use plantbot::pins;
use plantbot::sensors::dht22::Dht22;
use plantbot::sensors::flame::FlameSensor;
use plantbot::sensors::ultrasonic::{RangingParams, UltrasonicSensor};

type OutPin = PinDriver<'static, AnyOutputPin, Output>;
type InPin = PinDriver<'static, AnyIOPin, Input>;

// ── Pin helpers ───────────────────────────────────────────────
//
// Pins are claimed by GPIO number from `pins`, so every number below is
// taken exactly once.

fn output(gpio: i32) -> Result<OutPin> {
    // SAFETY: each GPIO number is claimed once, in `main`.
    let pin = unsafe { AnyOutputPin::new(gpio) };
    PinDriver::output(pin).with_context(|| format!("GPIO{gpio} as output"))
}

fn input(gpio: i32, pull: Pull) -> Result<InPin> {
    // SAFETY: as above. Pull configuration needs an IO-capable pin.
    let pin = unsafe { AnyIOPin::new(gpio) };
    let mut driver = PinDriver::input(pin).with_context(|| format!("GPIO{gpio} as input"))?;
    driver.set_pull(pull)?;
    Ok(driver)
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PlantBot v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    if let Err(e) = config.validate() {
        error!("built-in config rejected: {}", e);
        return Err(anyhow::anyhow!("invalid configuration: {e}"));
    }
    let labels = DiseaseLabels::builtin();
    info!("Config loaded ({} disease labels)", labels.len());

    // ── 3. Stop button → shutdown signal ──────────────────────
    let shutdown = ShutdownSignal::new();
    let mut stop_button = input(pins::STOP_BUTTON_GPIO, Pull::Up)?;
    stop_button.set_interrupt_type(InterruptType::NegEdge)?;
    let isr_signal = shutdown.clone();
    // SAFETY: the callback only stores to an atomic, which is ISR-safe.
    unsafe { stop_button.subscribe(move || isr_signal.trigger()) }?;
    stop_button.enable_interrupt()?;

    // ── 4. Sensors ────────────────────────────────────────────
    let clock = MonotonicClock::new();
    let ranger = UltrasonicSensor::new(
        output(pins::ULTRASONIC_TRIG_GPIO)?,
        input(pins::ULTRASONIC_ECHO_GPIO, Pull::Floating)?,
        clock,
        Ets,
        RangingParams::from_config(&config),
    );

    // SAFETY: DHT22 data line, claimed once.
    let dht_pin = unsafe { AnyIOPin::new(pins::DHT22_GPIO) };
    let mut dht_line = PinDriver::input_output_od(dht_pin).context("DHT22 line")?;
    dht_line.set_pull(Pull::Up)?;
    dht_line.set_high()?;
    let climate = Dht22::new(dht_line, clock, Ets, config.climate_min_interval_ms);

    let flame = FlameSensor::new(input(pins::FLAME_GPIO, Pull::Floating)?);

    // ── 5. Actuators ──────────────────────────────────────────
    let board = Board {
        motors: MotorDriver::new(
            output(pins::MOTOR_IN1_GPIO)?,
            output(pins::MOTOR_IN2_GPIO)?,
            output(pins::MOTOR_IN3_GPIO)?,
            output(pins::MOTOR_IN4_GPIO)?,
        ),
        pump: PumpDriver::new(output(pins::PUMP_RELAY_GPIO)?),
        buzzer: Buzzer::new(output(pins::BUZZER_GPIO)?),
        led: StatusLed::new(
            output(pins::LED_R_GPIO)?,
            output(pins::LED_G_GPIO)?,
            output(pins::LED_B_GPIO)?,
        ),
        flame,
        ranger,
        climate,
        // TODO: OV2640 FramePort adapter (esp32-camera) once the module is fitted.
        camera: NoCamera,
    };
    warn!("No camera fitted: plant checks will report a capture failure");

    // ── 6. Run until the stop button is pressed ───────────────
    let mut control = ControlLoop::new(
        config,
        labels,
        HardwareAdapter::new(board),
        LogDisplay::new(),
        Delay::new_default(),
        LogEventSink::new(),
    );
    control.run(&shutdown);

    info!("Shutdown complete");
    Ok(())
}
