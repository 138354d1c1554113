//! Control loop: the hexagonal core.
//!
//! [`ControlLoop`] owns the hardware context, the display, the delay
//! source and the event sink, plus the domain state that survives a tick
//! (the fire guard's temperature baseline). Everything it touches goes
//! through port traits, so the whole loop runs against mocks on the host.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │         ControlLoop          │ ──▶ DisplayPort
//! ActuatorPort ◀──│ FireGuard · Filter · Follow  │
//!                 │ PlantHealthClassifier        │
//!                 └──────────────────────────────┘
//! ```
//!
//! One tick, in fixed order, each step running regardless of the last:
//!
//! 1. Climate: display, low-humidity alert, thermal-rise suppression.
//! 2. Flame: debounced check, suppression, settle pause.
//! 3. Distance: plant check inside the danger range, follow policy
//!    outside it, stop when there is no valid sample.
//! 4. Pacing delay.

use core::fmt::{self, Write as _};

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::SystemConfig;
use crate::control::{decide, BuzzerCommand, FollowBands, FollowDecision, Motion};
use crate::drivers::status_led::IndicatorColor;
use crate::labels::{DiseaseLabels, KEY_HEALTHY, KEY_SICK};
use crate::safety::{FireGuard, FireTrigger};
use crate::sensors::filter::DistanceFilter;
use crate::vision::{HealthResult, PlantHealthClassifier};

use super::effects::{beep, best_effort, flash};
use super::events::AppEvent;
use super::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};
use super::shutdown::ShutdownSignal;

/// Scratch buffer for display messages.
type Text = heapless::String<64>;

fn text(args: fmt::Arguments<'_>) -> Text {
    let mut out = Text::new();
    // Overflow drops the tail; the display truncates long lines anyway.
    let _ = out.write_fmt(args);
    out
}

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop<H, D, W, S> {
    hw: H,
    display: D,
    delay: W,
    sink: S,
    config: SystemConfig,
    labels: DiseaseLabels,
    fire: FireGuard,
    filter: DistanceFilter,
    bands: FollowBands,
    classifier: PlantHealthClassifier,
    tick_count: u64,
}

impl<H, D, W, S> ControlLoop<H, D, W, S>
where
    H: SensorPort + ActuatorPort,
    D: DisplayPort,
    W: DelayNs,
    S: EventSink,
{
    pub fn new(
        config: SystemConfig,
        labels: DiseaseLabels,
        hw: H,
        display: D,
        delay: W,
        sink: S,
    ) -> Self {
        Self {
            fire: FireGuard::new(&config),
            filter: DistanceFilter::new(&config),
            bands: FollowBands::from(&config),
            classifier: PlantHealthClassifier::from_config(&config),
            config,
            labels,
            hw,
            display,
            delay,
            sink,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the banner and hold it for the startup pause.
    pub fn start(&mut self) {
        self.display.show("Robot Plant Care\nStarting...");
        self.sink.emit(&AppEvent::Started);
        info!("control loop started");
        self.delay.delay_ms(self.config.startup_pause_ms);
    }

    /// Tick until `shutdown` is raised, then clean up. Cleanup runs even
    /// when the signal was already raised before the first tick.
    pub fn run(&mut self, shutdown: &ShutdownSignal) {
        self.start();
        while !shutdown.is_triggered() {
            self.tick();
        }
        self.stop();
    }

    /// Release the hardware. Idempotent.
    pub fn stop(&mut self) {
        self.hw.cleanup();
        self.display.show("Stopped");
        self.sink.emit(&AppEvent::Stopped {
            ticks: self.tick_count,
        });
        info!("control loop stopped after {} ticks", self.tick_count);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One full iteration, including the pacing delay.
    pub fn tick(&mut self) {
        self.tick_count += 1;
        self.check_climate();
        self.check_flame();
        self.check_distance();
        self.delay.delay_ms(self.config.loop_interval_ms);
    }

    fn check_climate(&mut self) {
        let Some(reading) = self.hw.read_climate() else {
            self.display.show("DHT read failed");
            self.sink.emit(&AppEvent::ClimateUnavailable);
            return;
        };
        self.sink.emit(&AppEvent::Climate(reading));
        self.display.show(&text(format_args!(
            "Hum:{:.1}%\nTmp:{:.1}C",
            reading.humidity_pct, reading.temperature_c
        )));

        if reading.humidity_pct < self.config.humidity_low_pct {
            best_effort("indicator", self.hw.set_indicator(IndicatorColor::Blue));
            self.display
                .show(&text(format_args!("Low humidity\n{:.1}%", reading.humidity_pct)));
            self.sink.emit(&AppEvent::LowHumidity(reading.humidity_pct));
        }

        if self.fire.observe_temperature(reading.temperature_c) {
            self.display.show("FIRE DETECTED\nTemp rise");
            self.suppress(FireTrigger::ThermalRise);
        }
    }

    fn check_flame(&mut self) {
        if !self.fire.flame_detected(&mut self.hw, &mut self.delay) {
            return;
        }
        self.display.show("FLAME DETECTED\nSuppressing...");
        self.suppress(FireTrigger::Flame);
        self.delay.delay_ms(self.config.flame_settle_ms);
    }

    fn suppress(&mut self, trigger: FireTrigger) {
        self.sink.emit(&AppEvent::FireDetected(trigger));
        self.fire.suppress(trigger, &mut self.hw, &mut self.delay);
        self.display.show("Suppression done");
        self.sink.emit(&AppEvent::FireSuppressed(trigger));
    }

    fn check_distance(&mut self) {
        let distance = self.filter.get_distance(&mut self.hw, &mut self.delay);
        self.sink.emit(&AppEvent::Distance(distance));

        let Some(d) = distance else {
            self.display.show("Distance: N/A");
            best_effort("stop motors", self.hw.drive(Motion::Stop));
            return;
        };
        self.display.show(&text(format_args!("Dist:{:.1}cm", d)));

        if d < self.bands.danger {
            best_effort("stop motors", self.hw.drive(Motion::Stop));
            self.check_plant();
        } else {
            let decision = decide(Some(d), &self.bands);
            self.apply_follow(decision);
            self.sink.emit(&AppEvent::Follow(decision));
        }
    }

    fn check_plant(&mut self) {
        let frame = self.hw.capture_frame();
        let result = self.classifier.classify(frame.as_ref());
        self.react_to_plant(&result);
        self.sink.emit(&AppEvent::PlantChecked(result));
        self.delay.delay_ms(self.config.plant_settle_ms);
    }

    // ── Internal ──────────────────────────────────────────────

    fn react_to_plant(&mut self, result: &HealthResult) {
        if !result.classified {
            self.display.show("Cam fail");
            return;
        }
        info!(
            "plant {} ({:.1}% green)",
            if result.healthy { "healthy" } else { "sick" },
            result.green_percent
        );
        if result.healthy {
            best_effort("indicator", self.hw.set_indicator(IndicatorColor::Green));
            self.display.show(&text(format_args!(
                "{}\n{:.1}%",
                self.labels.label(KEY_HEALTHY),
                result.green_percent
            )));
        } else {
            flash(
                &mut self.hw,
                &mut self.delay,
                IndicatorColor::Yellow,
                self.config.led_flash_count,
                self.config.led_flash_ms,
            );
            beep(&mut self.hw, &mut self.delay, self.config.buzzer_long_ms);
            self.display.show(&text(format_args!(
                "{}\n{:.1}%",
                self.labels.label(KEY_SICK),
                result.green_percent
            )));
        }
    }

    fn apply_follow(&mut self, decision: FollowDecision) {
        best_effort("drive", self.hw.drive(decision.motion));
        match decision.buzzer {
            BuzzerCommand::Off => best_effort("buzzer", self.hw.set_buzzer(false)),
            BuzzerCommand::ShortBeep => {
                beep(&mut self.hw, &mut self.delay, self.config.buzzer_short_ms)
            }
            BuzzerCommand::Continuous => best_effort("buzzer", self.hw.set_buzzer(true)),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Thermal-rise baseline from the last successful climate read.
    pub fn previous_temperature(&self) -> Option<f32> {
        self.fire.previous_temperature()
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn delay(&self) -> &W {
        &self.delay
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
