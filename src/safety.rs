//! Fire guard.
//!
//! Two independent triggers feed one suppression routine:
//!
//! 1. **Flame**: the IR flame input must read active on every one of
//!    `flame_samples` consecutive samples. The first idle sample ends the
//!    run with "no flame".
//! 2. **Thermal rise**: the temperature climbed by more than
//!    `temp_rise_fire_c` since the previous successful climate read.
//!    Covers the case where the flame sensor has no line of sight.
//!
//! ## Suppression sequence
//!
//! Blocking, never retried, never aborted by an actuator failure:
//!
//! ```text
//!  stop motion → indicator red → buzzer on (hold) → pump on (hold) → pump off
//!  → buzzer off → [thermal only: chirp] → indicator off
//! ```
//!
//! The trailing chirp on the thermal path is kept as the one deliberate
//! difference between the two triggers.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use log::{error, info};

use crate::app::effects::best_effort;
use crate::app::ports::{ActuatorPort, SensorPort};
use crate::config::SystemConfig;
use crate::control::Motion;
use crate::drivers::status_led::IndicatorColor;

/// What set off the suppression sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireTrigger {
    Flame,
    ThermalRise,
}

/// One step of the suppression sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionStep {
    Drive(Motion),
    Indicator(IndicatorColor),
    Buzzer(bool),
    Pump(bool),
    WaitMs(u32),
}

pub const MAX_SUPPRESSION_STEPS: usize = 16;

pub type SuppressionPlan = Vec<SuppressionStep, MAX_SUPPRESSION_STEPS>;

pub struct FireGuard {
    flame_samples: u8,
    flame_pause_ms: u32,
    rise_threshold_c: f32,
    buzzer_hold_ms: u32,
    pump_ms: u32,
    chirp_ms: u32,
    /// Temperature from the last successful climate read.
    previous_temp_c: Option<f32>,
}

impl FireGuard {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            flame_samples: config.flame_samples,
            flame_pause_ms: config.flame_sample_pause_ms,
            rise_threshold_c: config.temp_rise_fire_c,
            buzzer_hold_ms: config.buzzer_continuous_ms,
            pump_ms: config.pump_duration_ms,
            chirp_ms: config.buzzer_short_ms,
            previous_temp_c: None,
        }
    }

    // ── Flame trigger ─────────────────────────────────────────

    /// Debounced flame verdict. Pauses after every active sample.
    pub fn flame_detected(&self, hw: &mut impl SensorPort, delay: &mut impl DelayNs) -> bool {
        for _ in 0..self.flame_samples {
            if !hw.flame_active() {
                return false;
            }
            delay.delay_ms(self.flame_pause_ms);
        }
        self.flame_samples > 0
    }

    // ── Thermal trigger ───────────────────────────────────────

    /// Feed a successful temperature reading. Returns `true` when it rose
    /// by more than the threshold since the previous one. The reading
    /// always becomes the new baseline.
    pub fn observe_temperature(&mut self, temperature_c: f32) -> bool {
        let fire = self
            .previous_temp_c
            .is_some_and(|prev| temperature_c - prev > self.rise_threshold_c);
        self.previous_temp_c = Some(temperature_c);
        fire
    }

    pub fn previous_temperature(&self) -> Option<f32> {
        self.previous_temp_c
    }

    // ── Suppression ───────────────────────────────────────────

    /// The ordered steps for `trigger`.
    pub fn plan(&self, trigger: FireTrigger) -> SuppressionPlan {
        use SuppressionStep::*;

        let mut plan = SuppressionPlan::new();
        let steps = [
            Drive(Motion::Stop),
            Indicator(IndicatorColor::Red),
            Buzzer(true),
            WaitMs(self.buzzer_hold_ms),
            Pump(true),
            WaitMs(self.pump_ms),
            Pump(false),
            Buzzer(false),
        ]
        .into_iter()
        .chain(
            (trigger == FireTrigger::ThermalRise)
                .then_some([Buzzer(true), WaitMs(self.chirp_ms), Buzzer(false)])
                .into_iter()
                .flatten(),
        )
        .chain([Indicator(IndicatorColor::Off)]);

        // At most 12 steps; the plan capacity is never reached.
        for step in steps {
            let _ = plan.push(step);
        }
        plan
    }

    /// Run the full suppression sequence for `trigger`, blocking.
    pub fn suppress(
        &self,
        trigger: FireTrigger,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
    ) {
        error!("FIRE | {:?} trigger, suppressing", trigger);
        for step in self.plan(trigger) {
            match step {
                SuppressionStep::Drive(m) => best_effort("stop motors", hw.drive(m)),
                SuppressionStep::Indicator(c) => best_effort("indicator", hw.set_indicator(c)),
                SuppressionStep::Buzzer(on) => best_effort("buzzer", hw.set_buzzer(on)),
                SuppressionStep::Pump(on) => best_effort("pump", hw.set_pump(on)),
                SuppressionStep::WaitMs(ms) => delay.delay_ms(ms),
            }
        }
        info!("FIRE | suppression complete");
    }
}
