//! Mock adapters for integration tests.
//!
//! `MockHardware` plays back scripted sensor readings and records every
//! actuator call, so tests can assert on the full command history
//! without touching real GPIO. The display, sink and delay mocks record
//! what the control loop did with them.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use plantbot::app::events::AppEvent;
use plantbot::app::ports::{ActuatorPort, DisplayPort, EventSink, RangeSensor, SensorPort};
use plantbot::app::shutdown::ShutdownSignal;
use plantbot::control::Motion;
use plantbot::drivers::status_led::IndicatorColor;
use plantbot::error::ActuatorError;
use plantbot::sensors::{ClimateReading, RangeSample};
use plantbot::vision::Frame;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Drive(Motion),
    Buzzer(bool),
    Pump(bool),
    Indicator(IndicatorColor),
    Cleanup,
}

// ── MockHardware ──────────────────────────────────────────────

/// Scripted sensors: each queue is consumed one reading per call; an
/// empty queue reads as a failure (no climate, idle flame, invalid
/// range sample, no frame).
#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub climate: VecDeque<Option<ClimateReading>>,
    pub flame: VecDeque<bool>,
    pub ranges: VecDeque<RangeSample>,
    pub frames: VecDeque<Option<Frame>>,
    /// Every pump command fails (after being recorded).
    pub pump_broken: bool,
    pub cleanups: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_climate(&mut self, humidity_pct: f32, temperature_c: f32) {
        self.climate.push_back(Some(ClimateReading {
            humidity_pct,
            temperature_c,
        }));
    }

    pub fn push_climate_failure(&mut self) {
        self.climate.push_back(None);
    }

    /// One full batch of identical valid samples.
    pub fn push_distance(&mut self, cm: f32, samples: usize) {
        for _ in 0..samples {
            self.ranges.push_back(RangeSample::valid(cm));
        }
    }

    pub fn push_flame(&mut self, samples: &[bool]) {
        self.flame.extend(samples.iter().copied());
    }

    pub fn push_frame(&mut self, frame: Option<Frame>) {
        self.frames.push_back(frame);
    }

    /// Calls recorded from index `from` on.
    pub fn calls_since(&self, from: usize) -> &[ActuatorCall] {
        &self.calls[from..]
    }

    fn last_matching<T>(&self, pick: impl Fn(&ActuatorCall) -> Option<T>, idle: T) -> T {
        for call in self.calls.iter().rev() {
            if *call == ActuatorCall::Cleanup {
                return idle;
            }
            if let Some(v) = pick(call) {
                return v;
            }
        }
        idle
    }

    pub fn motion(&self) -> Motion {
        self.last_matching(
            |c| match c {
                ActuatorCall::Drive(m) => Some(*m),
                _ => None,
            },
            Motion::Stop,
        )
    }

    pub fn buzzer_on(&self) -> bool {
        self.last_matching(
            |c| match c {
                ActuatorCall::Buzzer(on) => Some(*on),
                _ => None,
            },
            false,
        )
    }

    pub fn pump_on(&self) -> bool {
        self.last_matching(
            |c| match c {
                ActuatorCall::Pump(on) => Some(*on),
                _ => None,
            },
            false,
        )
    }

    pub fn indicator(&self) -> IndicatorColor {
        self.last_matching(
            |c| match c {
                ActuatorCall::Indicator(colour) => Some(*colour),
                _ => None,
            },
            IndicatorColor::Off,
        )
    }
}

impl RangeSensor for MockHardware {
    fn measure_once(&mut self, _timeout_us: u32) -> RangeSample {
        self.ranges.pop_front().unwrap_or(RangeSample::INVALID)
    }
}

impl SensorPort for MockHardware {
    fn read_climate(&mut self) -> Option<ClimateReading> {
        self.climate.pop_front().flatten()
    }

    fn flame_active(&mut self) -> bool {
        self.flame.pop_front().unwrap_or(false)
    }

    fn capture_frame(&mut self) -> Option<Frame> {
        self.frames.pop_front().flatten()
    }
}

impl ActuatorPort for MockHardware {
    fn drive(&mut self, motion: Motion) -> Result<(), ActuatorError> {
        self.calls.push(ActuatorCall::Drive(motion));
        Ok(())
    }

    fn set_buzzer(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.calls.push(ActuatorCall::Buzzer(on));
        Ok(())
    }

    fn set_pump(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.calls.push(ActuatorCall::Pump(on));
        if self.pump_broken {
            Err(ActuatorError::GpioWriteFailed)
        } else {
            Ok(())
        }
    }

    fn set_indicator(&mut self, colour: IndicatorColor) -> Result<(), ActuatorError> {
        self.calls.push(ActuatorCall::Indicator(colour));
        Ok(())
    }

    fn cleanup(&mut self) {
        self.cleanups += 1;
        self.calls.push(ActuatorCall::Cleanup);
    }
}

// ── RecordingDisplay ──────────────────────────────────────────

#[derive(Default)]
pub struct RecordingDisplay {
    pub shown: Vec<String>,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn showed(&self, text: &str) -> bool {
        self.shown.iter().any(|s| s == text)
    }
}

impl DisplayPort for RecordingDisplay {
    fn show(&mut self, text: &str) {
        self.shown.push(text.to_owned());
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Records events; optionally raises a shutdown after `n` ticks (one
/// `Distance` event is emitted per tick).
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
    stop_after: Option<(ShutdownSignal, usize)>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stopping_after(ticks: usize, signal: ShutdownSignal) -> Self {
        Self {
            events: Vec::new(),
            stop_after: Some((signal, ticks)),
        }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
        if let Some((signal, ticks)) = &self.stop_after {
            let seen = self.count(|e| matches!(e, AppEvent::Distance(_)));
            if seen >= *ticks {
                signal.trigger();
            }
        }
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Delay that only accumulates the requested time.
#[derive(Default)]
pub struct MockDelay {
    total_ns: u64,
}

#[allow(dead_code)]
impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
