//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, display, event sinks) implement
//! these traits. The [`ControlLoop`](super::service::ControlLoop) consumes
//! them via generics, so the domain core never touches hardware directly.
//!
//! Sensor ports never fail loudly: a failed read is `None` or an invalid
//! sample. Actuator ports return a typed error that the caller logs and
//! otherwise ignores.

use crate::control::Motion;
use crate::drivers::status_led::IndicatorColor;
use crate::error::ActuatorError;
use crate::sensors::{ClimateReading, RangeSample};
use crate::vision::Frame;

// ───────────────────────────────────────────────────────────────
// Time
// ───────────────────────────────────────────────────────────────

/// Monotonic microsecond clock used for edge timing.
pub trait Clock {
    fn now_us(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One trigger/echo cycle of a pulse-timing ranging sensor.
pub trait RangeSensor {
    /// Each edge wait is bounded by `timeout_us` on its own.
    fn measure_once(&mut self, timeout_us: u32) -> RangeSample;
}

/// Temperature / humidity source. `None` on any transient failure.
pub trait ClimatePort {
    fn read(&mut self) -> Option<ClimateReading>;
}

/// One-shot camera. Acquires and releases the device on every call.
pub trait FramePort {
    fn capture(&mut self) -> Option<Frame>;
}

/// Read-side port: everything the control loop samples.
///
/// Ranging is a supertrait so the distance filter can borrow the whole
/// hardware context as a [`RangeSensor`].
pub trait SensorPort: RangeSensor {
    fn read_climate(&mut self) -> Option<ClimateReading>;

    /// Single raw sample of the flame input. A read error reads as inactive.
    fn flame_active(&mut self) -> bool;

    fn capture_frame(&mut self) -> Option<Frame>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Set both drive motors.
    fn drive(&mut self, motion: Motion) -> Result<(), ActuatorError>;

    fn set_buzzer(&mut self, on: bool) -> Result<(), ActuatorError>;

    fn set_pump(&mut self, on: bool) -> Result<(), ActuatorError>;

    /// Set the RGB status indicator.
    fn set_indicator(&mut self, colour: IndicatorColor) -> Result<(), ActuatorError>;

    /// Stop motors, silence the buzzer, stop the pump, clear the indicator
    /// and release the hardware. Safe to call more than once.
    fn cleanup(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Two-line character display. `\n` separates the lines; rendering
/// failures are absorbed by the adapter.
pub trait DisplayPort {
    fn show(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
