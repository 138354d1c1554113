//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them.

use crate::control::FollowDecision;
use crate::safety::FireTrigger;
use crate::sensors::ClimateReading;
use crate::vision::HealthResult;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The control loop has started.
    Started,

    /// A climate reading was taken this tick.
    Climate(ClimateReading),

    /// The climate sensor gave nothing this tick.
    ClimateUnavailable,

    /// Humidity (%) fell below the alert threshold.
    LowHumidity(f32),

    /// A suppression sequence is about to run.
    FireDetected(FireTrigger),

    /// The suppression sequence ran to completion.
    FireSuppressed(FireTrigger),

    /// Filtered distance for this tick (`None` = no valid sample).
    Distance(Option<f32>),

    /// The plant in front of the robot was checked.
    PlantChecked(HealthResult),

    /// The follow policy produced a command.
    Follow(FollowDecision),

    /// The loop exited and the hardware was cleaned up.
    Stopped { ticks: u64 },
}
