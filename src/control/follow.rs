//! Auto-follow decision table.
//!
//! A pure function from a filtered distance to a motion + buzzer command.
//! Bands are closed-open except the ideal band, which is closed on both
//! ends:
//!
//! | Distance `d` (cm)        | Motion   | Buzzer                         |
//! |--------------------------|----------|--------------------------------|
//! | absent                   | Stop     | Off                            |
//! | `d > too_far`            | Stop     | Off                            |
//! | `d < danger`             | Stop     | Continuous                     |
//! | `close_low <= d < close_high` | Backward | ShortBeep                 |
//! | `ideal_low <= d <= ideal_high` | Forward | ShortBeep if `d < beep_below` |
//! | anything else (dead zone) | Stop    | Off                            |
//!
//! The dead zone between the ideal band and `too_far` is where the robot
//! holds position, so it does not hunt between Forward and Stop at a
//! single boundary.

use crate::config::SystemConfig;
use crate::drivers::motors::Motion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuzzerCommand {
    #[default]
    Off,
    ShortBeep,
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FollowDecision {
    pub motion: Motion,
    pub buzzer: BuzzerCommand,
}

impl FollowDecision {
    pub const HOLD: Self = Self {
        motion: Motion::Stop,
        buzzer: BuzzerCommand::Off,
    };

    const fn new(motion: Motion, buzzer: BuzzerCommand) -> Self {
        Self { motion, buzzer }
    }
}

/// Distance thresholds (cm), lifted out of [`SystemConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowBands {
    pub danger: f32,
    pub close_low: f32,
    pub close_high: f32,
    pub ideal_low: f32,
    pub ideal_high: f32,
    pub beep_below: f32,
    pub too_far: f32,
}

impl From<&SystemConfig> for FollowBands {
    fn from(c: &SystemConfig) -> Self {
        Self {
            danger: c.dist_danger_cm,
            close_low: c.dist_close_low_cm,
            close_high: c.dist_close_high_cm,
            ideal_low: c.dist_ideal_low_cm,
            ideal_high: c.dist_ideal_high_cm,
            beep_below: c.dist_ideal_beep_below_cm,
            too_far: c.dist_too_far_cm,
        }
    }
}

/// Map a filtered distance to a command. Total: every input, including
/// `None` and NaN, yields a decision.
pub fn decide(distance_cm: Option<f32>, bands: &FollowBands) -> FollowDecision {
    let Some(d) = distance_cm else {
        return FollowDecision::HOLD;
    };

    if d > bands.too_far {
        FollowDecision::HOLD
    } else if d < bands.danger {
        FollowDecision::new(Motion::Stop, BuzzerCommand::Continuous)
    } else if bands.close_low <= d && d < bands.close_high {
        FollowDecision::new(Motion::Backward, BuzzerCommand::ShortBeep)
    } else if bands.ideal_low <= d && d <= bands.ideal_high {
        let buzzer = if d < bands.beep_below {
            BuzzerCommand::ShortBeep
        } else {
            BuzzerCommand::Off
        };
        FollowDecision::new(Motion::Forward, buzzer)
    } else {
        FollowDecision::HOLD
    }
}
