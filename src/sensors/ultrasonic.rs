//! HC-SR04 ultrasonic ranging driver.
//!
//! One measurement: a 10 µs trigger pulse, then the echo line goes HIGH
//! for as long as the acoustic round trip took. Each edge wait is bounded
//! by its own timeout so a disconnected sensor or a stuck echo line can
//! never block the loop.
//!
//! ```text
//!  TRIG ─┐10µs┌──────────────────────────────
//!        └────┘
//!  ECHO ──────────┐<── round trip ──>┌────────
//!                 └──────────────────┘
//!             rise edge          fall edge
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::app::ports::{Clock, RangeSensor};
use crate::config::SystemConfig;
use crate::error::SensorError;

/// Width of the trigger pulse.
const TRIGGER_PULSE_US: u32 = 10;

/// Result of a single trigger/echo cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSample {
    pub valid: bool,
    pub distance_cm: f32,
}

impl RangeSample {
    pub const INVALID: Self = Self {
        valid: false,
        distance_cm: 0.0,
    };

    pub fn valid(distance_cm: f32) -> Self {
        Self {
            valid: true,
            distance_cm,
        }
    }
}

/// Conversion and plausibility limits for echo timings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangingParams {
    pub speed_of_sound_cm_per_s: f32,
    pub max_cm: f32,
}

impl RangingParams {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            speed_of_sound_cm_per_s: config.speed_of_sound_cm_per_s,
            max_cm: config.range_max_cm,
        }
    }

    /// Half the round trip, in centimetres.
    pub fn echo_to_cm(&self, echo_us: u64) -> f32 {
        (echo_us as f32 / 1_000_000.0) * self.speed_of_sound_cm_per_s / 2.0
    }

    /// Accept only distances in `(0, max]`.
    pub fn check(&self, distance_cm: f32) -> Result<f32, SensorError> {
        if distance_cm <= 0.0 || distance_cm > self.max_cm {
            return Err(SensorError::OutOfRange);
        }
        Ok(distance_cm)
    }
}

pub struct UltrasonicSensor<T, E, C, D> {
    trigger: T,
    echo: E,
    clock: C,
    delay: D,
    params: RangingParams,
}

impl<T, E, C, D> UltrasonicSensor<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: Clock,
    D: DelayNs,
{
    pub fn new(trigger: T, echo: E, clock: C, delay: D, params: RangingParams) -> Self {
        Self {
            trigger,
            echo,
            clock,
            delay,
            params,
        }
    }

    fn try_measure(&mut self, timeout_us: u32) -> Result<f32, SensorError> {
        self.trigger
            .set_high()
            .map_err(|_| SensorError::TriggerFailed)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger
            .set_low()
            .map_err(|_| SensorError::TriggerFailed)?;

        let rise_us = self.wait_for_echo(true, timeout_us)?;
        let fall_us = self.wait_for_echo(false, timeout_us)?;

        let distance = self.params.echo_to_cm(fall_us.saturating_sub(rise_us));
        self.params.check(distance)
    }

    /// Poll the echo line until it reads `high`, returning the time it was
    /// first observed at that level.
    fn wait_for_echo(&mut self, high: bool, timeout_us: u32) -> Result<u64, SensorError> {
        let started = self.clock.now_us();
        loop {
            let level = self
                .echo
                .is_high()
                .map_err(|_| SensorError::GpioReadFailed)?;
            let now = self.clock.now_us();
            if level == high {
                return Ok(now);
            }
            if now.saturating_sub(started) > u64::from(timeout_us) {
                return Err(SensorError::Timeout);
            }
        }
    }
}

impl<T, E, C, D> RangeSensor for UltrasonicSensor<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: Clock,
    D: DelayNs,
{
    fn measure_once(&mut self, timeout_us: u32) -> RangeSample {
        match self.try_measure(timeout_us) {
            Ok(distance_cm) => RangeSample::valid(distance_cm),
            Err(e) => {
                debug!("ranging sample rejected: {}", e);
                // Leave the trigger idle for the next attempt.
                let _ = self.trigger.set_low();
                RangeSample::INVALID
            }
        }
    }
}
