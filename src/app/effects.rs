//! Fire-and-forget actuator helpers.
//!
//! Actuator failures never abort a sequence: each command is attempted,
//! a failure is logged, and the caller carries on with the next step.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::drivers::status_led::IndicatorColor;
use crate::error::ActuatorError;

use super::ports::ActuatorPort;

/// Log and drop an actuator error.
pub fn best_effort(what: &str, result: Result<(), ActuatorError>) {
    if let Err(e) = result {
        warn!("{} failed: {}", what, e);
    }
}

/// Sound the buzzer for `ms`, blocking.
pub fn beep(hw: &mut impl ActuatorPort, delay: &mut impl DelayNs, ms: u32) {
    best_effort("buzzer on", hw.set_buzzer(true));
    delay.delay_ms(ms);
    best_effort("buzzer off", hw.set_buzzer(false));
}

/// Blink the indicator `count` times, `ms` on and `ms` off. Leaves it off.
pub fn flash(
    hw: &mut impl ActuatorPort,
    delay: &mut impl DelayNs,
    colour: IndicatorColor,
    count: u8,
    ms: u32,
) {
    for _ in 0..count {
        best_effort("indicator", hw.set_indicator(colour));
        delay.delay_ms(ms);
        best_effort("indicator", hw.set_indicator(IndicatorColor::Off));
        delay.delay_ms(ms);
    }
}
