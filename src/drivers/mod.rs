//! Actuator drivers.
//!
//! Each driver owns its `embedded-hal` output pins and tracks the level
//! it last commanded. Pin errors are collapsed into
//! [`ActuatorError::GpioWriteFailed`]; what to do about them is the
//! caller's decision.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;

pub mod buzzer;
pub mod motors;
pub mod pump;
pub mod status_led;

/// Drive `pin` HIGH or LOW.
pub(crate) fn write_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), ActuatorError> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| ActuatorError::GpioWriteFailed)
}
