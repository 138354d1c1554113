//! IR flame sensor module (digital output, active-low).
//!
//! The comparator on the module pulls its output LOW while it sees
//! flame-band infrared. Debouncing across several samples is the
//! caller's job (see [`FireGuard`](crate::safety::FireGuard)).

use embedded_hal::digital::InputPin;

use crate::error::SensorError;

pub struct FlameSensor<P> {
    pin: P,
}

impl<P: InputPin> FlameSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// `true` while the line is at its active (LOW) level.
    pub fn is_active(&mut self) -> Result<bool, SensorError> {
        self.pin.is_low().map_err(|_| SensorError::GpioReadFailed)
    }
}
