//! Piezo buzzer driver (active HIGH, fixed tone).

use embedded_hal::digital::OutputPin;

use super::write_level;
use crate::app::effects::best_effort;
use crate::error::ActuatorError;

pub struct Buzzer<P> {
    pin: P,
    sounding: bool,
}

impl<P: OutputPin> Buzzer<P> {
    pub fn new(pin: P) -> Self {
        let mut buzzer = Self {
            pin,
            sounding: false,
        };
        best_effort("buzzer safe level", buzzer.set(false));
        buzzer
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let result = write_level(&mut self.pin, on);
        self.sounding = on && result.is_ok();
        result
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}
