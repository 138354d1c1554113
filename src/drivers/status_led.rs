//! RGB status indicator driver.
//!
//! Three digital outputs drive discrete R/G/B LEDs (HIGH lights). The
//! colour palette is a closed enum with a total mapping to channel
//! states.

use embedded_hal::digital::OutputPin;

use super::write_level;
use crate::app::effects::best_effort;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorColor {
    #[default]
    Off,
    /// Fire alert.
    Red,
    /// Healthy plant.
    Green,
    /// Low humidity.
    Blue,
    /// Sick plant.
    Yellow,
}

impl IndicatorColor {
    /// (R, G, B) channel states.
    pub const fn channels(self) -> [bool; 3] {
        match self {
            Self::Off => [false, false, false],
            Self::Red => [true, false, false],
            Self::Green => [false, true, false],
            Self::Blue => [false, false, true],
            Self::Yellow => [true, true, false],
        }
    }
}

pub struct StatusLed<P> {
    channels: [P; 3],
    current: IndicatorColor,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(r: P, g: P, b: P) -> Self {
        let mut led = Self {
            channels: [r, g, b],
            current: IndicatorColor::Off,
        };
        best_effort("indicator safe level", led.set_colour(IndicatorColor::Off));
        led
    }

    pub fn set_colour(&mut self, colour: IndicatorColor) -> Result<(), ActuatorError> {
        let mut result = Ok(());
        for (pin, high) in self.channels.iter_mut().zip(colour.channels()) {
            if let Err(e) = write_level(pin, high) {
                result = result.and(Err(e));
            }
        }
        self.current = colour;
        result
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.set_colour(IndicatorColor::Off)
    }

    pub fn current_colour(&self) -> IndicatorColor {
        self.current
    }
}
