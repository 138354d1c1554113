//! Water pump relay driver (active HIGH).
//!
//! ## Safety contract
//!
//! The pump only runs inside a suppression sequence, which always ends
//! with the relay released. This driver is a dumb actuator.

use embedded_hal::digital::OutputPin;

use super::write_level;
use crate::app::effects::best_effort;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Stopped,
    Running,
}

pub struct PumpDriver<P> {
    relay: P,
    state: PumpState,
}

impl<P: OutputPin> PumpDriver<P> {
    pub fn new(relay: P) -> Self {
        let mut pump = Self {
            relay,
            state: PumpState::Stopped,
        };
        best_effort("pump safe level", pump.stop());
        pump
    }

    pub fn start(&mut self) -> Result<(), ActuatorError> {
        write_level(&mut self.relay, true)?;
        self.state = PumpState::Running;
        Ok(())
    }

    /// The recorded state follows the command: a failed write still
    /// leaves the pump recorded as stopped, and the error is returned.
    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        let result = write_level(&mut self.relay, false);
        self.state = PumpState::Stopped;
        result
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PumpState::Running
    }
}
