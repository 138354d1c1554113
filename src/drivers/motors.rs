//! Drive motor driver (L298N dual H-bridge, direction-only).
//!
//! Four logic inputs, two per motor. Both motors always receive the same
//! command; the robot only drives straight.
//!
//! | Motion   | IN1 | IN2 | IN3 | IN4 |
//! |----------|-----|-----|-----|-----|
//! | Stop     |  0  |  0  |  0  |  0  |
//! | Forward  |  1  |  0  |  1  |  0  |
//! | Backward |  0  |  1  |  0  |  1  |

use embedded_hal::digital::OutputPin;

use super::write_level;
use crate::app::effects::best_effort;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    #[default]
    Stop,
    Forward,
    Backward,
}

impl Motion {
    /// Logic levels for IN1..IN4.
    pub const fn levels(self) -> [bool; 4] {
        match self {
            Self::Stop => [false, false, false, false],
            Self::Forward => [true, false, true, false],
            Self::Backward => [false, true, false, true],
        }
    }
}

pub struct MotorDriver<P> {
    inputs: [P; 4],
    motion: Motion,
}

impl<P: OutputPin> MotorDriver<P> {
    /// Takes IN1..IN4 in order and drives them all LOW.
    pub fn new(in1: P, in2: P, in3: P, in4: P) -> Self {
        let mut driver = Self {
            inputs: [in1, in2, in3, in4],
            motion: Motion::Stop,
        };
        best_effort("motor safe level", driver.drive(Motion::Stop));
        driver
    }

    /// Apply `motion`. Every input is written even if an earlier one
    /// fails; the first failure is reported.
    pub fn drive(&mut self, motion: Motion) -> Result<(), ActuatorError> {
        let mut result = Ok(());
        for (pin, high) in self.inputs.iter_mut().zip(motion.levels()) {
            if let Err(e) = write_level(pin, high) {
                result = result.and(Err(e));
            }
        }
        self.motion = motion;
        result
    }

    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.drive(Motion::Stop)
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }
}
