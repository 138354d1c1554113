//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns every driver on the board through one [`Board`] and exposes it
//! through [`SensorPort`] and [`ActuatorPort`]. This is the only module
//! in the system that holds hardware handles.
//!
//! ## Release
//!
//! [`cleanup`](ActuatorPort::cleanup) drives every actuator to its safe
//! level and then drops the board, which releases the pins. It runs at
//! most once: later calls (and the one from `Drop`) find nothing to
//! release. After release, sensor reads come back empty and actuator
//! commands fail with [`ActuatorError::Released`].

use embedded_hal::digital::{InputPin, OutputPin};
use log::{debug, info, warn};

use crate::app::effects::best_effort;
use crate::app::ports::{ActuatorPort, ClimatePort, FramePort, RangeSensor, SensorPort};
use crate::control::Motion;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::motors::MotorDriver;
use crate::drivers::pump::PumpDriver;
use crate::drivers::status_led::{IndicatorColor, StatusLed};
use crate::error::ActuatorError;
use crate::sensors::flame::FlameSensor;
use crate::sensors::{ClimateReading, RangeSample};
use crate::vision::Frame;

/// Every driver on the board.
pub struct Board<O, I, R, C, F> {
    pub motors: MotorDriver<O>,
    pub pump: PumpDriver<O>,
    pub buzzer: Buzzer<O>,
    pub led: StatusLed<O>,
    pub flame: FlameSensor<I>,
    pub ranger: R,
    pub climate: C,
    pub camera: F,
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<O: OutputPin, I, R, C, F> {
    board: Option<Board<O, I, R, C, F>>,
}

impl<O: OutputPin, I, R, C, F> HardwareAdapter<O, I, R, C, F> {
    pub fn new(board: Board<O, I, R, C, F>) -> Self {
        Self { board: Some(board) }
    }

    pub fn is_released(&self) -> bool {
        self.board.is_none()
    }

    fn board(&mut self) -> Result<&mut Board<O, I, R, C, F>, ActuatorError> {
        self.board.as_mut().ok_or(ActuatorError::Released)
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<O, I, R, C, F> RangeSensor for HardwareAdapter<O, I, R, C, F>
where
    O: OutputPin,
    R: RangeSensor,
{
    fn measure_once(&mut self, timeout_us: u32) -> RangeSample {
        match self.board.as_mut() {
            Some(b) => b.ranger.measure_once(timeout_us),
            None => RangeSample::INVALID,
        }
    }
}

impl<O, I, R, C, F> SensorPort for HardwareAdapter<O, I, R, C, F>
where
    O: OutputPin,
    I: InputPin,
    R: RangeSensor,
    C: ClimatePort,
    F: FramePort,
{
    fn read_climate(&mut self) -> Option<ClimateReading> {
        self.board.as_mut()?.climate.read()
    }

    fn flame_active(&mut self) -> bool {
        let Some(board) = self.board.as_mut() else {
            return false;
        };
        board.flame.is_active().unwrap_or_else(|e| {
            warn!("flame sensor read failed: {}", e);
            false
        })
    }

    fn capture_frame(&mut self) -> Option<Frame> {
        self.board.as_mut()?.camera.capture()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<O: OutputPin, I, R, C, F> ActuatorPort for HardwareAdapter<O, I, R, C, F> {
    fn drive(&mut self, motion: Motion) -> Result<(), ActuatorError> {
        self.board()?.motors.drive(motion)
    }

    fn set_buzzer(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.board()?.buzzer.set(on)
    }

    fn set_pump(&mut self, on: bool) -> Result<(), ActuatorError> {
        let pump = &mut self.board()?.pump;
        if on { pump.start() } else { pump.stop() }
    }

    fn set_indicator(&mut self, colour: IndicatorColor) -> Result<(), ActuatorError> {
        self.board()?.led.set_colour(colour)
    }

    fn cleanup(&mut self) {
        let Some(mut board) = self.board.take() else {
            debug!("hardware already released");
            return;
        };
        best_effort("stop motors", board.motors.stop());
        best_effort("buzzer off", board.buzzer.set(false));
        best_effort("pump off", board.pump.stop());
        best_effort("indicator off", board.led.off());
        drop(board);
        info!("hardware released");
    }
}

impl<O: OutputPin, I, R, C, F> Drop for HardwareAdapter<O, I, R, C, F> {
    fn drop(&mut self) {
        self.cleanup();
    }
}
