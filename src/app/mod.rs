//! Application core: domain orchestration, no direct hardware access.
//!
//! The control loop fuses sensor readings, runs the fire guard, the
//! plant check and the follow policy, and commands actuators. All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer testable without real peripherals.

pub mod effects;
pub mod events;
pub mod ports;
pub mod service;
pub mod shutdown;
