//! Sensor subsystem: individual drivers and the value types they produce.
//!
//! | Driver        | Produces            | Hardware                      |
//! |---------------|---------------------|-------------------------------|
//! | `ultrasonic`  | [`RangeSample`]     | HC-SR04 trigger/echo pulse    |
//! | `filter`      | `Option<f32>` (cm)  | batches of ultrasonic samples |
//! | `flame`       | active / idle       | IR flame module, active-low   |
//! | `dht22`       | [`ClimateReading`]  | DHT22 single-wire             |
//!
//! Every driver reports failure as data (`None`, an invalid sample, or
//! an idle flame line); nothing here is allowed to stall the control loop.

pub mod dht22;
pub mod filter;
pub mod flame;
pub mod ultrasonic;

pub use ultrasonic::RangeSample;

/// One successful temperature / humidity read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub humidity_pct: f32,
    pub temperature_c: f32,
}
