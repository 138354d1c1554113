//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                 | Connects to               |
//! |------------|----------------------------|---------------------------|
//! | `hardware` | SensorPort, ActuatorPort   | GPIO drivers + sensors    |
//! | `display`  | DisplayPort                | Serial log (16×2 layout)  |
//! | `log_sink` | EventSink                  | Serial log output         |
//! | `time`     | Clock                      | ESP32 high-res timer      |
//! | `camera`   | FramePort                  | (no camera fitted)        |

pub mod camera;
pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
