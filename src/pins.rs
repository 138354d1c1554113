//! GPIO pin assignments for the PlantBot main board (ESP32-S3).
//!
//! Single source of truth: `main` builds every driver from these
//! numbers rather than hard-coding them.

// ---------------------------------------------------------------------------
// Drive motors (L298N dual H-bridge)
// ---------------------------------------------------------------------------

/// Left motor, forward leg.
pub const MOTOR_IN1_GPIO: i32 = 4;
/// Left motor, reverse leg.
pub const MOTOR_IN2_GPIO: i32 = 5;
/// Right motor, forward leg.
pub const MOTOR_IN3_GPIO: i32 = 6;
/// Right motor, reverse leg.
pub const MOTOR_IN4_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Fire suppression
// ---------------------------------------------------------------------------

/// Flame sensor digital output. LOW = flame seen.
pub const FLAME_GPIO: i32 = 15;
/// Water pump relay (active HIGH).
pub const PUMP_RELAY_GPIO: i32 = 16;
/// Piezo buzzer (active HIGH).
pub const BUZZER_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// HC-SR04 ultrasonic ranger
// ---------------------------------------------------------------------------

pub const ULTRASONIC_TRIG_GPIO: i32 = 18;
/// Echo is 5 V on the sensor side; routed through a divider.
pub const ULTRASONIC_ECHO_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// DHT22 temperature / humidity (open-drain single wire, external pull-up)
// ---------------------------------------------------------------------------

pub const DHT22_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Status LED (discrete RGB, HIGH lights)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Stop button (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Falling edge requests shutdown of the control loop.
pub const STOP_BUTTON_GPIO: i32 = 0;
