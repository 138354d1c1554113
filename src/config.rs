//! System configuration parameters
//!
//! Every threshold, band and duration the control loop uses, as named
//! fields. Policy code never inlines these numbers.

use serde::{Deserialize, Serialize};

use crate::sensors::filter::MAX_RANGE_SAMPLES;

/// Inclusive HSV band on the 8-bit scale (hue 0–179, saturation and value 0–255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvBand {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvBand {
    /// True if every channel of `hsv` lies inside the band.
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Climate ---
    /// Humidity (%) below which the low-humidity alert is raised
    pub humidity_low_pct: f32,
    /// Temperature rise (°C) over one tick that counts as a fire
    pub temp_rise_fire_c: f32,
    /// Minimum interval between physical DHT22 reads (milliseconds)
    pub climate_min_interval_ms: u32,

    // --- Ranging ---
    /// Readings above this distance (cm) are rejected
    pub range_max_cm: f32,
    /// Speed of sound used for echo conversion (cm/s)
    pub speed_of_sound_cm_per_s: f32,
    /// Per-edge echo wait timeout (microseconds)
    pub echo_timeout_us: u32,
    /// Raw samples per filtered distance
    pub range_samples: usize,
    /// Pause between raw samples (milliseconds)
    pub range_sample_pause_ms: u32,

    // --- Follow bands (cm) ---
    pub dist_danger_cm: f32,
    pub dist_close_low_cm: f32,
    pub dist_close_high_cm: f32,
    pub dist_ideal_low_cm: f32,
    pub dist_ideal_high_cm: f32,
    /// Inside the ideal band, beep while closer than this
    pub dist_ideal_beep_below_cm: f32,
    pub dist_too_far_cm: f32,

    // --- Flame ---
    /// Consecutive active samples required for a flame verdict
    pub flame_samples: u8,
    pub flame_sample_pause_ms: u32,
    /// Pause after a flame suppression before the loop continues
    pub flame_settle_ms: u32,

    // --- Plant health ---
    pub green_band: HsvBand,
    /// Green coverage (%) above which a plant is healthy
    pub green_healthy_pct: f32,
    /// Pause after a plant check before the loop continues
    pub plant_settle_ms: u32,

    // --- Actuator timings (milliseconds) ---
    pub pump_duration_ms: u32,
    pub buzzer_short_ms: u32,
    pub buzzer_long_ms: u32,
    pub buzzer_continuous_ms: u32,
    pub led_flash_count: u8,
    pub led_flash_ms: u32,

    // --- Timing ---
    /// Sleep between control loop iterations (milliseconds)
    pub loop_interval_ms: u32,
    /// Banner hold time at startup (milliseconds)
    pub startup_pause_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Climate
            humidity_low_pct: 40.0,
            temp_rise_fire_c: 10.0,
            climate_min_interval_ms: 2000, // DHT22 datasheet minimum

            // Ranging
            range_max_cm: 400.0,
            speed_of_sound_cm_per_s: 34_300.0,
            echo_timeout_us: 40_000,
            range_samples: 5,
            range_sample_pause_ms: 20,

            // Follow bands
            dist_danger_cm: 30.0,
            dist_close_low_cm: 30.0,
            dist_close_high_cm: 50.0,
            dist_ideal_low_cm: 50.0,
            dist_ideal_high_cm: 100.0,
            dist_ideal_beep_below_cm: 60.0,
            dist_too_far_cm: 150.0,

            // Flame
            flame_samples: 3,
            flame_sample_pause_ms: 50,
            flame_settle_ms: 500,

            // Plant health
            green_band: HsvBand {
                lower: [35, 50, 50],
                upper: [85, 255, 255],
            },
            green_healthy_pct: 50.0,
            plant_settle_ms: 1000,

            // Actuators
            pump_duration_ms: 3000,
            buzzer_short_ms: 500,
            buzzer_long_ms: 1000,
            buzzer_continuous_ms: 3000,
            led_flash_count: 3,
            led_flash_ms: 500,

            // Timing
            loop_interval_ms: 100,
            startup_pause_ms: 1000,
        }
    }
}

/// Errors from [`SystemConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

impl SystemConfig {
    /// Reject values that would make the policies inconsistent.
    /// Invalid ranges are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &'static str| -> Result<(), ConfigError> {
            Err(ConfigError::ValidationFailed(msg))
        };

        if self.range_samples == 0 || self.range_samples > MAX_RANGE_SAMPLES {
            return fail("range_samples must be 1..=MAX_RANGE_SAMPLES");
        }
        if !(self.range_max_cm > 0.0) {
            return fail("range_max_cm must be positive");
        }
        if self.speed_of_sound_cm_per_s <= 0.0 || self.echo_timeout_us == 0 {
            return fail("ranging timing must be positive");
        }
        if self.flame_samples == 0 {
            return fail("flame_samples must be at least 1");
        }
        let bands = [
            self.dist_danger_cm,
            self.dist_close_high_cm,
            self.dist_ideal_high_cm,
            self.dist_too_far_cm,
        ];
        if bands.windows(2).any(|w| w[0] > w[1]) {
            return fail("distance bands must be ordered danger <= close <= ideal <= too_far");
        }
        if self.dist_close_low_cm > self.dist_close_high_cm
            || self.dist_ideal_low_cm > self.dist_ideal_high_cm
        {
            return fail("distance band bounds are inverted");
        }
        if (0..3).any(|i| self.green_band.lower[i] > self.green_band.upper[i]) {
            return fail("green_band lower bound exceeds upper bound");
        }
        if !(0.0..=100.0).contains(&self.green_healthy_pct) {
            return fail("green_healthy_pct must be a percentage");
        }
        Ok(())
    }
}
