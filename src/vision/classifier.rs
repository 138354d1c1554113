//! Green-ratio plant health classifier.
//!
//! `green_percent = 100 × pixels_in_band / total_pixels`; the plant is
//! healthy when that exceeds the configured threshold. No capture, an
//! empty frame or a buffer that disagrees with its dimensions all give
//! an unclassified result instead of a verdict.

use log::debug;

use super::Frame;
use super::hsv::bgr_to_hsv;
use crate::config::{HsvBand, SystemConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthResult {
    pub classified: bool,
    pub healthy: bool,
    /// Always within `[0, 100]`.
    pub green_percent: f32,
}

impl HealthResult {
    pub const UNCLASSIFIED: Self = Self {
        classified: false,
        healthy: false,
        green_percent: 0.0,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct PlantHealthClassifier {
    band: HsvBand,
    healthy_above_pct: f32,
}

impl PlantHealthClassifier {
    pub fn new(band: HsvBand, healthy_above_pct: f32) -> Self {
        Self {
            band,
            healthy_above_pct,
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.green_band, config.green_healthy_pct)
    }

    /// `frame` is `None` when the capture failed upstream.
    pub fn classify(&self, frame: Option<&Frame>) -> HealthResult {
        let Some(frame) = frame else {
            return HealthResult::UNCLASSIFIED;
        };
        let total = match frame.pixel_count() {
            Some(n) if n > 0 && frame.is_consistent() => n,
            _ => {
                debug!(
                    "unusable frame {}x{} ({} bytes)",
                    frame.width,
                    frame.height,
                    frame.data.len()
                );
                return HealthResult::UNCLASSIFIED;
            }
        };

        let green = frame
            .pixels()
            .filter(|px| self.band.contains(bgr_to_hsv(*px)))
            .count();
        let green_percent = (100.0 * green as f64 / total as f64) as f32;

        HealthResult {
            classified: true,
            healthy: green_percent > self.healthy_above_pct,
            green_percent,
        }
    }
}
