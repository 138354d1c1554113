//! Batch median filter over raw ultrasonic samples.
//!
//! Echo misfires (double echoes, multipath) produce wild single-sample
//! outliers. The median of the valid subset discards them as long as
//! fewer than half the samples in a batch are bad.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use log::warn;

use crate::app::ports::RangeSensor;
use crate::config::SystemConfig;

/// Capacity of the per-batch sample buffer.
pub const MAX_RANGE_SAMPLES: usize = 16;

/// Statistical median. Sorts `values` in place; even-length input
/// averages the two middle values. `None` for an empty slice.
pub fn median(values: &mut [f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(f32::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DistanceFilter {
    samples: usize,
    pause_ms: u32,
    timeout_us: u32,
}

impl DistanceFilter {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            samples: config.range_samples,
            pause_ms: config.range_sample_pause_ms,
            timeout_us: config.echo_timeout_us,
        }
    }

    /// Filtered distance using the configured batch size.
    pub fn get_distance(
        &self,
        ranger: &mut impl RangeSensor,
        delay: &mut impl DelayNs,
    ) -> Option<f32> {
        self.get_distance_with(ranger, delay, self.samples)
    }

    /// Take `sample_count` samples (capped at [`MAX_RANGE_SAMPLES`]) with a
    /// settle pause after each, and return the median of the valid ones.
    pub fn get_distance_with(
        &self,
        ranger: &mut impl RangeSensor,
        delay: &mut impl DelayNs,
        sample_count: usize,
    ) -> Option<f32> {
        if sample_count > MAX_RANGE_SAMPLES {
            warn!(
                "{} ranging samples requested, taking {}",
                sample_count, MAX_RANGE_SAMPLES
            );
        }
        let mut valid: Vec<f32, MAX_RANGE_SAMPLES> = Vec::new();
        for _ in 0..sample_count.min(MAX_RANGE_SAMPLES) {
            let sample = ranger.measure_once(self.timeout_us);
            if sample.valid {
                // Cannot overflow: the loop is bounded by the capacity.
                let _ = valid.push(sample.distance_cm);
            }
            delay.delay_ms(self.pause_ms);
        }
        median(&mut valid)
    }
}
