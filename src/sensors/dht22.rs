//! DHT22 (AM2302) temperature / humidity driver.
//!
//! Single open-drain data line with an external pull-up. The host pulls
//! the line LOW for >1 ms to request a reading, then releases it; the
//! sensor answers with an 80 µs LOW / 80 µs HIGH preamble followed by
//! 40 bits. Every bit starts with ~50 µs LOW; the length of the HIGH
//! that follows encodes the value (~27 µs = 0, ~70 µs = 1).
//!
//! ```text
//!  byte 0..1  humidity × 10      (big-endian)
//!  byte 2..3  temperature × 10   (bit 15 = sign)
//!  byte 4     (b0 + b1 + b2 + b3) & 0xFF
//! ```
//!
//! The sensor cannot be sampled faster than once every 2 s; reads inside
//! that window return the cached reading.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::{ClimatePort, Clock};
use crate::error::SensorError;
use crate::sensors::ClimateReading;

const START_LOW_US: u32 = 1_100;
/// Upper bound for any single phase of the response.
const EDGE_TIMEOUT_US: u32 = 100;
/// HIGH phases longer than this decode as a `1`.
const BIT_ONE_THRESHOLD_US: u64 = 48;

const HUMIDITY_RANGE: (f32, f32) = (0.0, 100.0);
const TEMPERATURE_RANGE: (f32, f32) = (-40.0, 80.0);

/// Validate a raw 5-byte frame and convert it to engineering units.
pub fn decode_frame(frame: [u8; 5]) -> Result<ClimateReading, SensorError> {
    let sum = frame[..4]
        .iter()
        .fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let humidity_pct = f32::from(u16::from_be_bytes([frame[0], frame[1]])) / 10.0;
    let magnitude = f32::from(u16::from_be_bytes([frame[2] & 0x7F, frame[3]])) / 10.0;
    let temperature_c = if frame[2] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    if !(HUMIDITY_RANGE.0..=HUMIDITY_RANGE.1).contains(&humidity_pct)
        || !(TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(&temperature_c)
    {
        return Err(SensorError::OutOfRange);
    }

    Ok(ClimateReading {
        humidity_pct,
        temperature_c,
    })
}

pub struct Dht22<P, C, D> {
    pin: P,
    clock: C,
    delay: D,
    min_interval_us: u64,
    /// Last good reading and the time it was taken.
    cached: Option<(u64, ClimateReading)>,
}

impl<P, C, D> Dht22<P, C, D>
where
    P: InputPin + OutputPin,
    C: Clock,
    D: DelayNs,
{
    pub fn new(pin: P, clock: C, delay: D, min_interval_ms: u32) -> Self {
        Self {
            pin,
            clock,
            delay,
            min_interval_us: u64::from(min_interval_ms) * 1_000,
            cached: None,
        }
    }

    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        self.pin.set_low().map_err(|_| SensorError::TriggerFailed)?;
        self.delay.delay_us(START_LOW_US);
        self.pin.set_high().map_err(|_| SensorError::TriggerFailed)?;

        // Preamble: sensor pulls LOW, then HIGH, then LOW for the first bit.
        self.wait_for(false)?;
        self.wait_for(true)?;
        self.wait_for(false)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            let rise = self.wait_for(true)?;
            let fall = self.wait_for(false)?;
            let byte = &mut frame[bit / 8];
            *byte <<= 1;
            if fall.saturating_sub(rise) > BIT_ONE_THRESHOLD_US {
                *byte |= 1;
            }
        }
        Ok(frame)
    }

    /// Busy-wait until the line reads `high`; returns the time it did.
    fn wait_for(&mut self, high: bool) -> Result<u64, SensorError> {
        let started = self.clock.now_us();
        loop {
            let level = self
                .pin
                .is_high()
                .map_err(|_| SensorError::GpioReadFailed)?;
            let now = self.clock.now_us();
            if level == high {
                return Ok(now);
            }
            if now.saturating_sub(started) > u64::from(EDGE_TIMEOUT_US) {
                return Err(SensorError::Timeout);
            }
        }
    }
}

impl<P, C, D> ClimatePort for Dht22<P, C, D>
where
    P: InputPin + OutputPin,
    C: Clock,
    D: DelayNs,
{
    fn read(&mut self) -> Option<ClimateReading> {
        let now = self.clock.now_us();
        if let Some((taken_at, reading)) = self.cached {
            if now.saturating_sub(taken_at) < self.min_interval_us {
                return Some(reading);
            }
        }

        match self.read_frame().and_then(decode_frame) {
            Ok(reading) => {
                self.cached = Some((now, reading));
                Some(reading)
            }
            Err(e) => {
                warn!("DHT22 read failed: {}", e);
                None
            }
        }
    }
}
