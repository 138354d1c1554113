//! Fuzz target: DHT22 `decode_frame`
//!
//! Invariants checked:
//! - No panics under any 5-byte frame
//! - Any accepted frame has a matching checksum
//! - Accepted readings lie inside the sensor's plausible range
//!
//! cargo fuzz run fuzz_dht22_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use plantbot::sensors::dht22::decode_frame;

fuzz_target!(|data: [u8; 5]| {
    if let Ok(r) = decode_frame(data) {
        let sum = data[..4].iter().fold(0u8, |a, b| a.wrapping_add(*b));
        assert_eq!(sum, data[4], "accepted frame with bad checksum");
        assert!((0.0..=100.0).contains(&r.humidity_pct));
        assert!((-40.0..=80.0).contains(&r.temperature_c));
    }
});
