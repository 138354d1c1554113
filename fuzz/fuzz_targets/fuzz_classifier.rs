//! Fuzz target: `PlantHealthClassifier::classify`
//!
//! The first two bytes give the frame width and height; the rest is the
//! pixel buffer, which usually disagrees with those dimensions.
//!
//! Invariants checked:
//! - No panics for any dimension / buffer combination
//! - `green_percent` is always within [0, 100]
//! - Inconsistent frames are never classified
//!
//! cargo fuzz run fuzz_classifier

#![no_main]

use libfuzzer_sys::fuzz_target;
use plantbot::config::SystemConfig;
use plantbot::vision::{Frame, PlantHealthClassifier};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let frame = Frame::new(data[0] as usize, data[1] as usize, data[2..].to_vec());
    let classifier = PlantHealthClassifier::from_config(&SystemConfig::default());
    let result = classifier.classify(Some(&frame));

    assert!((0.0..=100.0).contains(&result.green_percent));
    if !frame.is_consistent() || frame.pixel_count() == Some(0) {
        assert!(!result.classified);
    }
});
