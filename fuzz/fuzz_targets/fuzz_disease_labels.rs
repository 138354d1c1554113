//! Fuzz target: `DiseaseLabels::from_json`
//!
//! Invariants checked:
//! - No panics under any input string
//! - `label()` answers for the verdict keys whether the table parsed or not
//! - A rejected table falls back to the generic strings
//!
//! cargo fuzz run fuzz_disease_labels

#![no_main]

use libfuzzer_sys::fuzz_target;
use plantbot::labels::{DiseaseLabels, KEY_HEALTHY, KEY_SICK};

fuzz_target!(|json: &str| {
    match DiseaseLabels::from_json(json) {
        Ok(labels) => {
            for key in [KEY_HEALTHY, KEY_SICK] {
                let _ = labels.label(key);
            }
        }
        Err(_) => {
            let fallback = DiseaseLabels::default();
            assert!(!fallback.label(KEY_HEALTHY).is_empty());
            assert!(!fallback.label(KEY_SICK).is_empty());
        }
    }
});
