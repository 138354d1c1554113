//! Disease-name lookup table.
//!
//! Maps a plant verdict key (`"healthy"`, `"sick"`) to the text shown on
//! the display. Parsed once at startup; missing keys fall back to a
//! generic string so a trimmed table never blanks the display.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Table shipped with the firmware.
const BUILTIN_TABLE: &str = include_str!("../assets/diseases.json");

pub const KEY_HEALTHY: &str = "healthy";
pub const KEY_SICK: &str = "sick";

const FALLBACK_HEALTHY: &str = "Plant healthy";
const FALLBACK_SICK: &str = "Plant sick - check!";
const FALLBACK_UNKNOWN: &str = "Plant status";

#[derive(Debug, Clone, Default)]
pub struct DiseaseLabels {
    names: BTreeMap<String, String>,
}

impl DiseaseLabels {
    /// Parse a JSON object of `key -> display string`.
    pub fn from_json(json: &str) -> Result<Self> {
        let names: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|_| Error::Config("disease table is not a string map"))?;
        Ok(Self { names })
    }

    /// The built-in table; an empty table if it fails to parse.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_TABLE).unwrap_or_else(|e| {
            log::warn!("Built-in disease table unusable ({}), using fallbacks", e);
            Self::default()
        })
    }

    /// Display string for `key`, or the generic fallback.
    pub fn label(&self, key: &str) -> &str {
        if let Some(name) = self.names.get(key) {
            return name;
        }
        match key {
            KEY_HEALTHY => FALLBACK_HEALTHY,
            KEY_SICK => FALLBACK_SICK,
            _ => FALLBACK_UNKNOWN,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
