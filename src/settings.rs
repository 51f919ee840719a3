//! Level settings
//!
//! Decoded from JSON by the host; every field falls back to its default.

use serde::{Deserialize, Serialize};

use crate::LevelError;
use crate::consts::{FINISH_DELAY, MAX_STEP};

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for coin phases
    pub seed: u64,
    /// Seconds between the level outcome and the level reporting finished
    pub finish_delay: f64,
    /// Longest sub-step `advance` simulates at once
    pub max_step: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            finish_delay: FINISH_DELAY,
            max_step: MAX_STEP,
        }
    }
}

impl Settings {
    /// Decode settings, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let settings: Self = serde_json::from_str(json)?;
        log::info!("Loaded settings (seed {})", settings.seed);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"seed": 42}"#).expect("valid settings");
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.finish_delay, FINISH_DELAY);
        assert_eq!(settings.max_step, MAX_STEP);

        let empty = Settings::from_json("{}").expect("valid settings");
        assert_eq!(empty, Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 9,
            finish_delay: 0.5,
            max_step: 0.02,
        };
        let json = settings.to_json().expect("serializable");
        assert_eq!(Settings::from_json(&json).expect("valid settings"), settings);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Settings::from_json(r#"{"seed": "abc"}"#),
            Err(LevelError::Json(_))
        ));
    }
}
