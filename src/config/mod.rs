use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    clock::{DriftRates, MAX_SANITY, START_HOUR},
    error::GameResult,
    input::ACTION_DEBOUNCE,
};

pub const CONFIG_ENV: &str = "PALE_HARBOR_CONFIG";
pub const SCRIPT_ENV: &str = "PALE_HARBOR_SCRIPT";

/// Tunables for one session. Every field has a default, so a config file
/// only needs the values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub start_hour: f64,
    pub start_sanity: f32,
    pub starting_inventory: Vec<String>,
    pub drift: DriftRates,
    pub action_debounce: f64,
    pub interaction_cooldown: f64,
    /// Longest frame the terminal loop will simulate in one step.
    pub max_frame_delta: f64,
    pub play_intro: bool,
    pub log_filter: String,
    pub log_file: String,
    pub world_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_hour: START_HOUR,
            start_sanity: MAX_SANITY,
            starting_inventory: vec!["Old Journal".to_string()],
            drift: DriftRates::default(),
            action_debounce: ACTION_DEBOUNCE,
            interaction_cooldown: 0.3,
            max_frame_delta: 0.1,
            play_intro: true,
            log_filter: "pale_harbor=info".to_string(),
            log_file: "pale_harbor.log".to_string(),
            world_seed: 0x5EA_F06,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Reads the file named by `PALE_HARBOR_CONFIG`, or falls back to defaults.
    pub fn from_env() -> GameResult<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config =
            GameConfig::from_json(r#"{ "start_hour": 2.0, "drift": { "night": 1.5 } }"#).unwrap();
        assert_eq!(config.start_hour, 2.0);
        assert_eq!(config.drift.night, 1.5);
        assert_eq!(config.drift.day, 0.1);
        assert_eq!(config.starting_inventory, vec!["Old Journal".to_string()]);
        assert!(config.play_intro);
    }

    #[test]
    fn test_bad_json_is_a_config_error() {
        let err = GameConfig::from_json("{ start_hour: }").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }
}
