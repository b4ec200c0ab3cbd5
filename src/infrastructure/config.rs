//! Configuration management

use crate::domain::cycle::{is_valid_cycle_length, DEFAULT_CYCLE_LENGTH};
use crate::domain::content::FALLBACK_LANGUAGE;
use crate::error::{PregtrackError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Content language code (e.g. "en")
    #[serde(default = "default_language")]
    pub language: String,
    /// Expected cycle length in days
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,
    pub created: DateTime<Utc>,
}

fn default_language() -> String {
    FALLBACK_LANGUAGE.to_string()
}

fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH
}

impl Default for Config {
    fn default() -> Self {
        Config::new(default_language())
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new(language: impl Into<String>) -> Self {
        Config {
            language: language.into(),
            cycle_length: DEFAULT_CYCLE_LENGTH,
            created: Utc::now(),
        }
    }

    /// Load config from config.toml in the given home directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PregtrackError::NotInitialized(path.to_path_buf())
            } else {
                PregtrackError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| PregtrackError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to config.toml in the given home directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| PregtrackError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_cycle_length(self.cycle_length) {
            return Err(PregtrackError::Config(format!(
                "Invalid cycle_length: {}",
                self.cycle_length
            )));
        }
        if self.language.trim().is_empty() {
            return Err(PregtrackError::Config("language cannot be empty".to_string()));
        }
        Ok(())
    }
}
