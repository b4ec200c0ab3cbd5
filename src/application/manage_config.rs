//! Config management use case

use crate::error::{PregtrackError, Result};
use crate::infrastructure::{Config, Home};

/// Service for reading and changing the configuration file
pub struct ConfigService {
    home: Home,
}

impl ConfigService {
    pub fn new(home: Home) -> Self {
        ConfigService { home }
    }

    /// Give the home back once configuration is done
    pub fn into_home(self) -> Home {
        self.home
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.home.load_config()?;

        match key {
            "language" => Ok(config.language),
            "cycle_length" => Ok(config.cycle_length.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(PregtrackError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: language, cycle_length, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.home.load_config()?;

        match key {
            "language" => {
                config.language = value.trim().to_lowercase();
            }
            "cycle_length" => {
                config.cycle_length = value.parse().map_err(|_| {
                    PregtrackError::Config(format!("Invalid cycle_length: {}", value))
                })?;
            }
            "created" => {
                return Err(PregtrackError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(PregtrackError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: language, cycle_length",
                    key
                )));
            }
        }

        self.home.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.home.load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ConfigService {
        let home = Home::new(temp.path().to_path_buf());
        home.initialize(&Config::default()).unwrap();
        ConfigService::new(home)
    }

    #[test]
    fn test_get_defaults() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        assert_eq!(service.get("language").unwrap(), "en");
        assert_eq!(service.get("cycle_length").unwrap(), "28");
        assert!(!service.get("created").unwrap().is_empty());
    }

    #[test]
    fn test_set_values() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.set("language", "ES").unwrap();
        service.set("cycle_length", "32").unwrap();

        let config = service.list().unwrap();
        assert_eq!(config.language, "es");
        assert_eq!(config.cycle_length, 32);
    }

    #[test]
    fn test_set_invalid_cycle_length() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.set("cycle_length", "abc").is_err());
        assert!(service.set("cycle_length", "90").is_err());
        assert_eq!(service.get("cycle_length").unwrap(), "28");
    }

    #[test]
    fn test_created_is_read_only() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        let err = service.set("created", "2020-01-01").unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_unknown_key() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        assert!(service.get("editor").is_err());
        assert!(service.set("editor", "vim").is_err());
    }
}
