//! Data directory discovery

use crate::error::{PregtrackError, Result};
use crate::infrastructure::config::{Config, CONFIG_FILE};
use std::fs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "PREGTRACK_HOME";

/// Directory holding config, stored settings and the reminder registry
#[derive(Debug, Clone)]
pub struct Home {
    pub root: PathBuf,
}

impl Home {
    pub fn new(root: PathBuf) -> Self {
        Home { root }
    }

    /// PREGTRACK_HOME if set, otherwise the platform data directory
    pub fn locate() -> Result<Self> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            return Ok(Home::new(PathBuf::from(root)));
        }

        dirs::data_dir()
            .map(|dir| Home::new(dir.join("pregtrack")))
            .ok_or_else(|| {
                PregtrackError::Config(format!(
                    "No data directory found for this platform. Set {} to choose one.",
                    HOME_ENV
                ))
            })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_initialized(&self) -> bool {
        self.root.join(CONFIG_FILE).is_file()
    }

    /// Create the directory and write a fresh config
    pub fn initialize(&self, config: &Config) -> Result<()> {
        if self.is_initialized() {
            return Err(PregtrackError::Config(format!(
                "Already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&self.root)?;
        config.save_to_dir(&self.root)
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_config() {
        let temp = TempDir::new().unwrap();
        let home = Home::new(temp.path().join("data"));

        assert!(!home.is_initialized());
        home.initialize(&Config::default()).unwrap();
        assert!(home.is_initialized());
        assert_eq!(home.load_config().unwrap().language, "en");
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let home = Home::new(temp.path().to_path_buf());

        home.initialize(&Config::default()).unwrap();
        assert!(matches!(
            home.initialize(&Config::default()),
            Err(PregtrackError::Config(_))
        ));
    }

    #[test]
    fn test_load_config_uninitialized() {
        let temp = TempDir::new().unwrap();
        let home = Home::new(temp.path().to_path_buf());
        assert!(matches!(
            home.load_config(),
            Err(PregtrackError::NotInitialized(_))
        ));
    }
}
