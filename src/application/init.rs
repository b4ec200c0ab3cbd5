//! Initialize data directory use case

use crate::error::Result;
use crate::infrastructure::{Config, Home};

/// Create the home directory with a default config in `language`
pub fn init(home: &Home, language: &str) -> Result<Config> {
    let config = Config::new(language.trim().to_lowercase());
    home.initialize(&config)?;

    tracing::info!(home = %home.root().display(), "initialized pregtrack home");
    Ok(config)
}
