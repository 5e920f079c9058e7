use std::{fs, path::Path};

use super::{Config, ConfigPaths};
use crate::core::{Result, ShowcueError};

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing config file is not an error: a fresh install runs on
    /// defaults until the operator writes one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// validated.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::config_file()?;
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from_path(&path)
    }

    /// Load and validate the configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from_path(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ShowcueError::toml_parse(e, Some(path)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed or validated.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| ShowcueError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }
}
