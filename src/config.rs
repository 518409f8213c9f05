//! Configuration file support
//!
//! Loads settings from ~/.pillar-mode.toml (or %USERPROFILE%\.pillar-mode.toml on Windows)
//!
//! Example:
//! ```toml
//! # pillar-mode configuration
//! executable = "/opt/pharo/pillar"
//! default-format = "latex"
//! highlighting = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::compile::Format;
use crate::error::{PillarError, Result};

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the external compiler
    pub executable: String,
    /// Format used when none is given
    pub default_format: Format,
    /// Whether highlighting starts enabled
    pub highlighting: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executable: "pillar".to_string(),
            default_format: Format::Html,
            highlighting: true,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".pillar-mode.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".pillar-mode.toml"))
        }
    }

    /// Load configuration from the default location
    ///
    /// Falls back to defaults when the file is missing or malformed.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Config::default();
        };

        match Self::from_toml_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring {}: {e}", path.display());
                Config::default()
            }
        }
    }

    /// Parse configuration text; unknown keys are ignored
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| PillarError::Config(e.message().to_string()))?;

        let mut config = Config::default();

        if let Some(value) = table.get("executable") {
            let executable = value
                .as_str()
                .ok_or_else(|| type_error("executable", "a string"))?;
            if executable.trim().is_empty() {
                return Err(PillarError::Config("executable is empty".to_string()));
            }
            config.executable = executable.to_string();
        }

        if let Some(value) = table.get("default-format") {
            let name = value
                .as_str()
                .ok_or_else(|| type_error("default-format", "a string"))?;
            config.default_format = Format::from_name(name)?;
        }

        if let Some(value) = table.get("highlighting") {
            config.highlighting = value
                .as_bool()
                .ok_or_else(|| type_error("highlighting", "a boolean"))?;
        }

        Ok(config)
    }
}

fn type_error(key: &str, expected: &str) -> PillarError {
    PillarError::Config(format!("{key} must be {expected}"))
}
