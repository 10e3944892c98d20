//! TOML-based application configuration.
//!
//! Stores:
//! - Suggestion caps (generic list, singers, instrumentalists)
//! - Optional database path override
//!
//! Configuration is stored at `~/.config/escala/config.toml`. A missing
//! file yields defaults; every field has a per-field default so partial
//! files stay valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::suggest::SuggestionCaps;

/// Suggestion-cap configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionConfig {
    #[serde(default = "default_generic_cap")]
    pub generic_cap: usize,
    #[serde(default = "default_singers_cap")]
    pub singers_cap: usize,
    #[serde(default = "default_instrumentalists_cap")]
    pub instrumentalists_cap: usize,
}

/// Database configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Override for the SQLite file path.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub suggestion: SuggestionConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

fn default_generic_cap() -> usize {
    8
}

fn default_singers_cap() -> usize {
    4
}

fn default_instrumentalists_cap() -> usize {
    6
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            generic_cap: default_generic_cap(),
            singers_cap: default_singers_cap(),
            instrumentalists_cap: default_instrumentalists_cap(),
        }
    }
}

impl Config {
    fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/escala"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Suggestion caps derived from configuration.
    pub fn caps(&self) -> SuggestionCaps {
        SuggestionCaps {
            generic: self.suggestion.generic_cap,
            singers: self.suggestion.singers_cap,
            instrumentalists: self.suggestion.instrumentalists_cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_caps() {
        let caps = Config::default().caps();
        assert_eq!(caps.generic, 8);
        assert_eq!(caps.singers, 4);
        assert_eq!(caps.instrumentalists, 6);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str("[suggestion]\nsingers_cap = 5\n").unwrap();
        assert_eq!(config.suggestion.singers_cap, 5);
        assert_eq!(config.suggestion.generic_cap, 8);
        assert_eq!(config.suggestion.instrumentalists_cap, 6);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.suggestion.generic_cap = 10;
        config.database.path = Some(dir.path().join("escala.db"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }
}
