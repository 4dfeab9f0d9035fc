//! Plugin configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Runtime plugin settings, loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Whether the plugin reacts to spawned schematics at all
    pub is_enabled: bool,
    /// Log successful decompiles at `info` instead of `debug`
    pub debug: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            is_enabled: true,
            debug: false,
        }
    }
}

impl PluginConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Level successful decompiles are logged at
    pub fn success_level(&self) -> log::Level {
        if self.debug {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}
