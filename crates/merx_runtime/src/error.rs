//! Runtime errors

use merx_core::{FormatError, SchematicInstanceId};
use thiserror::Error;

/// Activation could not wire the behavior to live objects
#[derive(Debug, Error)]
pub enum ActivationError {
    /// Hitboxes were configured but the instance never recorded any objects
    #[error("No id resolution table for schematic instance {0:?}")]
    NoResolutionTable(SchematicInstanceId),
}

/// Failure of one extension on one schematic instance
#[derive(Debug, Error)]
pub enum DecompileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Format(#[from] FormatError),

    #[error("Activation error: {0}")]
    Activation(#[from] ActivationError),
}

/// Errors loading the plugin configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
