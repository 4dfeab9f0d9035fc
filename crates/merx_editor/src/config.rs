//! Export configuration
//!
//! ```toml
//! export_path = "/srv/maps/compiled"
//! clean_output = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory name used when no usable export path is configured
pub const DEFAULT_EXPORT_DIR: &str = "MapEditorReborn_CompiledSchematics";

/// Where and how compiled schematics are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Export root; ignored if it does not exist
    pub export_path: Option<PathBuf>,
    /// Remove a stale schematic directory and archive before writing
    pub clean_output: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            export_path: None,
            clean_output: true,
        }
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the export root
    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = Some(path.into());
        self
    }

    /// Set whether stale output is removed first
    pub fn with_clean_output(mut self, clean: bool) -> Self {
        self.clean_output = clean;
        self
    }

    /// Parse from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolved export root.
    ///
    /// Falls back to [`default_export_root`] when the configured path is
    /// unset or missing.
    pub fn export_root(&self) -> PathBuf {
        match &self.export_path {
            Some(path) if path.is_dir() => path.clone(),
            Some(path) => {
                log::warn!(
                    "Export path {} does not exist, using default",
                    path.display()
                );
                default_export_root()
            }
            None => default_export_root(),
        }
    }
}

/// `<home>/MapEditorReborn_CompiledSchematics`, or under the working
/// directory when no home directory is known
pub fn default_export_root() -> PathBuf {
    let base = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(DEFAULT_EXPORT_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExportConfig::default());
        assert!(config.clean_output);
        assert!(config.export_root().ends_with(DEFAULT_EXPORT_DIR));
    }

    #[test]
    fn test_existing_export_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::new().with_export_path(dir.path());
        assert_eq!(config.export_root(), dir.path());
    }

    #[test]
    fn test_missing_export_path_falls_back() {
        let config = ExportConfig::from_toml_str(
            r#"
export_path = "/definitely/not/a/real/merx/dir"
clean_output = false
"#,
        )
        .unwrap();
        assert!(!config.clean_output);
        assert!(config.export_root().ends_with(DEFAULT_EXPORT_DIR));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.toml");
        std::fs::write(&path, "clean_output = false\n").unwrap();

        let config = ExportConfig::load(&path).unwrap();
        assert!(!config.clean_output);
        assert!(config.export_path.is_none());
    }
}
