//! Extension type tags and artifact path conventions
//!
//! Every extension kind compiles to its own file next to the schematic's
//! JSON. Both the compiler and the runtime derive paths through this module
//! so the two ends can never disagree on a file name.

use core::fmt;
use std::path::{Path, PathBuf};

use crate::tags::tag_enum;

/// File extension of compiled artifacts
pub const ARTIFACT_EXTENSION: &str = "merx";

/// Subdirectory holding audio side-cars, relative to the schematic directory
pub const ASSETS_DIR: &str = "MERX_Assets";

/// File extension of encoded audio side-cars
pub const AUDIO_EXTENSION: &str = "audio";

tag_enum! {
    /// Kind of schematic extension
    pub enum ExtensionType ("extension type") {
        Damageable = 0,
    }
}

impl ExtensionType {
    /// Every known extension type
    pub const ALL: [ExtensionType; 1] = [ExtensionType::Damageable];

    /// Display name, also used in artifact file names
    pub const fn name(self) -> &'static str {
        match self {
            Self::Damageable => "Damageable",
        }
    }

    /// Artifact file name for a schematic, e.g. `Door-Damageables.merx`
    pub fn artifact_file_name(self, schematic_name: &str) -> String {
        format!("{}-{}s.{}", schematic_name, self.name(), ARTIFACT_EXTENSION)
    }

    /// Artifact path inside a schematic's own directory
    pub fn artifact_path(self, schematic_dir: &Path, schematic_name: &str) -> PathBuf {
        schematic_dir.join(self.artifact_file_name(schematic_name))
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Directory of a schematic under an export root
pub fn schematic_dir(export_root: &Path, schematic_name: &str) -> PathBuf {
    export_root.join(schematic_name)
}

/// Directory holding a schematic's audio side-cars
pub fn assets_dir(schematic_dir: &Path) -> PathBuf {
    schematic_dir.join(ASSETS_DIR)
}

/// Path of one encoded audio clip
pub fn audio_sidecar_path(schematic_dir: &Path, clip_name: &str) -> PathBuf {
    assets_dir(schematic_dir).join(format!("{}.{}", clip_name, AUDIO_EXTENSION))
}
