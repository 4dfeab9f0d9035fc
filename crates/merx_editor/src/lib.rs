//! MERX Editor - Schematic Extension Compiler
//!
//! This crate is the authoring half of MERX. It validates extension
//! components attached to a schematic and compiles each one into a `.merx`
//! artifact next to the schematic's export.
//!
//! # Features
//!
//! - Authored hierarchy with deterministic pre-order object ids
//! - Damageable component with validation (dedup, collidable hitboxes)
//! - Delete-on-failure artifact writing
//! - Audio side-cars through a pluggable encoder
//! - Per-schematic extension manager with compile summaries
//!
//! # Example
//!
//! ```ignore
//! use merx_editor::prelude::*;
//!
//! let hierarchy = AuthoredHierarchy::new(
//!     AuthoredObject::empty("Door").with_child(AuthoredObject::primitive("Panel", true)),
//! );
//! let panel = hierarchy.id_of("Panel").unwrap();
//!
//! let manager = SchematicExtensionManager::new("Door", hierarchy)
//!     .with_config(ExportConfig::load("export.toml")?)
//!     .with_extension(DamageableSchematic::new(100).with_hitbox(HitboxOption::new(panel, 1.0)));
//!
//! let summary = manager.compile_all(None)?;
//! ```

pub mod audio;
pub mod compiler;
pub mod config;
pub mod damageable;
pub mod error;
pub mod hierarchy;
pub mod manager;

pub mod prelude {
    pub use crate::audio::{AudioClip, AudioEncoder, OpusApplication, OpusSettings, SidecarWriter};
    pub use crate::compiler::{
        prepare_output_dir, ArtifactFile, CompileContext, CompileOptions, SchematicExtension,
    };
    pub use crate::config::{default_export_root, ExportConfig};
    pub use crate::damageable::{DamageableSchematic, HitboxOption, SoundOption};
    pub use crate::error::{CompileError, ConfigError, ValidationIssue, ValidationReport};
    pub use crate::hierarchy::{AuthoredHierarchy, AuthoredObject, ObjectKind, WalkEntry};
    pub use crate::manager::{CompileSummary, SchematicExtensionManager};
}

pub use prelude::*;
