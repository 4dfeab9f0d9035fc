//! # merx_runtime - Loading compiled schematic extensions
//!
//! The runtime half of MERX:
//! - Per-instance id resolution tables filled while the host instantiates
//! - Decompilers registered explicitly by extension type
//! - Activation of decoded artifacts onto live objects
//! - A plugin facade for the host's lifecycle hooks
//!
//! ## Example
//!
//! ```ignore
//! use merx_runtime::prelude::*;
//!
//! let plugin = MerxPlugin::new(PluginConfig::load("merx.toml")?);
//! plugin.on_enabled();
//!
//! // While the host instantiates the schematic
//! plugin.on_object_created(instance, id, object);
//!
//! // Once spawning is done
//! let results = plugin.on_schematic_spawned(&schematic, &mut host);
//! ```

pub mod activation;
pub mod config;
pub mod damageable;
pub mod decompiler;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod resolver;
pub mod world;

pub use activation::{activate, ActivationReport};
pub use config::PluginConfig;
pub use damageable::DamageableDecompiler;
pub use decompiler::{ActivationContext, DecompileStatus, Decompiler};
pub use error::{ActivationError, ConfigError, DecompileError};
pub use plugin::MerxPlugin;
pub use registry::{DecompilerBuilder, DecompilerRegistry};
pub use resolver::{IdResolutionTable, InstantiationObserver, ResolverRegistry};
pub use world::{SchematicHost, SchematicObjectInfo, SpawnedSchematic};

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::activation::ActivationReport;
    pub use crate::config::PluginConfig;
    pub use crate::decompiler::{ActivationContext, DecompileStatus, Decompiler};
    pub use crate::error::{ActivationError, DecompileError};
    pub use crate::plugin::MerxPlugin;
    pub use crate::registry::DecompilerRegistry;
    pub use crate::resolver::{IdResolutionTable, InstantiationObserver, ResolverRegistry};
    pub use crate::world::{SchematicHost, SchematicObjectInfo, SpawnedSchematic};
}
