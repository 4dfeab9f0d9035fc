//! Decompiler capability
//!
//! A decompiler reads one extension's artifact for a spawned schematic and
//! activates it. Decompilers are registered explicitly in a
//! [`DecompilerRegistry`](crate::registry::DecompilerRegistry), keyed by the
//! [`ExtensionType`] they report.

use merx_core::ExtensionType;

use crate::activation::ActivationReport;
use crate::error::DecompileError;
use crate::resolver::ResolverRegistry;
use crate::world::{SchematicHost, SpawnedSchematic};

/// Result of a decompile that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecompileStatus {
    /// The schematic has no artifact for this extension
    Missing,
    /// The artifact was read and activated
    Activated(ActivationReport),
}

impl DecompileStatus {
    pub fn is_activated(&self) -> bool {
        matches!(self, Self::Activated(_))
    }
}

/// Collaborators a decompiler activates against
pub struct ActivationContext<'a> {
    pub resolver: &'a ResolverRegistry,
    pub host: &'a mut dyn SchematicHost,
}

impl<'a> ActivationContext<'a> {
    pub fn new(resolver: &'a ResolverRegistry, host: &'a mut dyn SchematicHost) -> Self {
        Self { resolver, host }
    }
}

/// Reads and activates one extension type
pub trait Decompiler: Send + Sync {
    /// Registry key
    fn extension_type(&self) -> ExtensionType;

    /// Read this extension's artifact for `schematic` and activate it.
    ///
    /// Returns [`DecompileStatus::Missing`] without side effects when the
    /// artifact does not exist.
    fn decompile(
        &self,
        schematic: &SpawnedSchematic,
        ctx: &mut ActivationContext<'_>,
    ) -> Result<DecompileStatus, DecompileError>;
}
