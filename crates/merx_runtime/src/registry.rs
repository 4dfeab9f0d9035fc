//! Decompiler registry
//!
//! Maps each [`ExtensionType`] to the one decompiler that reads it. The set
//! of decompilers is an explicit list; a second registration for a tag that
//! is already taken is logged and dropped.

use std::collections::BTreeMap;

use merx_core::ExtensionType;

use crate::damageable::DamageableDecompiler;
use crate::decompiler::{ActivationContext, DecompileStatus, Decompiler};
use crate::resolver::ResolverRegistry;
use crate::world::{SchematicHost, SpawnedSchematic};

/// Registry of decompilers by extension type
pub struct DecompilerRegistry {
    decompilers: BTreeMap<ExtensionType, Box<dyn Decompiler>>,
}

impl DecompilerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            decompilers: BTreeMap::new(),
        }
    }

    /// Registry holding every decompiler this crate ships
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        DecompilerBuilder::new(&mut registry).add(DamageableDecompiler::new());
        registry
    }

    /// Register a decompiler.
    ///
    /// Returns `false` and keeps the existing entry when the tag is taken.
    pub fn register<D: Decompiler + 'static>(&mut self, decompiler: D) -> bool {
        self.register_boxed(Box::new(decompiler))
    }

    /// Register an already boxed decompiler
    pub fn register_boxed(&mut self, decompiler: Box<dyn Decompiler>) -> bool {
        let tag = decompiler.extension_type();
        if self.decompilers.contains_key(&tag) {
            log::warn!("Decompiler for {} is already registered, ignoring duplicate", tag);
            return false;
        }

        self.decompilers.insert(tag, decompiler);
        true
    }

    /// Get the decompiler for a tag
    pub fn get(&self, tag: ExtensionType) -> Option<&dyn Decompiler> {
        self.decompilers.get(&tag).map(|d| d.as_ref())
    }

    pub fn contains(&self, tag: ExtensionType) -> bool {
        self.decompilers.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.decompilers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decompilers.is_empty()
    }

    /// All registered tags
    pub fn extension_types(&self) -> impl Iterator<Item = ExtensionType> + '_ {
        self.decompilers.keys().copied()
    }

    /// Run every decompiler against a freshly spawned schematic.
    ///
    /// Each extension succeeds or fails on its own. A missing artifact
    /// counts as `false` and is not logged; errors are logged and also
    /// reported as `false`.
    pub fn dispatch(
        &self,
        schematic: &SpawnedSchematic,
        resolver: &ResolverRegistry,
        host: &mut dyn SchematicHost,
    ) -> Vec<(ExtensionType, bool)> {
        let mut results = Vec::with_capacity(self.decompilers.len());

        for (&tag, decompiler) in &self.decompilers {
            let mut ctx = ActivationContext::new(resolver, &mut *host);
            let success = match decompiler.decompile(schematic, &mut ctx) {
                Ok(DecompileStatus::Activated(report)) => {
                    if !report.is_complete() {
                        log::warn!(
                            "{} of '{}': {} unresolved and {} rejected hitboxes",
                            tag,
                            schematic.name,
                            report.unresolved.len(),
                            report.rejected.len()
                        );
                    }
                    true
                }
                Ok(DecompileStatus::Missing) => false,
                Err(e) => {
                    log::error!("Failed to decompile {} of '{}': {}", tag, schematic.name, e);
                    false
                }
            };
            results.push((tag, success));
        }

        results
    }
}

impl Default for DecompilerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for DecompilerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecompilerRegistry")
            .field("extension_types", &self.decompilers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for registering decompilers with a fluent API
pub struct DecompilerBuilder<'a> {
    registry: &'a mut DecompilerRegistry,
}

impl<'a> DecompilerBuilder<'a> {
    pub fn new(registry: &'a mut DecompilerRegistry) -> Self {
        Self { registry }
    }

    /// Register a decompiler
    pub fn add<D: Decompiler + 'static>(self, decompiler: D) -> Self {
        self.registry.register(decompiler);
        self
    }
}
