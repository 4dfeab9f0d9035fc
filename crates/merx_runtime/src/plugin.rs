//! Plugin facade wired into the host's lifecycle hooks

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use merx_core::{CompileTimeId, ExtensionType, ObjectHandle, SchematicInstanceId};

use crate::config::PluginConfig;
use crate::registry::DecompilerRegistry;
use crate::resolver::{InstantiationObserver, ResolverRegistry};
use crate::world::{SchematicHost, SpawnedSchematic};

/// Owns the resolver tables and the lazily built decompiler registry
pub struct MerxPlugin {
    config: PluginConfig,
    enabled: AtomicBool,
    registry: OnceLock<DecompilerRegistry>,
    build_registry: fn() -> DecompilerRegistry,
    resolver: Arc<ResolverRegistry>,
}

impl MerxPlugin {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            enabled: AtomicBool::new(false),
            registry: OnceLock::new(),
            build_registry: DecompilerRegistry::with_builtin,
            resolver: Arc::new(ResolverRegistry::new()),
        }
    }

    /// Replace the function that builds the decompiler registry on first use
    pub fn with_registry_builder(mut self, build: fn() -> DecompilerRegistry) -> Self {
        self.build_registry = build;
        self
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Decompiler registry, built on first call
    pub fn registry(&self) -> &DecompilerRegistry {
        self.registry.get_or_init(|| {
            let registry = (self.build_registry)();
            log::info!("Registered {} decompiler(s)", registry.len());
            registry
        })
    }

    /// Whether the registry has been built yet
    pub fn is_registry_built(&self) -> bool {
        self.registry.get().is_some()
    }

    /// Observer to hand to the host's instantiator
    pub fn resolver(&self) -> Arc<ResolverRegistry> {
        Arc::clone(&self.resolver)
    }

    /// Host enabled the plugin. Does nothing when the config disables it.
    pub fn on_enabled(&self) -> bool {
        if !self.config.is_enabled {
            log::info!("MERX is disabled by config");
            return false;
        }

        self.enabled.store(true, Ordering::Release);
        true
    }

    /// Host disabled the plugin; every resolution table is dropped
    pub fn on_disabled(&self) {
        self.enabled.store(false, Ordering::Release);
        self.resolver.clear();
    }

    /// The instantiator produced `object` for authored `id`
    pub fn on_object_created(&self, instance: SchematicInstanceId, id: CompileTimeId, object: ObjectHandle) {
        if self.is_enabled() {
            self.resolver.on_object_created(instance, id, object);
        }
    }

    /// A schematic finished spawning; run every decompiler against it
    pub fn on_schematic_spawned(
        &self,
        schematic: &SpawnedSchematic,
        host: &mut dyn SchematicHost,
    ) -> Vec<(ExtensionType, bool)> {
        if !self.is_enabled() {
            return Vec::new();
        }

        let results = self.registry().dispatch(schematic, &self.resolver, host);
        let level = self.config.success_level();
        for (tag, _) in results.iter().filter(|(_, success)| *success) {
            log::log!(level, "Decompiled {} for '{}'", tag, schematic.name);
        }
        results
    }

    /// A schematic was destroyed; its resolution table goes with it
    pub fn on_schematic_destroyed(&self, instance: SchematicInstanceId) {
        self.resolver.discard(instance);
    }
}

impl Default for MerxPlugin {
    fn default() -> Self {
        Self::new(PluginConfig::default())
    }
}
