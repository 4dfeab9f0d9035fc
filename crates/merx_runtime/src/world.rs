//! The host game's view of spawned schematics

use std::path::PathBuf;

use merx_combat::{Hitbox, SharedDamageable, Vec3};
use merx_core::{ObjectHandle, SchematicInstanceId};

/// A schematic the host has just finished spawning
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedSchematic {
    pub instance: SchematicInstanceId,
    pub name: String,
    /// Directory holding the schematic's JSON and compiled artifacts
    pub data_dir: PathBuf,
    /// Root object the extensions attach to
    pub root: ObjectHandle,
}

impl SpawnedSchematic {
    pub fn new(
        instance: SchematicInstanceId,
        name: impl Into<String>,
        data_dir: impl Into<PathBuf>,
        root: ObjectHandle,
    ) -> Self {
        Self {
            instance,
            name: name.into(),
            data_dir: data_dir.into(),
            root,
        }
    }
}

/// What the host knows about one live object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchematicObjectInfo {
    /// Whether the object is a primitive shape
    pub is_primitive: bool,
    /// Network identity, if the object is networked
    pub network_id: Option<u32>,
    pub position: Vec3,
}

impl SchematicObjectInfo {
    /// Networked primitive at a position
    pub fn primitive(network_id: u32, position: Vec3) -> Self {
        Self {
            is_primitive: true,
            network_id: Some(network_id),
            position,
        }
    }

    /// Whether a hitbox can live on this object
    pub fn accepts_hitbox(&self) -> bool {
        self.is_primitive && self.network_id.is_some()
    }
}

/// Object and component APIs of the host game used during activation
pub trait SchematicHost {
    /// Look up a live object
    fn object_info(&self, object: ObjectHandle) -> Option<SchematicObjectInfo>;

    /// Attach a damageable behavior to a root object
    fn attach_damageable(&mut self, root: ObjectHandle, behavior: SharedDamageable);

    /// Attach a hitbox to its object
    fn attach_hitbox(&mut self, hitbox: Hitbox);
}
