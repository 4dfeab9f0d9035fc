//! Decompiler for the Damageable extension

use std::fs;
use std::io;

use merx_core::{DamageableData, ExtensionType};

use crate::activation::activate;
use crate::decompiler::{ActivationContext, DecompileStatus, Decompiler};
use crate::error::DecompileError;
use crate::world::SpawnedSchematic;

/// Reads `{name}-Damageables.merx` from the schematic's data directory
#[derive(Debug, Default, Clone, Copy)]
pub struct DamageableDecompiler;

impl DamageableDecompiler {
    pub fn new() -> Self {
        Self
    }

    /// Read and decode the artifact, if there is one
    pub fn read(&self, schematic: &SpawnedSchematic) -> Result<Option<DamageableData>, DecompileError> {
        let path = self
            .extension_type()
            .artifact_path(&schematic.data_dir, &schematic.name);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(DamageableData::from_bytes(&bytes)?))
    }
}

impl Decompiler for DamageableDecompiler {
    fn extension_type(&self) -> ExtensionType {
        ExtensionType::Damageable
    }

    fn decompile(
        &self,
        schematic: &SpawnedSchematic,
        ctx: &mut ActivationContext<'_>,
    ) -> Result<DecompileStatus, DecompileError> {
        let Some(data) = self.read(schematic)? else {
            return Ok(DecompileStatus::Missing);
        };

        let (_, report) = activate(schematic, &data, ctx.resolver, &mut *ctx.host)?;
        Ok(DecompileStatus::Activated(report))
    }
}
