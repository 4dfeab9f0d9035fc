//! Damageable authoring component

use std::path::{Path, PathBuf};

use merx_core::{
    dedup_in_order, BroadcastMessage, CompileTimeId, DamageType, DamageableData, DeathFlag,
    DeathType, DynamicExecution, ExplosionProfile, ExtensionType, HitboxEntry, ItemSpawn,
    RoleType, SoundCue,
};
use serde::{Deserialize, Serialize};

use crate::audio::{AudioClip, SidecarWriter};
use crate::compiler::{ArtifactFile, CompileContext, SchematicExtension};
use crate::error::{CompileError, ValidationIssue, ValidationReport};
use crate::hierarchy::AuthoredHierarchy;

/// Hitbox as authored; `object` is `None` when the reference was lost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitboxOption {
    pub object: Option<CompileTimeId>,
    #[serde(default = "default_multiplier")]
    pub multiplier: f32,
}

fn default_multiplier() -> f32 {
    1.0
}

impl HitboxOption {
    pub fn new(object: CompileTimeId, multiplier: f32) -> Self {
        Self {
            object: Some(object),
            multiplier,
        }
    }

    /// A hitbox whose object was deleted after it was configured
    pub fn dangling(multiplier: f32) -> Self {
        Self {
            object: None,
            multiplier,
        }
    }
}

/// Sound as authored, with the clip data still attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundOption {
    pub clip: Option<AudioClip>,
    pub volume: f32,
    pub is_spatial: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl SoundOption {
    pub fn new(clip: AudioClip) -> Self {
        Self {
            clip: Some(clip),
            volume: 1.0,
            is_spatial: true,
            min_distance: 1.0,
            max_distance: 15.0,
        }
    }

    fn cue(&self, clip_name: &str) -> SoundCue {
        SoundCue {
            clip_name: clip_name.to_string(),
            volume: self.volume,
            is_spatial: self.is_spatial,
            min_distance: self.min_distance,
            max_distance: self.max_distance,
        }
    }
}

/// Damageable extension as configured by the author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageableSchematic {
    pub max_health: i32,
    pub invincible: bool,
    pub hitboxes: Vec<HitboxOption>,
    pub ignored_damage_types: Vec<DamageType>,
    pub ignored_roles: Vec<RoleType>,
    pub death_type: DeathType,
    pub broadcast: Vec<BroadcastMessage>,
    pub spawn_items: Vec<ItemSpawn>,
    pub explosions: Vec<ExplosionProfile>,
    pub sounds: Vec<SoundOption>,
    pub dynamic: Vec<DynamicExecution>,
}

impl Default for DamageableSchematic {
    fn default() -> Self {
        Self {
            max_health: 100,
            invincible: false,
            hitboxes: Vec::new(),
            ignored_damage_types: Vec::new(),
            ignored_roles: Vec::new(),
            death_type: DeathType::DESTROY,
            broadcast: Vec::new(),
            spawn_items: Vec::new(),
            explosions: Vec::new(),
            sounds: Vec::new(),
            dynamic: Vec::new(),
        }
    }
}

impl DamageableSchematic {
    pub fn new(max_health: i32) -> Self {
        Self {
            max_health,
            ..Self::default()
        }
    }

    pub fn with_invincible(mut self, invincible: bool) -> Self {
        self.invincible = invincible;
        self
    }

    pub fn with_hitbox(mut self, hitbox: HitboxOption) -> Self {
        self.hitboxes.push(hitbox);
        self
    }

    pub fn with_ignored_damage_type(mut self, damage_type: DamageType) -> Self {
        self.ignored_damage_types.push(damage_type);
        self
    }

    pub fn with_ignored_role(mut self, role: RoleType) -> Self {
        self.ignored_roles.push(role);
        self
    }

    pub fn with_death_type(mut self, death_type: DeathType) -> Self {
        self.death_type = death_type;
        self
    }

    pub fn with_broadcast(mut self, message: BroadcastMessage) -> Self {
        self.death_type.insert(DeathFlag::Broadcast);
        self.broadcast.push(message);
        self
    }

    pub fn with_spawn_item(mut self, spawn: ItemSpawn) -> Self {
        self.death_type.insert(DeathFlag::SpawnItem);
        self.spawn_items.push(spawn);
        self
    }

    pub fn with_explosion(mut self, explosion: ExplosionProfile) -> Self {
        self.death_type.insert(DeathFlag::Explode);
        self.explosions.push(explosion);
        self
    }

    pub fn with_sound(mut self, sound: SoundOption) -> Self {
        self.death_type.insert(DeathFlag::PlaySound);
        self.sounds.push(sound);
        self
    }

    pub fn with_dynamic(mut self, exec: DynamicExecution) -> Self {
        self.death_type.insert(DeathFlag::Dynamic);
        self.dynamic.push(exec);
        self
    }

    /// Fix up the configuration in place.
    ///
    /// Removes duplicate ignore entries and hitboxes on objects that are not
    /// collidable primitives. Hitboxes without an object, or with an id the
    /// hierarchy does not know, are left for [`Self::compile_to`] to reject.
    pub fn validate(&mut self, hierarchy: &AuthoredHierarchy) -> ValidationReport {
        let mut report = ValidationReport::new();

        // Report each duplicated value once, at its second occurrence.
        for (i, damage_type) in self.ignored_damage_types.iter().enumerate() {
            if self.ignored_damage_types[..i].iter().filter(|t| *t == damage_type).count() == 1 {
                report.push(ValidationIssue::DuplicateDamageType(*damage_type));
            }
        }
        for (i, role) in self.ignored_roles.iter().enumerate() {
            if self.ignored_roles[..i].iter().filter(|r| *r == role).count() == 1 {
                report.push(ValidationIssue::DuplicateRole(*role));
            }
        }
        dedup_in_order(&mut self.ignored_damage_types);
        dedup_in_order(&mut self.ignored_roles);

        let mut index = 0;
        self.hitboxes.retain(|hitbox| {
            let i = index;
            index += 1;
            match hitbox.object {
                Some(object) if hierarchy.is_collidable(object) == Some(false) => {
                    report.push(ValidationIssue::NonCollidableHitbox { index: i, object });
                    false
                }
                _ => true,
            }
        });

        report
    }

    /// Compile to an explicit artifact path.
    ///
    /// Audio side-cars are written next to `path`. On any error no artifact
    /// is left on disk.
    pub fn compile_to(&self, path: &Path, ctx: &mut CompileContext<'_>) -> Result<PathBuf, CompileError> {
        let mut config = self.clone();
        let report = config.validate(ctx.hierarchy);
        report.log(ctx.schematic_name);

        if config.hitboxes.is_empty() && !ctx.options.continue_without_hitboxes {
            log::info!("[{}] Compilation declined: no hitboxes", ctx.schematic_name);
            return Err(CompileError::Declined);
        }

        let mut file = ArtifactFile::create(path)?;
        let data = match config.resolve(path, ctx) {
            Ok(data) => data,
            Err(e) => {
                log::error!("[{}] Failed to compile Damageable: {}", ctx.schematic_name, e);
                return Err(e);
            }
        };
        data.encode(&mut file)?;
        let path = file.commit()?;

        if !ctx.options.suppress_logs {
            log::info!(
                "[{}] Compiled Damageable to {}",
                ctx.schematic_name,
                path.display()
            );
        }
        Ok(path)
    }

    /// Turn a validated configuration into artifact data, writing side-cars
    fn resolve(&self, path: &Path, ctx: &mut CompileContext<'_>) -> Result<DamageableData, CompileError> {
        let mut hitboxes = Vec::with_capacity(self.hitboxes.len());
        for (index, hitbox) in self.hitboxes.iter().enumerate() {
            let object = match hitbox.object {
                Some(object) if ctx.hierarchy.find(object).is_some() => object,
                _ => return Err(CompileError::MissingReference { index }),
            };
            hitboxes.push(HitboxEntry {
                object_id: object,
                multiplier: hitbox.multiplier,
            });
        }

        let mut data = DamageableData {
            max_health: self.max_health,
            invincible: self.invincible,
            hitboxes,
            ignored_damage_types: self.ignored_damage_types.clone(),
            ignored_roles: self.ignored_roles.clone(),
            death_type: self.death_type,
            ..DamageableData::default()
        };

        for flag in self.death_type.flags() {
            match flag {
                DeathFlag::Destroy => {}
                DeathFlag::Broadcast => data.broadcast = self.broadcast.clone(),
                DeathFlag::SpawnItem => data.spawn_items = self.spawn_items.clone(),
                DeathFlag::Explode => data.explosions = self.explosions.clone(),
                DeathFlag::PlaySound => data.sounds = self.encode_sounds(path, ctx)?,
                DeathFlag::Dynamic => data.dynamic = self.dynamic.clone(),
            }
        }
        Ok(data)
    }

    /// Cues for every clip that was actually encoded
    fn encode_sounds(&self, path: &Path, ctx: &mut CompileContext<'_>) -> Result<Vec<SoundCue>, CompileError> {
        let dir = path.parent().unwrap_or(&ctx.schematic_dir).to_path_buf();
        let mut sidecars = SidecarWriter::new(dir, ctx.encoder.as_deref_mut());

        let mut cues = Vec::new();
        for sound in &self.sounds {
            let Some(clip) = &sound.clip else {
                continue;
            };
            if sidecars.write(clip)?.is_some() {
                cues.push(sound.cue(&clip.name));
            }
        }
        Ok(cues)
    }
}

impl SchematicExtension for DamageableSchematic {
    fn extension_type(&self) -> ExtensionType {
        ExtensionType::Damageable
    }

    fn compile(&self, ctx: &mut CompileContext<'_>) -> Result<PathBuf, CompileError> {
        let path = ctx.artifact_path(self.extension_type());
        self.compile_to(&path, ctx)
    }
}
