//! The Damageable extension's artifact
//!
//! Layout, in order, with no header:
//!
//! ```text
//! i32  max_health
//! bool invincible
//! i32  hitbox count, then { i32 object_id, f32 multiplier }*
//! i32  ignored damage type count, then { u8 tag }*
//! i32  ignored role count, then { u8 tag }*
//! u8   death type bits
//! payload sections for each set bit, in canonical order
//! ```

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::codec::*;
use crate::death::*;
use crate::error::Result;
use crate::id::CompileTimeId;
use crate::tags::{DamageType, RoleType};

/// Hitbox reference as stored in the artifact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitboxEntry {
    /// Authored object that receives the hitbox capability
    pub object_id: CompileTimeId,
    /// Scale applied to incoming damage
    pub multiplier: f32,
}

impl SectionEntry for HitboxEntry {
    const CONTEXT: &'static str = "hitbox";

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_i32(w, self.object_id.raw())?;
        write_f32(w, self.multiplier)
    }

    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        Ok(Self {
            object_id: CompileTimeId::new(read_i32(r, Self::CONTEXT)?),
            multiplier: read_f32(r, Self::CONTEXT)?,
        })
    }
}

impl SectionEntry for DamageType {
    const CONTEXT: &'static str = "ignored damage type";

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_u8(w, self.tag())
    }

    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        DamageType::from_tag(read_u8(r, Self::CONTEXT)?)
    }
}

impl SectionEntry for RoleType {
    const CONTEXT: &'static str = "ignored role";

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_u8(w, self.tag())
    }

    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        RoleType::from_tag(read_u8(r, Self::CONTEXT)?)
    }
}

/// Fully parsed configuration of one Damageable extension.
///
/// Payload lists whose flag is not set in `death_type` are never written, and
/// decode to empty lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageableData {
    pub max_health: i32,
    pub invincible: bool,
    pub hitboxes: Vec<HitboxEntry>,
    pub ignored_damage_types: Vec<DamageType>,
    pub ignored_roles: Vec<RoleType>,
    pub death_type: DeathType,
    pub broadcast: Vec<BroadcastMessage>,
    pub spawn_items: Vec<ItemSpawn>,
    pub explosions: Vec<ExplosionProfile>,
    pub sounds: Vec<SoundCue>,
    pub dynamic: Vec<DynamicExecution>,
}

impl DamageableData {
    /// Write the artifact
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_i32(w, self.max_health)?;
        write_bool(w, self.invincible)?;
        write_section(w, &self.hitboxes)?;
        write_section(w, &self.ignored_damage_types)?;
        write_section(w, &self.ignored_roles)?;
        write_u8(w, self.death_type.bits())?;

        for flag in self.death_type.flags() {
            match flag {
                DeathFlag::Destroy => {}
                DeathFlag::Broadcast => write_section(w, &self.broadcast)?,
                DeathFlag::SpawnItem => write_section(w, &self.spawn_items)?,
                DeathFlag::Explode => write_section(w, &self.explosions)?,
                DeathFlag::PlaySound => write_section(w, &self.sounds)?,
                DeathFlag::Dynamic => write_section(w, &self.dynamic)?,
            }
        }
        Ok(())
    }

    /// Read an artifact produced by [`DamageableData::encode`]
    pub fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let mut data = Self {
            max_health: read_i32(r, "max health")?,
            invincible: read_bool(r, "invincible")?,
            hitboxes: read_section(r)?,
            ignored_damage_types: read_section(r)?,
            ignored_roles: read_section(r)?,
            death_type: DeathType::from_bits(read_u8(r, "death type")?)?,
            ..Self::default()
        };

        for flag in data.death_type.flags() {
            match flag {
                DeathFlag::Destroy => {}
                DeathFlag::Broadcast => data.broadcast = read_section(r)?,
                DeathFlag::SpawnItem => data.spawn_items = read_section(r)?,
                DeathFlag::Explode => data.explosions = read_section(r)?,
                DeathFlag::PlaySound => data.sounds = read_section(r)?,
                DeathFlag::Dynamic => data.dynamic = read_section(r)?,
            }
        }
        Ok(data)
    }

    /// Encode into a fresh buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Decode from a byte slice
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self> {
        Self::decode(&mut bytes)
    }
}

/// Remove duplicates while keeping first occurrences in order.
///
/// Returns the number of entries removed.
pub fn dedup_in_order<T: PartialEq + Copy>(list: &mut Vec<T>) -> usize {
    let before = list.len();
    let mut seen: Vec<T> = Vec::with_capacity(before);
    list.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(*item);
            true
        }
    });
    before - list.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use crate::tags::ItemType;

    fn full_config() -> DamageableData {
        DamageableData {
            max_health: 250,
            invincible: false,
            hitboxes: vec![
                HitboxEntry { object_id: CompileTimeId::new(3), multiplier: 1.0 },
                HitboxEntry { object_id: CompileTimeId::new(7), multiplier: 2.5 },
            ],
            ignored_damage_types: vec![DamageType::Poison, DamageType::Falldown],
            ignored_roles: vec![RoleType::Scp173, RoleType::None],
            death_type: DeathType::DESTROY
                | DeathType::BROADCAST
                | DeathType::SPAWN_ITEM
                | DeathType::EXPLODE
                | DeathType::PLAY_SOUND
                | DeathType::DYNAMIC,
            broadcast: vec![BroadcastMessage {
                message: "The generator is down".into(),
                duration: 4,
                target: BroadcastTarget::ToAll,
            }],
            spawn_items: vec![ItemSpawn { item: ItemType::Medkit, amount: 2 }],
            explosions: vec![ExplosionProfile {
                max_radius: 6.0,
                scp_damage_multiplier: 1.5,
                burn_duration: 2.0,
                concussion_duration: 1.0,
                fuse_time: 0.1,
            }],
            sounds: vec![SoundCue {
                clip_name: "crash".into(),
                volume: 0.8,
                is_spatial: true,
                min_distance: 1.0,
                max_distance: 20.0,
            }],
            dynamic: vec![DynamicExecution { code: "log('dead')".into() }],
        }
    }

    #[test]
    fn test_round_trip_all_sections() {
        let config = full_config();
        let bytes = config.to_bytes().unwrap();
        assert_eq!(DamageableData::from_bytes(&bytes).unwrap(), config);
    }

    #[test]
    fn test_round_trip_every_flag_subset() {
        let full = full_config();
        for bits in 0u8..64 {
            let death_type = DeathType::from_bits(bits).unwrap();
            let mut config = full.clone();
            config.death_type = death_type;
            if !death_type.has(DeathFlag::Broadcast) { config.broadcast.clear(); }
            if !death_type.has(DeathFlag::SpawnItem) { config.spawn_items.clear(); }
            if !death_type.has(DeathFlag::Explode) { config.explosions.clear(); }
            if !death_type.has(DeathFlag::PlaySound) { config.sounds.clear(); }
            if !death_type.has(DeathFlag::Dynamic) { config.dynamic.clear(); }

            let bytes = config.to_bytes().unwrap();
            let decoded = DamageableData::from_bytes(&bytes).unwrap();
            assert_eq!(decoded, config, "death bits {bits:#08b}");
        }
    }

    #[test]
    fn test_unset_sections_are_not_written() {
        let mut config = full_config();
        config.death_type = DeathType::DESTROY;
        let bytes = config.to_bytes().unwrap();

        let decoded = DamageableData::from_bytes(&bytes).unwrap();
        assert!(decoded.broadcast.is_empty());
        assert!(decoded.spawn_items.is_empty());
        assert!(decoded.dynamic.is_empty());

        // 4 + 1 + (4 + 2*8) + (4 + 2) + (4 + 2) + 1
        assert_eq!(bytes.len(), 38);
    }

    #[test]
    fn test_no_hitboxes_is_readable() {
        let config = DamageableData {
            max_health: 100,
            death_type: DeathType::DESTROY,
            ..DamageableData::default()
        };
        let bytes = config.to_bytes().unwrap();
        assert_eq!(&bytes[5..9], &[0, 0, 0, 0]);
        assert_eq!(DamageableData::from_bytes(&bytes).unwrap(), config);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let config = full_config();
        assert_eq!(config.to_bytes().unwrap(), config.to_bytes().unwrap());
    }

    #[test]
    fn test_truncation_anywhere_is_an_error() {
        let bytes = full_config().to_bytes().unwrap();
        for len in 0..bytes.len() {
            let err = DamageableData::from_bytes(&bytes[..len]).unwrap_err();
            assert!(err.is_truncation(), "prefix of {len} bytes gave {err}");
        }
    }

    #[test]
    fn test_section_order_follows_bits() {
        let config = DamageableData {
            max_health: 1,
            death_type: DeathType::SPAWN_ITEM | DeathType::DYNAMIC,
            spawn_items: vec![ItemSpawn { item: ItemType::Coin, amount: 1 }],
            dynamic: vec![DynamicExecution { code: "x".into() }],
            ..DamageableData::default()
        };
        let bytes = config.to_bytes().unwrap();
        // header: 4 + 1 + 4 + 4 + 4 + 1 = 18
        assert_eq!(bytes[17], 0b0010_0100);
        // spawn item section comes first
        assert_eq!(&bytes[18..22], &[1, 0, 0, 0]);
        assert_eq!(bytes[22], ItemType::Coin.tag());
        // then dynamic
        assert_eq!(&bytes[27..31], &[1, 0, 0, 0]);
        assert_eq!(&bytes[31..], &[1, b'x']);
    }

    #[test]
    fn test_invalid_role_tag() {
        let mut bytes = full_config().to_bytes().unwrap();
        // first ignored role tag sits after: 4 + 1 + 4 + 16 + 4 + 2 + 4
        bytes[35] = 99;
        let err = DamageableData::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, FormatError::InvalidTag { kind: "role", tag: 99 }));
    }

    #[test]
    fn test_dedup_in_order() {
        let mut roles = vec![RoleType::ClassD, RoleType::Scientist, RoleType::ClassD, RoleType::ClassD];
        assert_eq!(dedup_in_order(&mut roles), 2);
        assert_eq!(roles, vec![RoleType::ClassD, RoleType::Scientist]);
    }
}
