//! Death behaviors: the flag set and the payload of each flag
//!
//! Payload sections carry no tag of their own. Which sections are present,
//! and in which order, follows entirely from the [`DeathType`] byte that
//! precedes them.

use core::ops::{BitOr, BitOrAssign};
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::codec::*;
use crate::error::{FormatError, Result};
use crate::tags::{tag_enum, ItemType};

/// One composable death effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathFlag {
    /// Remove the owning object
    Destroy,
    /// Send broadcast messages
    Broadcast,
    /// Spawn item pickups
    SpawnItem,
    /// Detonate explosions
    Explode,
    /// Play sound cues
    PlaySound,
    /// Run scripted code
    Dynamic,
}

impl DeathFlag {
    /// All flags in canonical order (execution order and section order)
    pub const ALL: [DeathFlag; 6] = [
        DeathFlag::Destroy,
        DeathFlag::Broadcast,
        DeathFlag::SpawnItem,
        DeathFlag::Explode,
        DeathFlag::PlaySound,
        DeathFlag::Dynamic,
    ];

    /// Bit of this flag in the death-type byte
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Destroy => 1 << 0,
            Self::Broadcast => 1 << 1,
            Self::SpawnItem => 1 << 2,
            Self::Explode => 1 << 3,
            Self::PlaySound => 1 << 4,
            Self::Dynamic => 1 << 5,
        }
    }
}

/// Set of death effects (bitflags-style)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<DeathFlag>", into = "Vec<DeathFlag>")]
#[repr(transparent)]
pub struct DeathType(u8);

impl DeathType {
    /// No effect
    pub const NONE: Self = Self(0);
    /// Remove the owning object
    pub const DESTROY: Self = Self(DeathFlag::Destroy.bit());
    /// Send broadcast messages
    pub const BROADCAST: Self = Self(DeathFlag::Broadcast.bit());
    /// Spawn item pickups
    pub const SPAWN_ITEM: Self = Self(DeathFlag::SpawnItem.bit());
    /// Detonate explosions
    pub const EXPLODE: Self = Self(DeathFlag::Explode.bit());
    /// Play sound cues
    pub const PLAY_SOUND: Self = Self(DeathFlag::PlaySound.bit());
    /// Run scripted code
    pub const DYNAMIC: Self = Self(DeathFlag::Dynamic.bit());

    const KNOWN_BITS: u8 = 0b0011_1111;

    /// Create empty flags
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw byte as written to artifacts
    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Parse a death-type byte, rejecting unknown bits
    pub fn from_bits(bits: u8) -> Result<Self> {
        if bits & !Self::KNOWN_BITS != 0 {
            return Err(FormatError::InvalidDeathType(bits));
        }
        Ok(Self(bits))
    }

    /// Check whether a flag is set
    #[inline]
    pub const fn has(&self, flag: DeathFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Check whether every flag of `other` is set
    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set a flag
    #[inline]
    pub fn insert(&mut self, flag: DeathFlag) {
        self.0 |= flag.bit();
    }

    /// Clear a flag
    #[inline]
    pub fn remove(&mut self, flag: DeathFlag) {
        self.0 &= !flag.bit();
    }

    /// Whether no flag is set
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Set flags in canonical order
    pub fn flags(self) -> impl Iterator<Item = DeathFlag> {
        DeathFlag::ALL.into_iter().filter(move |flag| self.has(*flag))
    }
}

impl BitOr for DeathType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DeathType {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<DeathFlag> for DeathType {
    fn from(flag: DeathFlag) -> Self {
        Self(flag.bit())
    }
}

impl From<Vec<DeathFlag>> for DeathType {
    fn from(flags: Vec<DeathFlag>) -> Self {
        flags.into_iter().fold(Self::empty(), |acc, flag| acc | flag.into())
    }
}

impl From<DeathType> for Vec<DeathFlag> {
    fn from(death_type: DeathType) -> Self {
        death_type.flags().collect()
    }
}

tag_enum! {
    /// Who receives a broadcast
    pub enum BroadcastTarget ("broadcast target") {
        /// Only the player who dealt the killing blow
        Attacker = 0,
        /// Every connected player
        ToAll = 1,
    }
}

/// One element of a repeated payload section
pub trait SectionEntry: Sized {
    /// Context used in decode errors
    const CONTEXT: &'static str;

    /// Write this entry
    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()>;

    /// Read one entry
    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self>;
}

/// Write a count-prefixed section
pub fn write_section<T: SectionEntry, W: Write + ?Sized>(w: &mut W, entries: &[T]) -> Result<()> {
    write_count(w, entries.len())?;
    for entry in entries {
        entry.encode(w)?;
    }
    Ok(())
}

/// Read a count-prefixed section
pub fn read_section<T: SectionEntry, R: Read + ?Sized>(r: &mut R) -> Result<Vec<T>> {
    let count = read_count(r, T::CONTEXT)?;
    // Capped preallocation; a corrupt count still fails at the first short read.
    let mut entries = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        entries.push(T::decode(r)?);
    }
    Ok(entries)
}

/// Broadcast sent on death
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastMessage {
    /// Text shown to the recipients
    pub message: String,
    /// Display time in seconds
    pub duration: u16,
    /// Recipients
    pub target: BroadcastTarget,
}

impl SectionEntry for BroadcastMessage {
    const CONTEXT: &'static str = "broadcast message";

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_string(w, &self.message)?;
        write_u16(w, self.duration)?;
        write_u8(w, self.target.tag())
    }

    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        Ok(Self {
            message: read_string(r, Self::CONTEXT)?,
            duration: read_u16(r, Self::CONTEXT)?,
            target: BroadcastTarget::from_tag(read_u8(r, Self::CONTEXT)?)?,
        })
    }
}

/// Pickups spawned on death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpawn {
    /// Item kind
    pub item: ItemType,
    /// Number of independent pickups
    pub amount: i32,
}

impl SectionEntry for ItemSpawn {
    const CONTEXT: &'static str = "item spawn";

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_u8(w, self.item.tag())?;
        write_i32(w, self.amount)
    }

    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        Ok(Self {
            item: ItemType::from_tag(read_u8(r, Self::CONTEXT)?)?,
            amount: read_i32(r, Self::CONTEXT)?,
        })
    }
}

/// Explosive detonated on death
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionProfile {
    pub max_radius: f32,
    pub scp_damage_multiplier: f32,
    pub burn_duration: f32,
    pub concussion_duration: f32,
    pub fuse_time: f32,
}

impl SectionEntry for ExplosionProfile {
    const CONTEXT: &'static str = "explosion";

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_f32(w, self.max_radius)?;
        write_f32(w, self.scp_damage_multiplier)?;
        write_f32(w, self.burn_duration)?;
        write_f32(w, self.concussion_duration)?;
        write_f32(w, self.fuse_time)
    }

    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        Ok(Self {
            max_radius: read_f32(r, Self::CONTEXT)?,
            scp_damage_multiplier: read_f32(r, Self::CONTEXT)?,
            burn_duration: read_f32(r, Self::CONTEXT)?,
            concussion_duration: read_f32(r, Self::CONTEXT)?,
            fuse_time: read_f32(r, Self::CONTEXT)?,
        })
    }
}

/// Sound played on death; the clip itself lives in an audio side-car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundCue {
    pub clip_name: String,
    pub volume: f32,
    pub is_spatial: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl SectionEntry for SoundCue {
    const CONTEXT: &'static str = "sound";

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_string(w, &self.clip_name)?;
        write_f32(w, self.volume)?;
        write_bool(w, self.is_spatial)?;
        write_f32(w, self.min_distance)?;
        write_f32(w, self.max_distance)
    }

    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        Ok(Self {
            clip_name: read_string(r, Self::CONTEXT)?,
            volume: read_f32(r, Self::CONTEXT)?,
            is_spatial: read_bool(r, Self::CONTEXT)?,
            min_distance: read_f32(r, Self::CONTEXT)?,
            max_distance: read_f32(r, Self::CONTEXT)?,
        })
    }
}

/// Script executed on death
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicExecution {
    pub code: String,
}

impl SectionEntry for DynamicExecution {
    const CONTEXT: &'static str = "dynamic execution";

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_string(w, &self.code)
    }

    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        Ok(Self {
            code: read_string(r, Self::CONTEXT)?,
        })
    }
}
