//! Damage information delivered by the host's combat pipeline

use merx_core::{DamageType, PlayerId, RoleType};
use serde::{Deserialize, Serialize};

/// Player who dealt a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attacker {
    /// Player identity, used as a broadcast recipient
    pub player: PlayerId,
    /// Role at the time of the hit
    pub role: RoleType,
}

impl Attacker {
    /// Create a new attacker
    pub fn new(player: PlayerId, role: RoleType) -> Self {
        Self { player, role }
    }
}

/// Information about a damage instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageInfo {
    /// Raw damage amount, before any hitbox multiplier
    pub amount: f32,
    /// Type of damage
    pub damage_type: DamageType,
    /// Player that caused the damage (if any)
    pub attacker: Option<Attacker>,
    /// World position where damage was applied
    pub hit_point: Option<[f32; 3]>,
}

impl DamageInfo {
    /// Create new damage info
    pub fn new(amount: f32, damage_type: DamageType) -> Self {
        Self {
            amount,
            damage_type,
            attacker: None,
            hit_point: None,
        }
    }

    /// Set the attacker
    pub fn with_attacker(mut self, attacker: Attacker) -> Self {
        self.attacker = Some(attacker);
        self
    }

    /// Set the hit point
    pub fn with_hit_point(mut self, point: [f32; 3]) -> Self {
        self.hit_point = Some(point);
        self
    }

    /// Role of the attacker, if the hit came from a player
    pub fn attacker_role(&self) -> Option<RoleType> {
        self.attacker.map(|a| a.role)
    }
}

impl Default for DamageInfo {
    fn default() -> Self {
        Self::new(0.0, DamageType::Unknown)
    }
}
