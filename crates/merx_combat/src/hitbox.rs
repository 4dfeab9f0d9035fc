//! Hitbox capability routing damage into a shared behavior

use std::sync::Arc;

use merx_core::ObjectHandle;

use crate::behavior::{DamageOutcome, SharedDamageable};
use crate::damage::DamageInfo;
use crate::effects::{DeathEffects, Vec3};

/// Sub-object that forwards scaled damage to its owning behavior
#[derive(Debug, Clone)]
pub struct Hitbox {
    object: ObjectHandle,
    owner: SharedDamageable,
    multiplier: f32,
    network_id: u32,
    center_of_mass: Vec3,
}

impl Hitbox {
    /// Create a hitbox on `object` routing into `owner`
    pub fn new(object: ObjectHandle, owner: SharedDamageable, multiplier: f32, network_id: u32) -> Self {
        Self {
            object,
            owner,
            multiplier,
            network_id,
            center_of_mass: [0.0; 3],
        }
    }

    /// Set the hitbox object's position
    pub fn with_center_of_mass(mut self, position: Vec3) -> Self {
        self.center_of_mass = position;
        self
    }

    /// Route a hit into the owner, scaled by this hitbox's multiplier.
    ///
    /// Locks the owner for the duration of the call, including any death
    /// effects it runs.
    pub fn damage<E: DeathEffects + ?Sized>(&self, damage: &DamageInfo, effects: &mut E) -> DamageOutcome {
        self.owner.lock().receive(damage, self.multiplier, effects)
    }

    pub fn object(&self) -> ObjectHandle {
        self.object
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Network identity of the hitbox object
    pub fn network_id(&self) -> u32 {
        self.network_id
    }

    pub fn center_of_mass(&self) -> Vec3 {
        self.center_of_mass
    }

    /// Behavior this hitbox feeds
    pub fn owner(&self) -> &SharedDamageable {
        &self.owner
    }

    /// Whether this hitbox routes into the given behavior
    pub fn routes_to(&self, behavior: &SharedDamageable) -> bool {
        Arc::ptr_eq(&self.owner, behavior)
    }
}
