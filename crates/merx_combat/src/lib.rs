//! MERX Combat - Damageable behavior, hitboxes, and death effects
//!
//! This crate holds the live side of the Damageable extension.
//!
//! # Features
//!
//! - Health pool with invincibility and ignored damage types / attacker roles
//! - Hitboxes that scale damage and route it into a shared pool
//! - Composable death effects (destroy, broadcast, spawn items, explode,
//!   play sound, dynamic code) performed through a host trait
//!
//! # Example
//!
//! ```ignore
//! use merx_combat::prelude::*;
//!
//! let behavior = DamageableBehavior::from_data(root, &data).into_shared();
//! let hitbox = Hitbox::new(object, behavior.clone(), 1.5, network_id);
//!
//! let hit = DamageInfo::new(25.0, DamageType::Firearm).with_attacker(attacker);
//! hitbox.damage(&hit, &mut host_effects);
//! ```

pub mod behavior;
pub mod damage;
pub mod effects;
pub mod hitbox;

pub mod prelude {
    pub use crate::behavior::{
        DamageOutcome, DamageableBehavior, DeathConfig, Rejection, SharedDamageable,
    };
    pub use crate::damage::{Attacker, DamageInfo};
    pub use crate::effects::{
        BroadcastRecipient, DeathEffects, EffectRecorder, RecordedEffect, Vec3, SPAWN_OFFSET,
    };
    pub use crate::hitbox::Hitbox;
    pub use merx_core::DamageType;
}

pub use prelude::*;
