//! Runtime damageable behavior and its death state machine

use std::sync::Arc;

use merx_core::{
    BroadcastMessage, BroadcastTarget, DamageType, DamageableData, DeathFlag, DeathType,
    DynamicExecution, ExplosionProfile, ItemSpawn, ObjectHandle, RoleType, SoundCue,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::damage::{Attacker, DamageInfo};
use crate::effects::{offset, BroadcastRecipient, DeathEffects, Vec3, SPAWN_OFFSET};

/// Behavior shared between its root object and every hitbox routing into it
pub type SharedDamageable = Arc<Mutex<DamageableBehavior>>;

/// Effects that run when health reaches zero, with their payloads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeathConfig {
    pub death_type: DeathType,
    pub broadcast: Vec<BroadcastMessage>,
    pub spawn_items: Vec<ItemSpawn>,
    pub explosions: Vec<ExplosionProfile>,
    pub sounds: Vec<SoundCue>,
    pub dynamic: Vec<DynamicExecution>,
}

impl DeathConfig {
    /// Copy the death part of a decoded artifact
    pub fn from_data(data: &DamageableData) -> Self {
        Self {
            death_type: data.death_type,
            broadcast: data.broadcast.clone(),
            spawn_items: data.spawn_items.clone(),
            explosions: data.explosions.clone(),
            sounds: data.sounds.clone(),
            dynamic: data.dynamic.clone(),
        }
    }
}

/// Why a hit had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Invincible,
    Dead,
    IgnoredDamageType(DamageType),
    IgnoredRole(RoleType),
}

/// Result of delivering damage
#[derive(Debug, Clone, PartialEq)]
pub enum DamageOutcome {
    /// The hit was absorbed without changing health
    NoEffect(Rejection),
    /// Health dropped but stayed above zero
    Damaged { dealt: f32, remaining: f32 },
    /// This hit killed the behavior; `fired` lists the effects in run order
    Killed { dealt: f32, fired: Vec<DeathFlag> },
}

impl DamageOutcome {
    /// Whether health changed
    pub fn had_effect(&self) -> bool {
        !matches!(self, Self::NoEffect(_))
    }

    /// Whether this hit was the killing blow
    pub fn is_kill(&self) -> bool {
        matches!(self, Self::Killed { .. })
    }
}

/// Health pool attached to a schematic's root object.
///
/// Alive while `health > 0`. The transition to dead is one-way and runs
/// every configured death effect exactly once.
#[derive(Debug, Clone)]
pub struct DamageableBehavior {
    owner: ObjectHandle,
    max_health: f32,
    health: f32,
    invincible: bool,
    ignored_damage_types: Vec<DamageType>,
    ignored_roles: Vec<RoleType>,
    death: DeathConfig,
    last_known_position: Vec3,
}

impl DamageableBehavior {
    /// Create a behavior at full health with no death effects
    pub fn new(owner: ObjectHandle, max_health: i32) -> Self {
        Self {
            owner,
            max_health: max_health as f32,
            health: max_health as f32,
            invincible: false,
            ignored_damage_types: Vec::new(),
            ignored_roles: Vec::new(),
            death: DeathConfig::default(),
            last_known_position: [0.0; 3],
        }
    }

    /// Build from a decoded artifact
    pub fn from_data(owner: ObjectHandle, data: &DamageableData) -> Self {
        Self::new(owner, data.max_health)
            .with_invincible(data.invincible)
            .with_ignored_damage_types(data.ignored_damage_types.iter().copied())
            .with_ignored_roles(data.ignored_roles.iter().copied())
            .with_death(DeathConfig::from_data(data))
    }

    /// Set invincibility
    pub fn with_invincible(mut self, invincible: bool) -> Self {
        self.invincible = invincible;
        self
    }

    /// Ignore damage of these types
    pub fn with_ignored_damage_types(mut self, types: impl IntoIterator<Item = DamageType>) -> Self {
        self.ignored_damage_types.extend(types);
        self
    }

    /// Ignore damage dealt by players of these roles
    pub fn with_ignored_roles(mut self, roles: impl IntoIterator<Item = RoleType>) -> Self {
        self.ignored_roles.extend(roles);
        self
    }

    /// Set the death effects
    pub fn with_death(mut self, death: DeathConfig) -> Self {
        self.death = death;
        self
    }

    /// Set the position used if the owner is already gone when it dies
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.last_known_position = position;
        self
    }

    /// Object this behavior is attached to
    pub fn owner(&self) -> ObjectHandle {
        self.owner
    }

    /// Current health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Configured maximum health
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Health as a fraction of max health (0.0 to 1.0)
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Whether health has reached zero
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Whether health is above zero
    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn death(&self) -> &DeathConfig {
        &self.death
    }

    pub fn ignored_damage_types(&self) -> &[DamageType] {
        &self.ignored_damage_types
    }

    pub fn ignored_roles(&self) -> &[RoleType] {
        &self.ignored_roles
    }

    /// Record where the owner currently is
    pub fn set_position(&mut self, position: Vec3) {
        self.last_known_position = position;
    }

    /// Check whether a hit would be absorbed, without changing state.
    ///
    /// The role filter only applies when the hit has an attacker.
    pub fn filter(&self, damage_type: DamageType, attacker_role: Option<RoleType>) -> Option<Rejection> {
        if self.invincible {
            return Some(Rejection::Invincible);
        }
        if self.is_dead() {
            return Some(Rejection::Dead);
        }
        if let Some(role) = attacker_role {
            if self.ignored_roles.contains(&role) {
                return Some(Rejection::IgnoredRole(role));
            }
        }
        if self.ignored_damage_types.contains(&damage_type) {
            return Some(Rejection::IgnoredDamageType(damage_type));
        }
        None
    }

    /// Deliver a hit through a hitbox with the given multiplier
    pub fn receive<E: DeathEffects + ?Sized>(
        &mut self,
        damage: &DamageInfo,
        multiplier: f32,
        effects: &mut E,
    ) -> DamageOutcome {
        if let Some(rejection) = self.filter(damage.damage_type, damage.attacker_role()) {
            return DamageOutcome::NoEffect(rejection);
        }
        self.apply_damage(damage.amount * multiplier, damage.attacker, effects)
    }

    /// Subtract health, running the death effects if this hit kills.
    ///
    /// Invincible or dead behaviors absorb the hit silently.
    pub fn apply_damage<E: DeathEffects + ?Sized>(
        &mut self,
        amount: f32,
        attacker: Option<Attacker>,
        effects: &mut E,
    ) -> DamageOutcome {
        if self.invincible {
            return DamageOutcome::NoEffect(Rejection::Invincible);
        }
        if self.is_dead() {
            return DamageOutcome::NoEffect(Rejection::Dead);
        }

        let before = self.health;
        self.health = (self.health - amount).max(0.0);
        let dealt = before - self.health;

        if self.is_alive() {
            return DamageOutcome::Damaged {
                dealt,
                remaining: self.health,
            };
        }

        let fired = self.run_death_effects(attacker, effects);
        log::debug!(
            "Damageable on {:?} died, fired {:?}",
            self.owner,
            fired
        );
        DamageOutcome::Killed { dealt, fired }
    }

    fn run_death_effects<E: DeathEffects + ?Sized>(
        &mut self,
        attacker: Option<Attacker>,
        effects: &mut E,
    ) -> Vec<DeathFlag> {
        // Captured before Destroy removes the owner.
        if let Some(position) = effects.object_position(self.owner) {
            self.last_known_position = position;
        }
        let position = self.last_known_position;
        let spawn_position = offset(position, SPAWN_OFFSET);

        let mut fired = Vec::new();
        for flag in self.death.death_type.flags() {
            match flag {
                DeathFlag::Destroy => effects.destroy_object(self.owner),
                DeathFlag::Broadcast => {
                    for msg in &self.death.broadcast {
                        let recipient = match (msg.target, attacker) {
                            (BroadcastTarget::ToAll, _) => BroadcastRecipient::Everyone,
                            (BroadcastTarget::Attacker, Some(attacker)) => {
                                BroadcastRecipient::Player(attacker.player)
                            }
                            (BroadcastTarget::Attacker, None) => continue,
                        };
                        effects.broadcast(recipient, msg.duration, &msg.message);
                    }
                }
                DeathFlag::SpawnItem => {
                    for spawn in &self.death.spawn_items {
                        for _ in 0..spawn.amount.max(0) {
                            effects.spawn_item(spawn.item, spawn_position);
                        }
                    }
                }
                DeathFlag::Explode => {
                    for explosion in &self.death.explosions {
                        effects.detonate(explosion, spawn_position);
                    }
                }
                DeathFlag::PlaySound => {
                    for sound in &self.death.sounds {
                        effects.play_sound(sound, position);
                    }
                }
                DeathFlag::Dynamic => {
                    for exec in &self.death.dynamic {
                        effects.execute(exec, self.owner);
                    }
                }
            }
            fired.push(flag);
        }
        fired
    }

    /// Wrap for sharing with hitboxes
    pub fn into_shared(self) -> SharedDamageable {
        Arc::new(Mutex::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectRecorder, RecordedEffect};
    use merx_core::{ItemType, PlayerId};

    const OWNER: ObjectHandle = ObjectHandle::new(7);

    fn recorder() -> EffectRecorder {
        EffectRecorder::new().with_object(OWNER, [10.0, 0.0, 5.0])
    }

    #[test]
    fn test_damage_and_death() {
        let mut fx = recorder();
        let mut behavior = DamageableBehavior::new(OWNER, 100);

        let outcome = behavior.apply_damage(30.0, None, &mut fx);
        assert_eq!(outcome, DamageOutcome::Damaged { dealt: 30.0, remaining: 70.0 });
        assert!((behavior.health_percent() - 0.7).abs() < 0.001);

        let outcome = behavior.apply_damage(100.0, None, &mut fx);
        assert!(outcome.is_kill());
        assert!(behavior.is_dead());
        assert_eq!(behavior.health(), 0.0);
    }

    #[test]
    fn test_destroy_and_spawn_items() {
        let mut fx = recorder();
        let death = DeathConfig {
            death_type: DeathType::DESTROY | DeathType::SPAWN_ITEM,
            spawn_items: vec![ItemSpawn { item: ItemType::Medkit, amount: 2 }],
            ..Default::default()
        };
        let mut behavior = DamageableBehavior::new(OWNER, 100).with_death(death);

        let outcome = behavior.apply_damage(150.0, None, &mut fx);
        assert_eq!(
            outcome,
            DamageOutcome::Killed {
                dealt: 100.0,
                fired: vec![DeathFlag::Destroy, DeathFlag::SpawnItem],
            }
        );
        assert!(fx.was_destroyed(OWNER));
        assert_eq!(fx.spawned(ItemType::Medkit), 2);

        // Position was captured before the owner was destroyed.
        assert!(fx.effects().contains(&RecordedEffect::ItemSpawned {
            item: ItemType::Medkit,
            position: [10.0, 1.0, 5.0],
        }));
    }

    #[test]
    fn test_attacker_broadcast_skipped_without_attacker() {
        let mut fx = recorder();
        let death = DeathConfig {
            death_type: DeathType::BROADCAST,
            broadcast: vec![BroadcastMessage {
                message: "You broke it".into(),
                duration: 3,
                target: BroadcastTarget::Attacker,
            }],
            ..Default::default()
        };
        let mut behavior = DamageableBehavior::new(OWNER, 10).with_death(death);

        let outcome = behavior.apply_damage(10.0, None, &mut fx);
        assert!(outcome.is_kill());
        assert!(fx.effects().is_empty());
    }

    #[test]
    fn test_broadcast_recipients() {
        let mut fx = recorder();
        let death = DeathConfig {
            death_type: DeathType::BROADCAST,
            broadcast: vec![
                BroadcastMessage {
                    message: "to you".into(),
                    duration: 3,
                    target: BroadcastTarget::Attacker,
                },
                BroadcastMessage {
                    message: "to all".into(),
                    duration: 5,
                    target: BroadcastTarget::ToAll,
                },
            ],
            ..Default::default()
        };
        let mut behavior = DamageableBehavior::new(OWNER, 10).with_death(death);
        let attacker = Attacker::new(PlayerId(4), RoleType::ClassD);

        behavior.apply_damage(20.0, Some(attacker), &mut fx);
        assert_eq!(
            fx.effects(),
            &[
                RecordedEffect::Broadcast {
                    recipient: BroadcastRecipient::Player(PlayerId(4)),
                    duration: 3,
                    message: "to you".into(),
                },
                RecordedEffect::Broadcast {
                    recipient: BroadcastRecipient::Everyone,
                    duration: 5,
                    message: "to all".into(),
                },
            ]
        );
    }

    #[test]
    fn test_ignored_damage_type() {
        let mut fx = recorder();
        let mut behavior =
            DamageableBehavior::new(OWNER, 100).with_ignored_damage_types([DamageType::Poison]);

        let hit = DamageInfo::new(1_000.0, DamageType::Poison);
        let outcome = behavior.receive(&hit, 1.0, &mut fx);
        assert_eq!(
            outcome,
            DamageOutcome::NoEffect(Rejection::IgnoredDamageType(DamageType::Poison))
        );
        assert_eq!(behavior.health(), 100.0);
    }

    #[test]
    fn test_ignored_role_needs_attacker() {
        let mut fx = recorder();
        let mut behavior =
            DamageableBehavior::new(OWNER, 100).with_ignored_roles([RoleType::Scp173]);

        let hit = DamageInfo::new(10.0, DamageType::Scp173)
            .with_attacker(Attacker::new(PlayerId(1), RoleType::Scp173));
        assert_eq!(
            behavior.receive(&hit, 1.0, &mut fx),
            DamageOutcome::NoEffect(Rejection::IgnoredRole(RoleType::Scp173))
        );

        let environmental = DamageInfo::new(10.0, DamageType::Scp173);
        assert!(behavior.receive(&environmental, 1.0, &mut fx).had_effect());
        assert_eq!(behavior.health(), 90.0);
    }

    #[test]
    fn test_invincible_absorbs_silently() {
        let mut fx = recorder();
        let mut behavior = DamageableBehavior::new(OWNER, 50).with_invincible(true);

        let outcome = behavior.apply_damage(500.0, None, &mut fx);
        assert_eq!(outcome, DamageOutcome::NoEffect(Rejection::Invincible));
        assert_eq!(behavior.health(), 50.0);
        assert!(fx.effects().is_empty());
    }

    #[test]
    fn test_death_effects_fire_once() {
        let mut fx = recorder();
        let death = DeathConfig {
            death_type: DeathType::DESTROY,
            ..Default::default()
        };
        let mut behavior = DamageableBehavior::new(OWNER, 10).with_death(death);

        behavior.apply_damage(10.0, None, &mut fx);
        let outcome = behavior.apply_damage(10.0, None, &mut fx);
        assert_eq!(outcome, DamageOutcome::NoEffect(Rejection::Dead));
        assert_eq!(fx.effects().len(), 1);
    }

    #[test]
    fn test_all_effects_in_order() {
        let mut fx = recorder();
        let death = DeathConfig {
            death_type: DeathType::from_bits(0b0011_1111).unwrap(),
            broadcast: vec![BroadcastMessage {
                message: "boom".into(),
                duration: 1,
                target: BroadcastTarget::ToAll,
            }],
            spawn_items: vec![ItemSpawn { item: ItemType::Coin, amount: 1 }],
            explosions: vec![ExplosionProfile {
                max_radius: 5.0,
                scp_damage_multiplier: 1.0,
                burn_duration: 0.0,
                concussion_duration: 0.0,
                fuse_time: 0.1,
            }],
            sounds: vec![SoundCue {
                clip_name: "crash".into(),
                volume: 1.0,
                is_spatial: true,
                min_distance: 1.0,
                max_distance: 20.0,
            }],
            dynamic: vec![DynamicExecution { code: "print('x')".into() }],
        };
        let mut behavior = DamageableBehavior::new(OWNER, 1).with_death(death);

        behavior.apply_damage(1.0, None, &mut fx);
        let kinds: Vec<_> = fx
            .effects()
            .iter()
            .map(|e| match e {
                RecordedEffect::Destroyed(_) => "destroy",
                RecordedEffect::Broadcast { .. } => "broadcast",
                RecordedEffect::ItemSpawned { .. } => "item",
                RecordedEffect::Detonated { .. } => "explode",
                RecordedEffect::SoundPlayed { .. } => "sound",
                RecordedEffect::Executed { .. } => "dynamic",
            })
            .collect();
        assert_eq!(kinds, ["destroy", "broadcast", "item", "explode", "sound", "dynamic"]);
    }

    #[test]
    fn test_negative_spawn_amount_spawns_nothing() {
        let mut fx = recorder();
        let death = DeathConfig {
            death_type: DeathType::SPAWN_ITEM,
            spawn_items: vec![ItemSpawn { item: ItemType::Radio, amount: -3 }],
            ..Default::default()
        };
        let mut behavior = DamageableBehavior::new(OWNER, 1).with_death(death);
        behavior.apply_damage(5.0, None, &mut fx);
        assert_eq!(fx.spawned(ItemType::Radio), 0);
    }
}
