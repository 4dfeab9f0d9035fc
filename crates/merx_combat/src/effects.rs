//! Host side of death effects
//!
//! The state machine decides *which* effects fire and with what data; the
//! host game performs them through [`DeathEffects`].

use std::collections::HashMap;

use merx_core::{DynamicExecution, ExplosionProfile, ItemType, ObjectHandle, PlayerId, SoundCue};

/// World-space position
pub type Vec3 = [f32; 3];

/// Offset from the owning object at which pickups and explosives appear
pub const SPAWN_OFFSET: Vec3 = [0.0, 1.0, 0.0];

/// Add two positions
#[inline]
pub fn offset(position: Vec3, by: Vec3) -> Vec3 {
    [position[0] + by[0], position[1] + by[1], position[2] + by[2]]
}

/// Who a broadcast is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastRecipient {
    /// One player
    Player(PlayerId),
    /// Every connected player
    Everyone,
}

/// Item, explosive, broadcast, and object APIs of the host game.
///
/// Implementations must not lock the behavior that is calling them.
pub trait DeathEffects {
    /// Current position of a live object, `None` once it is gone
    fn object_position(&self, object: ObjectHandle) -> Option<Vec3>;

    /// Remove an object from the world
    fn destroy_object(&mut self, object: ObjectHandle);

    /// Show a broadcast
    fn broadcast(&mut self, recipient: BroadcastRecipient, duration: u16, message: &str);

    /// Spawn one pickup
    fn spawn_item(&mut self, item: ItemType, position: Vec3);

    /// Create and detonate an explosive
    fn detonate(&mut self, explosion: &ExplosionProfile, position: Vec3);

    /// Play a sound cue through the audio service
    fn play_sound(&mut self, sound: &SoundCue, position: Vec3) {
        let _ = (sound, position);
    }

    /// Run a script in the host's sandbox
    fn execute(&mut self, exec: &DynamicExecution, owner: ObjectHandle) {
        let _ = (exec, owner);
    }
}

/// An effect captured by [`EffectRecorder`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEffect {
    Destroyed(ObjectHandle),
    Broadcast {
        recipient: BroadcastRecipient,
        duration: u16,
        message: String,
    },
    ItemSpawned { item: ItemType, position: Vec3 },
    Detonated { explosion: ExplosionProfile, position: Vec3 },
    SoundPlayed { clip_name: String, position: Vec3 },
    Executed { code: String, owner: ObjectHandle },
}

/// Headless [`DeathEffects`] sink that records every effect in order.
///
/// Useful for dedicated simulation and for tests; destroyed objects stop
/// reporting a position.
#[derive(Debug, Default)]
pub struct EffectRecorder {
    positions: HashMap<ObjectHandle, Vec3>,
    effects: Vec<RecordedEffect>,
}

impl EffectRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an object in the recorded world
    pub fn with_object(mut self, object: ObjectHandle, position: Vec3) -> Self {
        self.positions.insert(object, position);
        self
    }

    /// Move or add an object
    pub fn set_position(&mut self, object: ObjectHandle, position: Vec3) {
        self.positions.insert(object, position);
    }

    /// Effects in the order they fired
    pub fn effects(&self) -> &[RecordedEffect] {
        &self.effects
    }

    /// Take and clear the recorded effects
    pub fn drain(&mut self) -> Vec<RecordedEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Number of pickups spawned for an item kind
    pub fn spawned(&self, item: ItemType) -> usize {
        self.effects
            .iter()
            .filter(|e| matches!(e, RecordedEffect::ItemSpawned { item: i, .. } if *i == item))
            .count()
    }

    /// Whether an object was destroyed
    pub fn was_destroyed(&self, object: ObjectHandle) -> bool {
        self.effects.contains(&RecordedEffect::Destroyed(object))
    }
}

impl DeathEffects for EffectRecorder {
    fn object_position(&self, object: ObjectHandle) -> Option<Vec3> {
        self.positions.get(&object).copied()
    }

    fn destroy_object(&mut self, object: ObjectHandle) {
        self.positions.remove(&object);
        self.effects.push(RecordedEffect::Destroyed(object));
    }

    fn broadcast(&mut self, recipient: BroadcastRecipient, duration: u16, message: &str) {
        self.effects.push(RecordedEffect::Broadcast {
            recipient,
            duration,
            message: message.to_string(),
        });
    }

    fn spawn_item(&mut self, item: ItemType, position: Vec3) {
        self.effects.push(RecordedEffect::ItemSpawned { item, position });
    }

    fn detonate(&mut self, explosion: &ExplosionProfile, position: Vec3) {
        self.effects.push(RecordedEffect::Detonated {
            explosion: *explosion,
            position,
        });
    }

    fn play_sound(&mut self, sound: &SoundCue, position: Vec3) {
        self.effects.push(RecordedEffect::SoundPlayed {
            clip_name: sound.clip_name.clone(),
            position,
        });
    }

    fn execute(&mut self, exec: &DynamicExecution, owner: ObjectHandle) {
        self.effects.push(RecordedEffect::Executed {
            code: exec.code.clone(),
            owner,
        });
    }
}
