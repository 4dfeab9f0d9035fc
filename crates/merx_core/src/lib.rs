//! # merx_core - MERX Core
//!
//! Primitives shared by the authoring-side compiler and the runtime-side
//! decompiler:
//! - **Ids**: compile-time object ids and runtime handles
//! - **Tags**: one-byte enumerations of the host game (damage, role, item)
//! - **Format**: the positional `.merx` artifact encoding
//!
//! ## Format contract
//! Artifacts carry no magic number and no version. A reader must consume the
//! exact field sequence its paired writer produced; the presence of each
//! payload section is decided only by the death-type bits read before it.

pub mod codec;
pub mod damageable;
pub mod death;
pub mod error;
pub mod extension;
pub mod id;
pub mod tags;

pub use damageable::{dedup_in_order, DamageableData, HitboxEntry};
pub use death::{
    BroadcastMessage, BroadcastTarget, DeathFlag, DeathType, DynamicExecution, ExplosionProfile,
    ItemSpawn, SectionEntry, SoundCue,
};
pub use error::{FormatError, Result};
pub use extension::{
    assets_dir, audio_sidecar_path, schematic_dir, ExtensionType, ARTIFACT_EXTENSION, ASSETS_DIR,
    AUDIO_EXTENSION,
};
pub use id::{CompileTimeId, IdAllocator, ObjectHandle, PlayerId, SchematicInstanceId};
pub use tags::{DamageType, ItemType, RoleType};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::damageable::{DamageableData, HitboxEntry};
    pub use crate::death::{
        BroadcastMessage, BroadcastTarget, DeathFlag, DeathType, DynamicExecution,
        ExplosionProfile, ItemSpawn, SoundCue,
    };
    pub use crate::error::FormatError;
    pub use crate::extension::ExtensionType;
    pub use crate::id::{CompileTimeId, ObjectHandle, PlayerId, SchematicInstanceId};
    pub use crate::tags::{DamageType, ItemType, RoleType};
}
