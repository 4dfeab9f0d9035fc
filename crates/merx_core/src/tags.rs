//! One-byte type tags stored in artifacts
//!
//! Each tag enum maps to the host game's own enumeration. Decoding a byte
//! outside the known range is a [`crate::error::FormatError::InvalidTag`].

/// Declares a `#[repr(u8)]` enum with checked conversion from its tag byte
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident = $tag:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $tag,)+
        }

        impl $name {
            /// Name of this tag kind, used in decode errors
            pub const KIND: &'static str = $kind;

            /// The byte written to artifacts
            #[inline]
            pub const fn tag(self) -> u8 {
                self as u8
            }

            /// Convert a tag byte back into a variant
            pub fn from_tag(tag: u8) -> $crate::error::Result<Self> {
                match tag {
                    $($tag => Ok(Self::$variant),)+
                    _ => Err($crate::error::FormatError::InvalidTag { kind: $kind, tag }),
                }
            }
        }
    };
}

pub(crate) use tag_enum;

tag_enum! {
    /// Kind of damage delivered by the host's combat pipeline
    pub enum DamageType ("damage type") {
        Unknown = 0,
        Falldown = 1,
        Warhead = 2,
        Decontamination = 3,
        Asphyxiation = 4,
        Poison = 5,
        Bleeding = 6,
        Firearm = 7,
        MicroHid = 8,
        Tesla = 9,
        Scp = 10,
        Explosion = 11,
        Scp018 = 12,
        Scp207 = 13,
        Recontainment = 14,
        Crushed = 15,
        FemurBreaker = 16,
        PocketDimension = 17,
        FriendlyFireDetector = 18,
        SeveredHands = 19,
        Custom = 20,
        Scp049 = 21,
        Scp096 = 22,
        Scp173 = 23,
        Scp939 = 24,
        Scp0492 = 25,
        Scp106 = 26,
        Crossvec = 27,
        Logicer = 28,
        Revolver = 29,
        Shotgun = 30,
        AK = 31,
        Com15 = 32,
        Com18 = 33,
        Fsp9 = 34,
        E11Sr = 35,
        Hypothermia = 36,
        ParticleDisruptor = 37,
        CardiacArrest = 38,
        Com45 = 39,
        Jailbird = 40,
        Frmg0 = 41,
        A7 = 42,
        Scp3114 = 43,
        Strangled = 44,
        Marshmallow = 45,
    }
}

impl Default for DamageType {
    fn default() -> Self {
        Self::Unknown
    }
}

tag_enum! {
    /// Player role, written as the role's byte value (`None` is `-1` as a byte)
    pub enum RoleType ("role") {
        Scp173 = 0,
        ClassD = 1,
        Spectator = 2,
        Scp106 = 3,
        NtfSpecialist = 4,
        Scp049 = 5,
        Scientist = 6,
        Scp079 = 7,
        ChaosConscript = 8,
        Scp096 = 9,
        Scp0492 = 10,
        NtfSergeant = 11,
        NtfCaptain = 12,
        NtfPrivate = 13,
        Tutorial = 14,
        FacilityGuard = 15,
        Scp939 = 16,
        CustomRole = 17,
        ChaosRifleman = 18,
        ChaosMarauder = 19,
        ChaosRepressor = 20,
        Overwatch = 21,
        Filmmaker = 22,
        Scp3114 = 23,
        None = 255,
    }
}

tag_enum! {
    /// Item kinds that can be spawned as pickups
    pub enum ItemType ("item type") {
        KeycardJanitor = 0,
        KeycardScientist = 1,
        KeycardResearchCoordinator = 2,
        KeycardZoneManager = 3,
        KeycardGuard = 4,
        KeycardMtfPrivate = 5,
        KeycardContainmentEngineer = 6,
        KeycardMtfOperative = 7,
        KeycardMtfCaptain = 8,
        KeycardFacilityManager = 9,
        KeycardChaosInsurgency = 10,
        KeycardO5 = 11,
        Radio = 12,
        GunCom15 = 13,
        Medkit = 14,
        Flashlight = 15,
        MicroHid = 16,
        Scp500 = 17,
        Scp207 = 18,
        Ammo12Gauge = 19,
        GunE11Sr = 20,
        GunCrossvec = 21,
        Ammo556x45 = 22,
        GunFsp9 = 23,
        GunLogicer = 24,
        GrenadeHe = 25,
        GrenadeFlash = 26,
        Ammo44Cal = 27,
        Ammo762x39 = 28,
        Ammo9x19 = 29,
        GunCom18 = 30,
        Scp018 = 31,
        Scp268 = 32,
        Adrenaline = 33,
        Painkillers = 34,
        Coin = 35,
        ArmorLight = 36,
        ArmorCombat = 37,
        ArmorHeavy = 38,
        GunRevolver = 39,
        GunAk = 40,
        GunShotgun = 41,
        Scp330 = 42,
        Scp2176 = 43,
        Scp244a = 44,
        Scp244b = 45,
        Scp1853 = 46,
        ParticleDisruptor = 47,
        GunCom45 = 48,
        Scp1576 = 49,
        Jailbird = 50,
        AntiScp207 = 51,
        GunFrmg0 = 52,
        GunA7 = 53,
        Lantern = 54,
        None = 255,
    }
}
