//! Enumeration types used throughout the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default horizontal facing of a sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    /// Build from the tile property convention: positive faces right.
    pub fn from_sign(sign: f32) -> Self {
        if sign > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    }

    pub fn vector(self) -> Vec2 {
        match self {
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }
}

/// How a weapon's projectiles are placed and move after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpawnBehavior {
    /// Fly toward the nearest living enemy; skipped when there is none.
    TargetNearestEnemy,
    /// Fly along the owner's last movement direction.
    OwnerFacing,
    /// Circle the owner at a fixed radius.
    Orbit,
    /// Stay pinned to the owner's position.
    OwnerLocation,
}

impl SpawnBehavior {
    /// Whether a projectile with this behavior is consumed by its first hit.
    pub fn kills_on_collision(self) -> bool {
        !self.is_anchored()
    }

    /// Orbit and owner-location projectiles follow their owner and ignore the playfield.
    pub fn is_anchored(self) -> bool {
        matches!(self, SpawnBehavior::Orbit | SpawnBehavior::OwnerLocation)
    }
}

/// Whether a targeting projectile keeps steering after launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetBehavior {
    Tracking,
}

/// Distribution of simultaneously fired projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SpreadPattern {
    /// Evenly spaced rotations across an arc centered on the base direction.
    Angular { arc_degrees: f32 },
    /// Golden-angle spiral of spawn points around the owner.
    Spatial { spacing: f32 },
}

/// When a child weapon is created relative to its parent projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChildTrigger {
    OnSpawn,
    OnDeath,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a character to be chosen.
    #[default]
    CharacterSelect,
    Active,
    Paused,
    /// An upgrade offer is on screen; gameplay is paused until one is chosen.
    ChoosingUpgrade,
    /// The player was defeated.
    Defeated,
    /// All gifts collected and the exit reached.
    LevelComplete,
}

/// Rarity tier of an attribute upgrade. Ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl UpgradeRarity {
    pub const ALL: [UpgradeRarity; 5] = [
        UpgradeRarity::Common,
        UpgradeRarity::Uncommon,
        UpgradeRarity::Rare,
        UpgradeRarity::Epic,
        UpgradeRarity::Legendary,
    ];
}

/// Weapon attribute an upgrade can improve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeAttribute {
    /// How quickly projectiles move.
    Speed,
    /// How much damage projectiles deal.
    Damage,
    /// How much space projectiles occupy.
    Size,
    /// How quickly the next volley fires.
    Interval,
    /// How many projectiles fire per volley.
    Amount,
    /// How long projectiles stay alive.
    Lifetime,
}

impl UpgradeAttribute {
    pub const ALL: [UpgradeAttribute; 6] = [
        UpgradeAttribute::Speed,
        UpgradeAttribute::Damage,
        UpgradeAttribute::Size,
        UpgradeAttribute::Interval,
        UpgradeAttribute::Amount,
        UpgradeAttribute::Lifetime,
    ];
}
