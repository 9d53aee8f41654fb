//! Static catalog definitions loaded from data files.
//!
//! Definitions are read-only once loaded. Mutable per-instance state lives
//! in components; upgrades never touch a definition.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

fn default_one() -> f32 {
    1.0
}

fn default_xp() -> u32 {
    1
}

fn default_sprite_size() -> f32 {
    32.0
}

/// A spawnable enemy type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyDefinition {
    pub name: String,
    /// Base health, multiplied by the wave difficulty at spawn.
    #[serde(default = "default_one")]
    pub health: f32,
    /// Speed multiplier on top of the shared enemy base speed.
    #[serde(default = "default_one")]
    pub speed: f32,
    #[serde(default)]
    pub facing: Facing,
    /// Difficulty tier gating when this enemy may spawn.
    #[serde(default)]
    pub difficulty: u32,
    /// XP carried by this enemy's corpse before difficulty scaling.
    #[serde(default = "default_xp")]
    pub xp_value: u32,
    /// Whether a player kill leaves a collectible corpse.
    #[serde(default)]
    pub corpse: bool,
    #[serde(default = "default_sprite_size")]
    pub width: f32,
    #[serde(default = "default_sprite_size")]
    pub height: f32,
    /// Sprite tile id; enemies without one still simulate.
    #[serde(default)]
    pub sprite: Option<u32>,
}

impl EnemyDefinition {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn radius(&self) -> f32 {
        self.width.max(self.height) * 0.5
    }
}

/// Spread applied to a volley when the weapon's amount adds spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadDefinition {
    pub pattern: SpreadPattern,
    /// Random jitter per projectile: degrees for angular, pixels for spatial.
    #[serde(default)]
    pub variance: f32,
}

/// A weapon spawned by another weapon's projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildWeaponDefinition {
    pub weapon: String,
    pub trigger: ChildTrigger,
}

/// A weapon type the player can own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponDefinition {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub base_speed: f32,
    pub base_damage: f32,
    #[serde(default)]
    pub base_scale: Option<f32>,
    pub base_spawn_interval_ms: f64,
    #[serde(default)]
    pub base_amount: Option<f32>,
    /// Projectile lifetime in milliseconds; unlimited when absent.
    #[serde(default)]
    pub base_lifetime: Option<f64>,
    pub spawn_behavior: SpawnBehavior,
    #[serde(default)]
    pub target_behavior: Option<TargetBehavior>,
    #[serde(default)]
    pub spread: Option<SpreadDefinition>,
    /// Extra amount widens the volley instead of adding delayed spawns.
    #[serde(default)]
    pub amount_adds_spread: bool,
    #[serde(default)]
    pub child: Option<ChildWeaponDefinition>,
    #[serde(default = "default_sprite_size")]
    pub width: f32,
    #[serde(default = "default_sprite_size")]
    pub height: f32,
    #[serde(default)]
    pub sprite: Option<u32>,
}

impl WeaponDefinition {
    /// Name shown to the player; falls back to the catalog key.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    pub fn scale(&self) -> f32 {
        self.base_scale.unwrap_or(1.0)
    }

    pub fn amount(&self) -> f32 {
        self.base_amount.unwrap_or(1.0)
    }

    pub fn is_tracking(&self) -> bool {
        self.target_behavior == Some(TargetBehavior::Tracking)
    }

    /// Unscaled collision radius of one projectile.
    pub fn radius(&self) -> f32 {
        self.width.max(self.height) * 0.5
    }
}

/// A playable character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDefinition {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub starting_weapon: String,
    #[serde(default)]
    pub facing: Facing,
}

/// One row of the wave timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveData {
    pub time_seconds: f64,
    pub difficulty: f32,
}

/// Population rules that apply from `wave` onward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveTimingsData {
    pub wave: u32,
    pub allowed_enemies: Vec<String>,
    pub min_enemies: u32,
    #[serde(default)]
    pub max_enemies: u32,
    /// Highest enemy difficulty tier allowed; unlimited when absent.
    #[serde(default)]
    pub max_tier: Option<u32>,
}

/// Per-level tables and placements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub wave_data: Vec<WaveData>,
    pub spawn_timings: Vec<WaveTimingsData>,
    #[serde(default)]
    pub player_start: Vec2,
    #[serde(default)]
    pub exit: Option<Vec2>,
    #[serde(default)]
    pub gift_spawns: Vec<Vec2>,
    /// Gifts placed per run; half the spawn points when absent.
    #[serde(default)]
    pub num_gifts_to_spawn: Option<usize>,
}

/// All read-only definitions the simulation consumes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub enemies: Vec<EnemyDefinition>,
    #[serde(default)]
    pub weapons: Vec<WeaponDefinition>,
    #[serde(default)]
    pub characters: Vec<CharacterDefinition>,
}

impl Catalog {
    pub fn weapon_index(&self, name: &str) -> Option<usize> {
        self.weapons.iter().position(|w| w.name == name)
    }

    pub fn enemy_index(&self, name: &str) -> Option<usize> {
        self.enemies.iter().position(|e| e.name == name)
    }

    pub fn character(&self, name: &str) -> Option<&CharacterDefinition> {
        self.characters.iter().find(|c| c.name == name)
    }
}
