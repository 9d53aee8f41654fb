//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Systems in `horde-sim` own the behavior. Components that link
//! entities together live in the sim crate, next to the ECS.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::Facing;

/// World position (pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Circular collision footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
}

/// Per-actor clock. Only advances while gameplay runs, so timers measured
/// against it survive pauses intact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorClock {
    pub alive_ms: f64,
}

/// Movement intent and facing state for an actor that walks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Speed in pixels per millisecond.
    pub speed: f32,
    /// Desired direction this tick; cleared after integration.
    pub intent: Vec2,
    /// Velocity from the most recent integration (px/ms).
    pub velocity: Vec2,
    /// Last nonzero movement direction.
    pub last_move: Vec2,
    /// Default horizontal facing of the sprite.
    pub sprite_facing: Facing,
    /// Whether the sprite is currently mirrored.
    pub flip_horizontal: bool,
    /// Whether movement should mirror the sprite at all.
    pub face_move_dir: bool,
    /// Push velocity from the last hit (px/ms), applied for `knockback_ms`.
    pub knockback: Vec2,
    pub knockback_ms: f32,
}

impl Motion {
    pub fn new(speed: f32, sprite_facing: Facing) -> Self {
        Self {
            speed,
            intent: Vec2::ZERO,
            velocity: Vec2::ZERO,
            last_move: Vec2::ZERO,
            sprite_facing,
            flip_horizontal: false,
            face_move_dir: true,
            knockback: Vec2::ZERO,
            knockback_ms: 0.0,
        }
    }
}

/// Health and damage bookkeeping shared by every damageable actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    /// Actor alive-time of the last applied damage.
    pub last_damaged_ms: Option<f64>,
    pub invulnerability_ms: f64,
    pub god_mode: bool,
    pub demigod_mode: bool,
    /// Whether the most recent damage this tick came from the player.
    pub last_damaged_by_player: bool,
    /// Terminal state; set exactly once.
    pub defeated: bool,
    /// Remaining white-flash time after a non-lethal hit.
    pub flash_remaining_ms: f64,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            last_damaged_ms: None,
            invulnerability_ms: 0.0,
            god_mode: false,
            demigod_mode: false,
            last_damaged_by_player: false,
            defeated: false,
            flash_remaining_ms: 0.0,
        }
    }

    pub fn with_invulnerability(mut self, window_ms: f64) -> Self {
        self.invulnerability_ms = window_ms;
        self
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}

/// Marks the player entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Player progress counters shown by the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub character: String,
    pub kills: u32,
    pub gifts_collected: u32,
    pub gifts_needed: u32,
    pub max_weapons: usize,
    pub pickup_distance_sq: f32,
    pub reached_exit: bool,
}

/// Experience and level. Level 1 at zero XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub xp: u32,
    pub level: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self { xp: 0, level: 1 }
    }
}

/// Enemy instance parameters fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Index into the catalog's enemy definitions.
    pub def: usize,
    pub wave: u32,
    pub difficulty: f32,
    /// Scaled XP carried into the corpse on a player kill.
    pub xp_value: u32,
    /// Serial number for log names.
    pub serial: u32,
}

/// Mutable stat block of a weapon instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: f32,
    pub speed: f32,
    pub size: f32,
    pub interval_ms: f64,
    /// Integer part fires per volley; the fraction drives delayed spawns.
    pub amount: f32,
    pub lifetime_ms: Option<f64>,
}

impl WeaponStats {
    pub fn from_definition(def: &crate::defs::WeaponDefinition) -> Self {
        Self {
            damage: def.base_damage,
            speed: def.base_speed,
            size: def.scale(),
            interval_ms: def.base_spawn_interval_ms,
            amount: def.amount(),
            lifetime_ms: def.base_lifetime,
        }
    }
}

/// A collectible gift objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gift {
    pub name: String,
}

/// The level exit, usable once all gifts are collected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelExit;
