//! Components that link entities together.
//!
//! These hold `hecs::Entity` handles, so they live next to the ECS rather
//! than in `horde-core`. A handle may outlive its entity; every reader
//! checks `World::contains` (or a failed `get`) before trusting it.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::Entity;

use horde_core::components::WeaponStats;
use horde_core::enums::SpawnBehavior;

/// Weapons the player owns, in acquisition order.
#[derive(Debug, Clone, Default)]
pub struct Loadout {
    pub weapons: Vec<Entity>,
}

/// A weapon instance. Fires on its own clock (`ActorClock` on the same entity).
#[derive(Debug, Clone)]
pub struct WeaponState {
    /// Index into the catalog's weapon definitions.
    pub def: usize,
    /// Actor the weapon fires from: the player, a parent projectile, or an anchor.
    pub owner: Entity,
    pub stats: WeaponStats,
    /// Weapon alive-time of the last volley.
    pub last_fire_ms: Option<f64>,
    /// Weapon alive-times at which one extra projectile is released.
    pub delayed_spawns: Vec<f64>,
    /// Live projectiles, oldest first.
    pub projectiles: VecDeque<Entity>,
    pub damage_dealt: f32,
    pub kills: u32,
    /// Keep running after the owner is gone until every projectile has expired.
    pub outlive_owner: bool,
    /// Fire a single volley, then wind down like an orphaned weapon.
    pub fire_once: bool,
    pub has_fired: bool,
    /// Damage from this weapon counts as the player's.
    pub player_owned: bool,
}

impl WeaponState {
    pub fn new(def: usize, owner: Entity, stats: WeaponStats, player_owned: bool) -> Self {
        Self {
            def,
            owner,
            stats,
            last_fire_ms: None,
            delayed_spawns: Vec::new(),
            projectiles: VecDeque::new(),
            damage_dealt: 0.0,
            kills: 0,
            outlive_owner: false,
            fire_once: false,
            has_fired: false,
            player_owned,
        }
    }

    /// A weapon spawned by another weapon's projectile.
    pub fn child(def: usize, owner: Entity, stats: WeaponStats, player_owned: bool) -> Self {
        Self {
            outlive_owner: true,
            fire_once: true,
            ..Self::new(def, owner, stats, player_owned)
        }
    }

    /// Whether the weapon is done firing for good.
    pub fn spent(&self) -> bool {
        self.fire_once && self.has_fired && self.delayed_spawns.is_empty()
    }
}

/// A projectile in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub weapon: Entity,
    pub behavior: SpawnBehavior,
    /// Unit travel direction; sprite rotation follows it.
    pub direction: Vec2,
    pub damage: f32,
    pub speed: f32,
    pub size: f32,
    pub lifetime_ms: Option<f64>,
    pub target: Option<Entity>,
    pub tracking: bool,
    /// Current angle around the owner, for orbiting projectiles (radians).
    pub orbit_angle: f32,
    /// Fixed offset from the owner, for owner-location projectiles.
    pub offset: Vec2,
    pub kills_on_collision: bool,
    /// Last hit time per enemy, in projectile alive-time.
    pub hits: Vec<(Entity, f64)>,
    pub player_owned: bool,
    /// Marked for removal at cleanup.
    pub expired: bool,
}

impl Projectile {
    /// Whether this projectile may damage `enemy` at alive-time `now_ms`.
    pub fn can_hit(&self, enemy: Entity, now_ms: f64, retrigger_ms: f64) -> bool {
        self.hits
            .iter()
            .find(|(e, _)| *e == enemy)
            .map_or(true, |(_, at)| now_ms - at >= retrigger_ms)
    }

    pub fn record_hit(&mut self, enemy: Entity, now_ms: f64) {
        match self.hits.iter_mut().find(|(e, _)| *e == enemy) {
            Some(entry) => entry.1 = now_ms,
            None => self.hits.push((enemy, now_ms)),
        }
    }
}

/// An XP pickup left by a player kill.
#[derive(Debug, Clone, Copy)]
pub struct Corpse {
    pub xp_value: u32,
    pub picked_up_by: Option<Entity>,
    /// Distance to the claimer at claim time; farther claims home faster.
    pub claim_distance: f32,
    /// Corpse alive-time at claim.
    pub claimed_at_ms: f64,
    /// XP already granted; the entity is removed at cleanup.
    pub collected: bool,
}

impl Corpse {
    pub fn new(xp_value: u32) -> Self {
        Self {
            xp_value,
            picked_up_by: None,
            claim_distance: 0.0,
            claimed_at_ms: 0.0,
            collected: false,
        }
    }

    pub fn is_claimed(&self) -> bool {
        self.picked_up_by.is_some()
    }
}

/// Static stand-in owner for a child weapon created where a projectile died.
#[derive(Debug, Clone, Copy)]
pub struct Anchor;
