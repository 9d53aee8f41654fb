//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, enemies, weapons, corpses, and objective entities
//! with the component bundles the systems expect.

use glam::Vec2;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use horde_core::components::*;
use horde_core::constants::*;
use horde_core::defs::{Catalog, CharacterDefinition, EnemyDefinition, LevelData};
use horde_core::enums::Facing;

use crate::components::{Anchor, Corpse, Loadout, WeaponState};
use crate::engine::PlayerTuning;

/// Set up a run: the player with their starting weapon, gifts, and the exit.
/// Returns the player entity.
pub fn setup_run(
    world: &mut World,
    catalog: &Catalog,
    level: &LevelData,
    character: &CharacterDefinition,
    tuning: &PlayerTuning,
    rng: &mut ChaCha8Rng,
) -> Entity {
    let gifts_needed = spawn_gifts(world, level, rng);
    if let Some(exit) = level.exit {
        world.spawn((LevelExit, Position(exit), Collider { radius: EXIT_RADIUS }));
    }

    let player = spawn_player(world, level.player_start, character, tuning, gifts_needed);
    match catalog.weapon_index(&character.starting_weapon) {
        Some(def) => {
            give_weapon(world, catalog, player, def);
        }
        None => log::error!(
            "character {} starts with unknown weapon {}",
            character.name,
            character.starting_weapon
        ),
    }
    player
}

/// Spawn the player at `start`.
pub fn spawn_player(
    world: &mut World,
    start: Vec2,
    character: &CharacterDefinition,
    tuning: &PlayerTuning,
    gifts_needed: u32,
) -> Entity {
    let stats = PlayerStats {
        character: character.name.clone(),
        gifts_needed,
        max_weapons: tuning.max_weapons,
        pickup_distance_sq: tuning.pickup_distance_sq,
        ..Default::default()
    };

    world.spawn((
        Player,
        stats,
        Experience::default(),
        Loadout::default(),
        Position(start),
        Collider {
            radius: PLAYER_RADIUS,
        },
        Motion::new(tuning.speed, character.facing),
        Health::new(tuning.max_health).with_invulnerability(tuning.invulnerability_ms),
        ActorClock::default(),
    ))
}

/// Spawn one enemy scaled by the current wave difficulty.
pub fn spawn_enemy(
    world: &mut World,
    def_index: usize,
    def: &EnemyDefinition,
    position: Vec2,
    wave: u32,
    difficulty: f32,
    serial: u32,
) -> Entity {
    if def.sprite.is_none() {
        log::warn!("enemy {} has no sprite", def.name);
    }

    let xp_value = ((def.xp_value as f32 * difficulty).round() as u32).max(1);
    world.spawn((
        Enemy {
            def: def_index,
            wave,
            difficulty,
            xp_value,
            serial,
        },
        Position(position),
        Collider {
            radius: def.radius(),
        },
        Motion::new(ENEMY_BASE_SPEED * def.speed, def.facing),
        Health::new(def.health * difficulty),
        ActorClock::default(),
    ))
}

/// Equip the player with a weapon from the catalog.
pub fn give_weapon(
    world: &mut World,
    catalog: &Catalog,
    player: Entity,
    def: usize,
) -> Option<Entity> {
    let weapon_def = catalog.weapons.get(def)?;
    let stats = WeaponStats::from_definition(weapon_def);
    let weapon = world.spawn((WeaponState::new(def, player, stats, true), ActorClock::default()));
    if let Ok(mut loadout) = world.get::<&mut Loadout>(player) {
        loadout.weapons.push(weapon);
    }
    log::info!("weapon {} equipped", weapon_def.name);
    Some(weapon)
}

/// Spawn a child weapon owned by `owner`, copying damage and size from the parent.
pub fn spawn_child_weapon(
    world: &mut World,
    catalog: &Catalog,
    child_def: usize,
    owner: Entity,
    parent: &WeaponStats,
    player_owned: bool,
) -> Option<Entity> {
    let def = catalog.weapons.get(child_def)?;
    let mut stats = WeaponStats::from_definition(def);
    stats.damage = parent.damage;
    stats.size = parent.size;
    Some(world.spawn((
        WeaponState::child(child_def, owner, stats, player_owned),
        ActorClock::default(),
    )))
}

/// A fixed point for child weapons whose parent projectile is gone.
pub fn spawn_anchor(world: &mut World, position: Vec2) -> Entity {
    world.spawn((Anchor, Position(position), ActorClock::default()))
}

/// Spawn an unclaimed corpse.
pub fn spawn_corpse(world: &mut World, position: Vec2, xp_value: u32) -> Entity {
    let mut motion = Motion::new(0.0, Facing::Left);
    motion.face_move_dir = false;
    world.spawn((
        Corpse::new(xp_value),
        Position(position),
        Collider {
            radius: CORPSE_RADIUS,
        },
        motion,
        ActorClock::default(),
    ))
}

/// Place gifts on a random subset of spawn points. Returns how many were placed.
pub fn spawn_gifts(world: &mut World, level: &LevelData, rng: &mut ChaCha8Rng) -> u32 {
    let wanted = level
        .num_gifts_to_spawn
        .unwrap_or(level.gift_spawns.len() / 2)
        .min(level.gift_spawns.len());

    let mut placed = 0;
    for (i, point) in level.gift_spawns.choose_multiple(rng, wanted).enumerate() {
        world.spawn((
            Gift {
                name: format!("gift_{i}"),
            },
            Position(*point),
            Collider {
                radius: GIFT_RADIUS,
            },
        ));
        placed += 1;
    }
    placed
}
