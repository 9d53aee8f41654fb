//! Weapon system: fire timers, volleys, spread patterns, delayed fractional
//! spawns, and on-spawn child weapons (which fire on the tick they appear).

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use horde_core::components::*;
use horde_core::constants::*;
use horde_core::defs::{Catalog, SpreadDefinition, WeaponDefinition};
use horde_core::enums::{ChildTrigger, Facing, SpawnBehavior, SpreadPattern};
use horde_core::types::rotate;

use crate::components::{Projectile, WeaponState};
use crate::systems::combat;
use crate::systems::movement::facing_direction;
use crate::world_setup;

/// Angle between successive points of a spatial spread spiral.
const GOLDEN_ANGLE: f32 = PI * 0.763_932; // PI * (3 - sqrt(5))

/// Where one projectile of a volley starts and which way it heads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub direction: Vec2,
    pub offset: Vec2,
}

/// Advance every weapon: release due delayed spawns, then fire if ready.
pub fn run(world: &mut World, catalog: &Catalog, rng: &mut ChaCha8Rng) {
    let weapons: Vec<Entity> = world
        .query::<&WeaponState>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for weapon in weapons {
        advance_weapon(world, catalog, rng, weapon);
    }
}

fn advance_weapon(world: &mut World, catalog: &Catalog, rng: &mut ChaCha8Rng, weapon: Entity) {
    let now = world
        .get::<&ActorClock>(weapon)
        .map_or(0.0, |clock| clock.alive_ms);
    let Some((owner, def_index)) = world
        .get::<&WeaponState>(weapon)
        .ok()
        .map(|state| (state.owner, state.def))
    else {
        return;
    };

    // Orphaned weapons only wind down; cleanup decides when they go.
    if !combat::is_alive(world, owner) {
        return;
    }
    let Some(def) = catalog.weapons.get(def_index) else {
        log::error!("weapon entity {weapon:?} refers to unknown definition {def_index}");
        return;
    };

    let released = match world.get::<&mut WeaponState>(weapon) {
        Ok(mut state) => {
            let before = state.delayed_spawns.len();
            state.delayed_spawns.retain(|due| *due > now);
            before - state.delayed_spawns.len()
        }
        Err(_) => return,
    };
    for _ in 0..released {
        fire_volley(world, catalog, rng, weapon, def, 1);
    }

    let Some(stats) = world
        .get::<&WeaponState>(weapon)
        .ok()
        .filter(|state| is_ready(state, now))
        .map(|state| state.stats)
    else {
        return;
    };

    let whole = stats.amount.floor().max(0.0);
    if !fire_volley(world, catalog, rng, weapon, def, whole as usize) {
        // No target: try again next tick without resetting the timer.
        return;
    }

    let fraction = (stats.amount - whole) as f64;
    let Ok(mut state) = world.get::<&mut WeaponState>(weapon) else {
        return;
    };
    state.last_fire_ms = Some(now);
    state.has_fired = true;
    if !def.amount_adds_spread && fraction > 0.0 {
        let max = (stats.interval_ms * (1.0 - fraction)).max(MULTI_SPAWN_DELAY_MS);
        let min = MULTI_SPAWN_DELAY_MS.min(max);
        let delay = rng.gen_range(min..=max);
        let queued = state.delayed_spawns.len() + 1;
        state.delayed_spawns.push(now + delay / queued as f64);
    }
}

/// Whether a weapon's timer allows a new volley at alive-time `now`.
pub fn is_ready(state: &WeaponState, now: f64) -> bool {
    if state.fire_once && state.has_fired {
        return false;
    }
    state
        .last_fire_ms
        .map_or(true, |last| now >= last + state.stats.interval_ms)
}

/// Fire `count` projectiles at once. Returns false when a targeting weapon
/// has nothing to aim at.
pub fn fire_volley(
    world: &mut World,
    catalog: &Catalog,
    rng: &mut ChaCha8Rng,
    weapon: Entity,
    def: &WeaponDefinition,
    count: usize,
) -> bool {
    let Some((owner, stats, player_owned)) = world
        .get::<&WeaponState>(weapon)
        .ok()
        .map(|state| (state.owner, state.stats, state.player_owned))
    else {
        return false;
    };
    let Some((origin, facing)) = owner_frame(world, owner) else {
        return false;
    };

    let (target, base) = match def.spawn_behavior {
        SpawnBehavior::TargetNearestEnemy => match nearest_enemy(world, origin) {
            Some((enemy, enemy_pos)) => (
                Some(enemy),
                (enemy_pos - origin).try_normalize().unwrap_or(FALLBACK_FACING),
            ),
            None => return false,
        },
        _ => (None, facing),
    };

    let base_angle = base.y.atan2(base.x);
    for (i, placement) in volley_placements(def, count, base, rng).into_iter().enumerate() {
        let orbit_angle = base_angle + TAU * i as f32 / count.max(1) as f32;
        let projectile = spawn_projectile(
            world,
            def,
            &stats,
            weapon,
            player_owned,
            origin,
            placement,
            orbit_angle,
            target,
        );
        track_projectile(world, weapon, projectile);

        if let Some(child) = def.child.as_ref().filter(|c| c.trigger == ChildTrigger::OnSpawn) {
            let spawned = catalog.weapon_index(&child.weapon).and_then(|child_def| {
                world_setup::spawn_child_weapon(
                    world,
                    catalog,
                    child_def,
                    projectile,
                    &stats,
                    player_owned,
                )
            });
            match spawned {
                // The child fires with its parent, before a hit can remove it.
                Some(child_weapon) => advance_weapon(world, catalog, rng, child_weapon),
                None => log::error!("unknown child weapon {}", child.weapon),
            }
        }
    }
    true
}

/// Directions and offsets for a volley of `count` projectiles around `base`.
pub fn volley_placements(
    def: &WeaponDefinition,
    count: usize,
    base: Vec2,
    rng: &mut ChaCha8Rng,
) -> Vec<Placement> {
    (0..count)
        .map(|i| match def.spread {
            Some(SpreadDefinition {
                pattern: SpreadPattern::Angular { arc_degrees },
                variance,
            }) => {
                let angle = if count > 1 {
                    -arc_degrees * 0.5 + arc_degrees * i as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                let angle = angle + jitter(rng, variance);
                Placement {
                    direction: rotate(base, angle.to_radians()),
                    offset: Vec2::ZERO,
                }
            }
            Some(SpreadDefinition {
                pattern: SpreadPattern::Spatial { spacing },
                variance,
            }) => {
                let radius = spacing * (i as f32).sqrt();
                let spiral = Vec2::from_angle(i as f32 * GOLDEN_ANGLE) * radius;
                let noise = Vec2::new(jitter(rng, variance), jitter(rng, variance));
                Placement {
                    direction: base,
                    offset: spiral + noise,
                }
            }
            None => {
                let direction = if def.spawn_behavior == SpawnBehavior::OwnerFacing && count > 1 {
                    let turn = rng.gen_range(0.0..=OWNER_FACING_VARIANCE_DEGREES);
                    rotate(base, turn.to_radians())
                } else {
                    base
                };
                Placement {
                    direction,
                    offset: Vec2::ZERO,
                }
            }
        })
        .collect()
}

fn jitter(rng: &mut ChaCha8Rng, variance: f32) -> f32 {
    if variance > 0.0 {
        rng.gen_range(-variance..=variance)
    } else {
        0.0
    }
}

/// Position and facing of whatever a weapon fires from.
pub fn owner_frame(world: &World, owner: Entity) -> Option<(Vec2, Vec2)> {
    let position = world.get::<&Position>(owner).ok()?.0;
    let facing = if let Ok(projectile) = world.get::<&Projectile>(owner) {
        projectile.direction
    } else if let Ok(motion) = world.get::<&Motion>(owner) {
        facing_direction(&motion)
    } else {
        FALLBACK_FACING
    };
    Some((position, facing))
}

/// Closest living enemy to `origin`.
pub fn nearest_enemy(world: &World, origin: Vec2) -> Option<(Entity, Vec2)> {
    world
        .query::<(&Enemy, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| !health.defeated)
        .map(|(entity, (_, pos, _))| (entity, pos.0, pos.0.distance_squared(origin)))
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(entity, pos, _)| (entity, pos))
}

#[allow(clippy::too_many_arguments)]
fn spawn_projectile(
    world: &mut World,
    def: &WeaponDefinition,
    stats: &WeaponStats,
    weapon: Entity,
    player_owned: bool,
    origin: Vec2,
    placement: Placement,
    orbit_angle: f32,
    target: Option<Entity>,
) -> Entity {
    let behavior = def.spawn_behavior;
    let lifetime_ms = stats
        .lifetime_ms
        .or(behavior.is_anchored().then_some(ANCHORED_DEFAULT_LIFETIME_MS));

    let mut motion = Motion::new(
        if behavior.is_anchored() { 0.0 } else { stats.speed },
        Facing::Right,
    );
    motion.face_move_dir = false;

    // Orbits start on the owner and fade out to their radius.
    let position = match behavior {
        SpawnBehavior::Orbit => origin,
        _ => origin + placement.offset,
    };

    world.spawn((
        Projectile {
            weapon,
            behavior,
            direction: placement.direction,
            damage: stats.damage,
            speed: stats.speed,
            size: stats.size,
            lifetime_ms,
            target,
            tracking: def.is_tracking(),
            orbit_angle,
            offset: placement.offset,
            kills_on_collision: behavior.kills_on_collision(),
            hits: Vec::new(),
            player_owned,
            expired: false,
        },
        Position(position),
        Collider {
            radius: def.radius() * stats.size,
        },
        motion,
        ActorClock::default(),
    ))
}

/// Record a new projectile and expire the oldest one past the cap.
fn track_projectile(world: &mut World, weapon: Entity, projectile: Entity) {
    let evicted = match world.get::<&mut WeaponState>(weapon) {
        Ok(mut state) => {
            state.projectiles.push_back(projectile);
            if state.projectiles.len() > MAX_LIVING_PROJECTILES {
                state.projectiles.pop_front()
            } else {
                None
            }
        }
        Err(_) => None,
    };
    if let Some(oldest) = evicted {
        if let Ok(mut old) = world.get::<&mut Projectile>(oldest) {
            old.expired = true;
        }
    }
}
