//! Projectile steering: lifetime expiry, tracking and re-targeting, orbits,
//! and owner pinning. Free-flying projectiles only set a movement intent;
//! anchored ones are placed directly.

use glam::Vec2;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use horde_core::components::{ActorClock, Enemy, Health, Motion, Position};
use horde_core::constants::{ORBIT_FADE_MS, ORBIT_RADIUS, RETARGET_CANDIDATES};
use horde_core::enums::SpawnBehavior;

use crate::components::{Projectile, WeaponState};

/// Steer every live projectile for this tick.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, dt_ms: f64) {
    let enemies: Vec<(Entity, Vec2)> = world
        .query::<(&Enemy, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| !health.defeated)
        .map(|(entity, (_, pos, _))| (entity, pos.0))
        .collect();

    let projectiles: Vec<Entity> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, projectile)| !projectile.expired)
        .map(|(entity, _)| entity)
        .collect();

    for entity in projectiles {
        let owner_pos = owner_position(world, entity);
        let Ok((projectile, pos, motion, clock)) = world
            .query_one_mut::<(&mut Projectile, &mut Position, &mut Motion, &ActorClock)>(entity)
        else {
            continue;
        };

        if let Some(lifetime) = projectile.lifetime_ms {
            if clock.alive_ms >= lifetime {
                projectile.expired = true;
                continue;
            }
        }

        match projectile.behavior {
            SpawnBehavior::TargetNearestEnemy | SpawnBehavior::OwnerFacing => {
                if projectile.tracking {
                    track(projectile, pos.0, &enemies, rng);
                }
                motion.intent = projectile.direction;
            }
            SpawnBehavior::Orbit => {
                let Some(center) = owner_pos else { continue };
                let radius = ORBIT_RADIUS * projectile.size;
                projectile.orbit_angle += projectile.speed / radius * dt_ms as f32;
                let fade = orbit_fade(clock.alive_ms, projectile.lifetime_ms);
                pos.0 = center + Vec2::from_angle(projectile.orbit_angle) * radius * fade;
                projectile.direction = Vec2::from_angle(projectile.orbit_angle).perp();
            }
            SpawnBehavior::OwnerLocation => {
                if let Some(center) = owner_pos {
                    pos.0 = center + projectile.offset;
                }
            }
        }
    }
}

/// Keep a tracking projectile pointed at a live target, picking a new one
/// at random among the closest enemies when it is gone.
fn track(
    projectile: &mut Projectile,
    from: Vec2,
    enemies: &[(Entity, Vec2)],
    rng: &mut ChaCha8Rng,
) {
    let live_target = projectile
        .target
        .and_then(|target| enemies.iter().find(|(e, _)| *e == target));

    let aim = match live_target {
        Some(&(_, pos)) => Some(pos),
        None => {
            let mut closest: Vec<&(Entity, Vec2)> = enemies.iter().collect();
            closest.sort_by(|a, b| {
                a.1.distance_squared(from).total_cmp(&b.1.distance_squared(from))
            });
            closest.truncate(RETARGET_CANDIDATES);
            let picked = closest.choose(rng).copied();
            projectile.target = picked.map(|(e, _)| *e);
            picked.map(|(_, pos)| *pos)
        }
    };

    if let Some(direction) = aim.and_then(|pos| (pos - from).try_normalize()) {
        projectile.direction = direction;
    }
}

/// Orbit radius multiplier: grows in after spawn, shrinks before expiry.
pub fn orbit_fade(alive_ms: f64, lifetime_ms: Option<f64>) -> f32 {
    let fade_in = alive_ms / ORBIT_FADE_MS;
    let fade_out = lifetime_ms.map_or(1.0, |lifetime| (lifetime - alive_ms) / ORBIT_FADE_MS);
    fade_in.min(fade_out).clamp(0.0, 1.0) as f32
}

fn owner_position(world: &World, projectile: Entity) -> Option<Vec2> {
    let weapon = world.get::<&Projectile>(projectile).ok()?.weapon;
    let owner = world.get::<&WeaponState>(weapon).ok()?.owner;
    let pos = world.get::<&Position>(owner).ok()?.0;
    Some(pos)
}
