//! Collision resolution: projectile→enemy, enemy→player, player→objectives.
//!
//! All footprints are circles.

use glam::Vec2;
use hecs::{Entity, World};

use horde_core::components::*;
use horde_core::constants::{
    ENEMY_CONTACT_DAMAGE, KNOCKBACK_MS, KNOCKBACK_SPEED, PROJECTILE_RETRIGGER_MS,
};
use horde_core::events::SimEvent;

use crate::components::{Projectile, WeaponState};
use crate::systems::combat::{self, take_damage, DamageOutcome};

fn overlaps(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

fn live_enemies(world: &World) -> Vec<(Entity, Vec2, f32)> {
    world
        .query::<(&Enemy, &Position, &Collider, &Health)>()
        .iter()
        .filter(|(_, (_, _, _, health))| !health.defeated)
        .map(|(entity, (_, pos, collider, _))| (entity, pos.0, collider.radius))
        .collect()
}

/// Run every collision pass for this tick.
pub fn run(world: &mut World, player: Option<Entity>, events: &mut Vec<SimEvent>) {
    projectiles_vs_enemies(world);
    if let Some(player) = player.filter(|p| combat::is_alive(world, *p)) {
        enemies_vs_player(world, player, events);
        player_vs_objectives(world, player, events);
    }
}

/// Damage enemies touched by projectiles and credit the firing weapon.
pub fn projectiles_vs_enemies(world: &mut World) {
    let enemies = live_enemies(world);
    let projectiles: Vec<(Entity, Entity, Vec2, f32, f64)> = world
        .query::<(&Projectile, &Position, &Collider, &ActorClock)>()
        .iter()
        .filter(|(_, (projectile, _, _, _))| !projectile.expired)
        .map(|(entity, (projectile, pos, collider, clock))| {
            (entity, projectile.weapon, pos.0, collider.radius, clock.alive_ms)
        })
        .collect();

    for (entity, weapon, center, radius, now) in projectiles {
        for &(enemy, enemy_pos, enemy_radius) in &enemies {
            if !overlaps(center, radius, enemy_pos, enemy_radius) {
                continue;
            }
            let Ok(mut projectile) = world.get::<&mut Projectile>(entity) else {
                break;
            };
            if !projectile.kills_on_collision
                && !projectile.can_hit(enemy, now, PROJECTILE_RETRIGGER_MS)
            {
                continue;
            }

            let (outcome, dealt) = {
                let (Ok(mut health), Ok(clock)) =
                    (world.get::<&mut Health>(enemy), world.get::<&ActorClock>(enemy))
                else {
                    continue;
                };
                if health.defeated {
                    continue;
                }
                let before = health.current;
                let outcome = take_damage(
                    &mut health,
                    &clock,
                    projectile.damage,
                    projectile.player_owned,
                    false,
                );
                (outcome, before - health.current)
            };

            if outcome.applied() {
                projectile.record_hit(enemy, now);
                if let Ok(mut motion) = world.get::<&mut Motion>(enemy) {
                    let away = (enemy_pos - center)
                        .try_normalize()
                        .unwrap_or(projectile.direction);
                    motion.knockback = away * KNOCKBACK_SPEED;
                    motion.knockback_ms = KNOCKBACK_MS;
                }
                if let Ok(mut state) = world.get::<&mut WeaponState>(weapon) {
                    state.damage_dealt += dealt;
                    if outcome == DamageOutcome::Defeated {
                        state.kills += 1;
                    }
                }
            }

            if projectile.kills_on_collision {
                projectile.expired = true;
                break;
            }
        }
    }
}

/// Enemies that touch the player hurt it and are destroyed without a corpse.
pub fn enemies_vs_player(world: &mut World, player: Entity, events: &mut Vec<SimEvent>) {
    let Some((player_pos, player_radius)) = world
        .query_one_mut::<(&Position, &Collider)>(player)
        .ok()
        .map(|(pos, collider)| (pos.0, collider.radius))
    else {
        return;
    };

    for (enemy, enemy_pos, enemy_radius) in live_enemies(world) {
        if !overlaps(player_pos, player_radius, enemy_pos, enemy_radius) {
            continue;
        }

        if let Ok((health, clock)) = world.query_one_mut::<(&mut Health, &ActorClock)>(player) {
            let outcome = take_damage(health, clock, ENEMY_CONTACT_DAMAGE, false, false);
            if outcome.applied() {
                events.push(SimEvent::PlayerDamaged {
                    health: health.current,
                    max_health: health.max,
                });
            }
        }

        if let Ok((health, clock)) = world.query_one_mut::<(&mut Health, &ActorClock)>(enemy) {
            let full = health.current;
            take_damage(health, clock, full, false, true);
        }

        if !combat::is_alive(world, player) {
            break;
        }
    }
}

/// Collect gifts and use the exit.
pub fn player_vs_objectives(world: &mut World, player: Entity, events: &mut Vec<SimEvent>) {
    let Some((player_pos, player_radius)) = world
        .query_one_mut::<(&Position, &Collider)>(player)
        .ok()
        .map(|(pos, collider)| (pos.0, collider.radius))
    else {
        return;
    };

    let touched: Vec<Entity> = world
        .query::<(&Gift, &Position, &Collider)>()
        .iter()
        .filter(|(_, (_, pos, collider))| {
            overlaps(player_pos, player_radius, pos.0, collider.radius)
        })
        .map(|(entity, _)| entity)
        .collect();

    for gift in touched {
        collect_gift(world, player, gift, events);
    }

    let at_exit = world
        .query::<(&LevelExit, &Position, &Collider)>()
        .iter()
        .any(|(_, (_, pos, collider))| overlaps(player_pos, player_radius, pos.0, collider.radius));
    if !at_exit {
        return;
    }
    if let Ok(stats) = world.query_one_mut::<&mut PlayerStats>(player) {
        if !stats.reached_exit && stats.gifts_collected >= stats.gifts_needed {
            stats.reached_exit = true;
            log::info!("level exit reached");
            events.push(SimEvent::LevelComplete);
        }
    }
}

/// Remove a gift and credit it to the player.
pub fn collect_gift(world: &mut World, player: Entity, gift: Entity, events: &mut Vec<SimEvent>) {
    if world.despawn(gift).is_err() {
        return;
    }
    let Ok(stats) = world.query_one_mut::<&mut PlayerStats>(player) else {
        return;
    };
    stats.gifts_collected += 1;
    log::info!("gift collected ({}/{})", stats.gifts_collected, stats.gifts_needed);
    events.push(SimEvent::GiftCollected {
        collected: stats.gifts_collected,
        needed: stats.gifts_needed,
    });
    if stats.gifts_collected == stats.gifts_needed {
        events.push(SimEvent::AllGiftsCollected);
    }
}
