//! Corpse and pickup economy.
//!
//! Player kills drop XP corpses. While too many unclaimed corpses are on
//! screen, new kills fold their XP into the nearest unclaimed corpse
//! instead. The player claims pickups in range; claimed pickups home in
//! and pay out their XP exactly once.

use glam::Vec2;
use hecs::{Entity, World};

use horde_core::components::*;
use horde_core::constants::{
    PICKUP_ACCELERATION, PICKUP_COLLECT_DISTANCE_SQ, PICKUP_REFERENCE_DISTANCE, PICKUP_SPEED,
};
use horde_core::defs::Catalog;
use horde_core::events::SimEvent;
use horde_core::types::Rect;

use crate::components::Corpse;
use crate::registry::SlotRegistry;
use crate::world_setup;

/// Handle every enemy defeated this tick: stats, events, corpses. The
/// enemy entities are removed here so each defeat is processed once.
pub fn process_defeated(
    world: &mut World,
    catalog: &Catalog,
    player: Option<Entity>,
    pickups: &mut SlotRegistry,
    playfield: &Rect,
    max_corpses: usize,
    events: &mut Vec<SimEvent>,
) {
    let defeated: Vec<(Entity, Enemy, Vec2, bool)> = world
        .query::<(&Enemy, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.defeated)
        .map(|(entity, (enemy, pos, health))| {
            (entity, *enemy, pos.0, health.last_damaged_by_player)
        })
        .collect();

    for (entity, enemy, position, by_player) in defeated {
        let def = catalog.enemies.get(enemy.def);
        let name = def.map_or_else(String::new, |d| d.name.clone());
        log::debug!("{name}#{} defeated (by player: {by_player})", enemy.serial);
        events.push(SimEvent::EnemyDefeated {
            id: entity.to_bits().get(),
            name,
            position,
            by_player,
        });

        if by_player {
            let stats = player.and_then(|p| world.query_one_mut::<&mut PlayerStats>(p).ok());
            if let Some(stats) = stats {
                stats.kills += 1;
            }
            if def.is_some_and(|d| d.corpse) {
                drop_corpse(
                    world,
                    pickups,
                    playfield,
                    max_corpses,
                    position,
                    enemy.xp_value,
                    events,
                );
            }
        }

        let _ = world.despawn(entity);
    }
}

/// Unclaimed corpses inside the playfield.
pub fn unclaimed_on_screen(world: &World, playfield: &Rect) -> usize {
    world
        .query::<(&Corpse, &Position)>()
        .iter()
        .filter(|(_, (corpse, pos))| !corpse.is_claimed() && playfield.contains(pos.0))
        .count()
}

/// Drop a corpse at `position`, or merge into the nearest unclaimed corpse
/// when the on-screen cap is reached.
pub fn drop_corpse(
    world: &mut World,
    pickups: &mut SlotRegistry,
    playfield: &Rect,
    max_corpses: usize,
    position: Vec2,
    xp_value: u32,
    events: &mut Vec<SimEvent>,
) {
    if unclaimed_on_screen(world, playfield) >= max_corpses {
        let nearest = world
            .query::<(&Corpse, &Position)>()
            .iter()
            .filter(|(_, (corpse, _))| !corpse.is_claimed() && !corpse.collected)
            .map(|(entity, (_, pos))| (entity, pos.0.distance_squared(position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity);

        if let Some(target) = nearest {
            if let Ok(mut corpse) = world.get::<&mut Corpse>(target) {
                corpse.xp_value += xp_value;
                events.push(SimEvent::CorpseMerged {
                    id: target.to_bits().get(),
                    xp_value: corpse.xp_value,
                });
                return;
            }
        }
    }

    let corpse = world_setup::spawn_corpse(world, position, xp_value);
    pickups.insert(corpse, |e| world.contains(e));
    events.push(SimEvent::CorpseDropped {
        id: corpse.to_bits().get(),
        position,
        xp_value,
    });
}

/// Mark a pickup as claimed by `claimer`.
pub fn claim(
    world: &mut World,
    pickup: Entity,
    claimer: Entity,
    claimer_pos: Vec2,
    events: &mut Vec<SimEvent>,
) -> bool {
    let Ok((corpse, pos, clock)) =
        world.query_one_mut::<(&mut Corpse, &Position, &ActorClock)>(pickup)
    else {
        return false;
    };
    if corpse.is_claimed() {
        return false;
    }
    corpse.picked_up_by = Some(claimer);
    corpse.claim_distance = pos.0.distance(claimer_pos);
    corpse.claimed_at_ms = clock.alive_ms;
    events.push(SimEvent::PickupClaimed {
        id: pickup.to_bits().get(),
    });
    true
}

/// Claim the first pickup in range, home claimed pickups, and collect the
/// ones that arrive. Returns the XP collected this tick.
pub fn run(
    world: &mut World,
    player: Option<Entity>,
    pickups: &SlotRegistry,
    dt_ms: f64,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let Some(player) = player else {
        return 0;
    };
    let Some((player_pos, reach_sq, alive)) = world
        .query_one_mut::<(&Position, &PlayerStats, &Health)>(player)
        .ok()
        .map(|(pos, stats, health)| (pos.0, stats.pickup_distance_sq, !health.defeated))
    else {
        return 0;
    };

    if alive {
        let in_range = pickups.iter().find(|&pickup| {
            let (Ok(corpse), Ok(pos)) =
                (world.get::<&Corpse>(pickup), world.get::<&Position>(pickup))
            else {
                return false;
            };
            !corpse.is_claimed() && pos.0.distance_squared(player_pos) <= reach_sq
        });
        if let Some(pickup) = in_range {
            claim(world, pickup, player, player_pos, events);
        }
    }

    let dt = dt_ms as f32;
    let mut collected_xp = 0;
    for (entity, (corpse, pos, clock)) in
        world.query_mut::<(&mut Corpse, &mut Position, &ActorClock)>()
    {
        if corpse.picked_up_by != Some(player) || corpse.collected {
            continue;
        }
        let claimed_for = (clock.alive_ms - corpse.claimed_at_ms) as f32;
        let speed = homing_speed(corpse.claim_distance, claimed_for);
        let to_player = player_pos - pos.0;
        let step = (speed * dt).min(to_player.length());
        pos.0 += to_player.normalize_or_zero() * step;

        if pos.0.distance_squared(player_pos) <= PICKUP_COLLECT_DISTANCE_SQ {
            corpse.collected = true;
            collected_xp += corpse.xp_value;
            events.push(SimEvent::PickupCollected {
                id: entity.to_bits().get(),
                xp: corpse.xp_value,
            });
        }
    }
    collected_xp
}

/// Homing speed of a claimed pickup: farther claims start faster, and every
/// pickup accelerates while it travels.
pub fn homing_speed(claim_distance: f32, since_claim_ms: f32) -> f32 {
    PICKUP_SPEED * (claim_distance / PICKUP_REFERENCE_DISTANCE).max(1.0)
        + PICKUP_ACCELERATION * since_claim_ms.max(0.0)
}
