//! Cleanup system: removes expired projectiles (spawning on-death child
//! weapons), culled enemies, collected pickups, and finished weapons.

use glam::Vec2;
use hecs::{Entity, World};

use horde_core::components::{Collider, Enemy, Position};
use horde_core::constants::ENEMY_CULL_SIZE_MULTIPLE;
use horde_core::defs::Catalog;
use horde_core::enums::ChildTrigger;
use horde_core::types::Rect;

use crate::components::{Anchor, Corpse, Projectile, WeaponState};
use crate::systems::combat;
use crate::world_setup;

/// Remove everything that ended this tick.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    catalog: &Catalog,
    playfield: &Rect,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    remove_projectiles(world, catalog, playfield, despawn_buffer);

    // Enemies that wandered far outside the playfield.
    for (entity, (enemy, pos)) in world.query::<(&Enemy, &Position)>().iter() {
        let margin = catalog
            .enemies
            .get(enemy.def)
            .map_or(0.0, |def| def.width.max(def.height))
            * ENEMY_CULL_SIZE_MULTIPLE;
        if !playfield.expanded(margin).contains(pos.0) {
            despawn_buffer.push(entity);
        }
    }

    // Pickups that already paid out.
    for (entity, corpse) in world.query::<&Corpse>().iter() {
        if corpse.collected {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    remove_weapons(world, despawn_buffer);
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Despawn projectiles that expired or left the playfield, and start the
/// on-death child weapon of each.
fn remove_projectiles(
    world: &mut World,
    catalog: &Catalog,
    playfield: &Rect,
    despawn_buffer: &mut Vec<Entity>,
) {
    let dead: Vec<(Entity, Entity, Vec2)> = world
        .query::<(&Projectile, &Position, &Collider)>()
        .iter()
        .filter(|(_, (projectile, pos, collider))| {
            projectile.expired
                || !world.contains(projectile.weapon)
                || (!projectile.behavior.is_anchored()
                    && !playfield.expanded(collider.radius).contains(pos.0))
        })
        .map(|(entity, (projectile, pos, _))| (entity, projectile.weapon, pos.0))
        .collect();

    for (entity, weapon, position) in dead {
        let parent = world
            .get::<&WeaponState>(weapon)
            .ok()
            .map(|state| (state.def, state.stats, state.player_owned));
        if let Some((def, stats, player_owned)) = parent {
            let child = catalog
                .weapons
                .get(def)
                .and_then(|d| d.child.as_ref())
                .filter(|c| c.trigger == ChildTrigger::OnDeath);
            if let Some(child) = child {
                match catalog.weapon_index(&child.weapon) {
                    Some(child_def) => {
                        let anchor = world_setup::spawn_anchor(world, position);
                        world_setup::spawn_child_weapon(
                            world,
                            catalog,
                            child_def,
                            anchor,
                            &stats,
                            player_owned,
                        );
                    }
                    None => log::error!("unknown child weapon {}", child.weapon),
                }
            }
            if let Ok(mut state) = world.get::<&mut WeaponState>(weapon) {
                state.projectiles.retain(|p| *p != entity);
            }
        }
        despawn_buffer.push(entity);
    }
}

/// Queue weapons whose owner is gone (or that are spent). Weapons that
/// outlive their owner wait for their last projectile.
fn remove_weapons(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    let mut orphaned_projectiles = Vec::new();

    for (entity, state) in world.query::<&mut WeaponState>().iter() {
        state.projectiles.retain(|p| world.contains(*p));

        let owner_gone = !combat::is_alive(world, state.owner);
        if !owner_gone && !state.spent() {
            continue;
        }
        if state.outlive_owner || state.fire_once {
            if state.projectiles.is_empty() {
                despawn_buffer.push(entity);
                if world.get::<&Anchor>(state.owner).is_ok() {
                    despawn_buffer.push(state.owner);
                }
            }
        } else {
            despawn_buffer.push(entity);
            orphaned_projectiles.extend(state.projectiles.iter().copied());
        }
    }

    for projectile in orphaned_projectiles {
        if let Ok(mut p) = world.get::<&mut Projectile>(projectile) {
            p.expired = true;
        }
    }
}
