//! Experience grants, upgrade offers, and applying the chosen upgrade.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use horde_core::components::{Experience, PlayerStats};
use horde_core::constants::UPGRADE_CHOICES;
use horde_core::defs::Catalog;
use horde_core::events::SimEvent;
use horde_core::upgrades::{UpgradeChoice, UpgradeOffer};
use horde_progression::apply::apply_attribute;
use horde_progression::rolling::{roll_upgrades, OwnedWeapon, RollContext};
use horde_progression::values::choice_label;
use horde_progression::xp;

use crate::components::{Loadout, WeaponState};
use crate::world_setup;

/// Add XP to the player. Returns how many levels were gained.
pub fn grant_xp(world: &mut World, player: Entity, amount: u32, events: &mut Vec<SimEvent>) -> u32 {
    if amount == 0 {
        return 0;
    }
    let Ok(experience) = world.query_one_mut::<&mut Experience>(player) else {
        return 0;
    };
    let levels = xp::grant_xp(experience, amount);
    events.push(SimEvent::XpGained {
        amount,
        total: experience.xp,
    });
    for &level in &levels {
        log::info!("player reached level {level}");
        events.push(SimEvent::LeveledUp { level });
    }
    levels.len() as u32
}

/// Player weapon entities in acquisition order, skipping any that are gone.
pub fn player_weapons(world: &World, player: Entity) -> Vec<Entity> {
    world
        .get::<&Loadout>(player)
        .map(|loadout| {
            loadout
                .weapons
                .iter()
                .copied()
                .filter(|w| world.contains(*w))
                .collect()
        })
        .unwrap_or_default()
}

/// Roll an upgrade offer for the player's current loadout.
pub fn roll_offer(
    world: &World,
    catalog: &Catalog,
    player: Entity,
    rng: &mut ChaCha8Rng,
) -> UpgradeOffer {
    let owned: Vec<OwnedWeapon<'_>> = player_weapons(world, player)
        .into_iter()
        .filter_map(|weapon| {
            let state = world.get::<&WeaponState>(weapon).ok()?;
            let def = catalog.weapons.get(state.def)?;
            Some(OwnedWeapon {
                name: &def.name,
                has_lifetime: state.stats.lifetime_ms.is_some(),
                behavior: def.spawn_behavior,
            })
        })
        .collect();
    let max_weapons = world
        .get::<&PlayerStats>(player)
        .map_or(0, |stats| stats.max_weapons);

    let ctx = RollContext {
        catalog: &catalog.weapons,
        owned: &owned,
        max_weapons,
    };
    roll_upgrades(&ctx, rng, UPGRADE_CHOICES)
}

/// Apply one choice to the player. Returns false if it could not be applied.
pub fn apply_choice(
    world: &mut World,
    catalog: &Catalog,
    player: Entity,
    choice: &UpgradeChoice,
    events: &mut Vec<SimEvent>,
) -> bool {
    let Some(def_index) = catalog.weapon_index(choice.weapon()) else {
        log::error!("upgrade refers to unknown weapon {}", choice.weapon());
        return false;
    };
    let def = &catalog.weapons[def_index];

    match choice {
        UpgradeChoice::NewWeapon { weapon } => {
            if world_setup::give_weapon(world, catalog, player, def_index).is_none() {
                return false;
            }
            events.push(SimEvent::WeaponAcquired {
                weapon: weapon.clone(),
            });
        }
        UpgradeChoice::Attribute {
            attribute, amount, ..
        } => {
            let owned = player_weapons(world, player).into_iter().find(|w| {
                world
                    .get::<&WeaponState>(*w)
                    .map_or(false, |state| state.def == def_index)
            });
            let Some(weapon) = owned else {
                log::error!("upgrade for {} which the player does not own", def.name);
                return false;
            };
            let Ok(mut state) = world.get::<&mut WeaponState>(weapon) else {
                return false;
            };
            if !apply_attribute(&mut state.stats, def, *attribute, *amount) {
                return false;
            }
        }
    }

    let label = match choice {
        UpgradeChoice::NewWeapon { .. } => def.label().to_string(),
        UpgradeChoice::Attribute { .. } => format!("{} {}", def.label(), choice_label(choice)),
    };
    log::info!("upgrade applied: {label}");
    events.push(SimEvent::UpgradeApplied { label });
    true
}
