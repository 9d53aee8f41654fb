//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::{Entity, World};

use horde_core::components::*;
use horde_core::defs::Catalog;
use horde_core::enums::GamePhase;
use horde_core::events::SimEvent;
use horde_core::state::*;
use horde_core::types::SimTime;
use horde_core::upgrades::{UpgradeChoice, UpgradeOffer};
use horde_progression::values::choice_label;
use horde_progression::xp::xp_percent_to_next_level;

use crate::components::{Corpse, Projectile, WeaponState};
use crate::systems::leveling::player_weapons;
use crate::systems::wave_director::WaveDirector;

/// Everything outside the world the snapshot reports on.
pub struct SnapshotContext<'a> {
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub players_only: bool,
    pub director: &'a WaveDirector,
    pub catalog: &'a Catalog,
    pub player: Option<Entity>,
    pub offer: Option<&'a UpgradeOffer>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: &SnapshotContext<'_>,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *ctx.time,
        phase: ctx.phase,
        players_only: ctx.players_only,
        wave: WaveView {
            number: ctx.director.wave,
            difficulty: ctx.director.difficulty,
            elapsed_secs: ctx.time.elapsed_secs(),
        },
        player: ctx.player.and_then(|p| build_player(world, ctx.catalog, p)),
        enemies: build_enemies(world, ctx.catalog),
        projectiles: build_projectiles(world, ctx.catalog),
        corpses: build_corpses(world),
        gifts: build_gifts(world),
        exit: world
            .query::<(&LevelExit, &Position)>()
            .iter()
            .next()
            .map(|(_, (_, pos))| pos.0),
        upgrade_offer: ctx
            .offer
            .map(|offer| build_offer(ctx.catalog, offer))
            .unwrap_or_default(),
        events,
    }
}

fn build_player(world: &World, catalog: &Catalog, player: Entity) -> Option<PlayerView> {
    let position = world.get::<&Position>(player).ok()?.0;
    let health = *world.get::<&Health>(player).ok()?;
    let experience = *world.get::<&Experience>(player).ok()?;
    let stats = world.get::<&PlayerStats>(player).ok()?;
    let flip_horizontal = world
        .get::<&Motion>(player)
        .map_or(false, |m| m.flip_horizontal);

    let weapons = player_weapons(world, player)
        .into_iter()
        .filter_map(|weapon| {
            let state = world.get::<&WeaponState>(weapon).ok()?;
            let def = catalog.weapons.get(state.def)?;
            Some(WeaponView {
                name: def.label().to_string(),
                damage: state.stats.damage,
                speed: state.stats.speed,
                size: state.stats.size,
                interval_ms: state.stats.interval_ms,
                amount: state.stats.amount,
                lifetime_ms: state.stats.lifetime_ms,
                damage_dealt: state.damage_dealt,
                kills: state.kills,
            })
        })
        .collect();

    Some(PlayerView {
        position,
        health: health.current,
        max_health: health.max,
        health_percent: health.percent(),
        xp: experience.xp,
        level: experience.level,
        xp_percent: xp_percent_to_next_level(&experience),
        kills: stats.kills,
        gifts_collected: stats.gifts_collected,
        gifts_needed: stats.gifts_needed,
        flip_horizontal,
        flashing: health.flash_remaining_ms > 0.0,
        weapons,
    })
}

fn build_enemies(world: &World, catalog: &Catalog) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &Health, &Motion)>()
        .iter()
        .map(|(entity, (enemy, pos, health, motion))| {
            let def = catalog.enemies.get(enemy.def);
            EnemyView {
                id: entity.to_bits().get(),
                name: def.map(|d| d.name.clone()).unwrap_or_default(),
                position: pos.0,
                health: health.current,
                max_health: health.max,
                flip_horizontal: motion.flip_horizontal,
                flashing: health.flash_remaining_ms > 0.0,
                sprite: def.and_then(|d| d.sprite),
            }
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_projectiles(world: &World, catalog: &Catalog) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (projectile, _))| !projectile.expired)
        .map(|(entity, (projectile, pos))| {
            let def = world
                .get::<&WeaponState>(projectile.weapon)
                .ok()
                .and_then(|state| catalog.weapons.get(state.def));
            ProjectileView {
                id: entity.to_bits().get(),
                weapon: def.map(|d| d.name.clone()).unwrap_or_default(),
                position: pos.0,
                rotation: projectile.direction.y.atan2(projectile.direction.x),
                scale: projectile.size,
                sprite: def.and_then(|d| d.sprite),
            }
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_corpses(world: &World) -> Vec<CorpseView> {
    let mut corpses: Vec<CorpseView> = world
        .query::<(&Corpse, &Position)>()
        .iter()
        .filter(|(_, (corpse, _))| !corpse.collected)
        .map(|(entity, (corpse, pos))| CorpseView {
            id: entity.to_bits().get(),
            position: pos.0,
            xp_value: corpse.xp_value,
            claimed: corpse.is_claimed(),
        })
        .collect();

    corpses.sort_by_key(|c| c.id);
    corpses
}

fn build_gifts(world: &World) -> Vec<GiftView> {
    let mut gifts: Vec<GiftView> = world
        .query::<(&Gift, &Position)>()
        .iter()
        .map(|(_, (gift, pos))| GiftView {
            name: gift.name.clone(),
            position: pos.0,
        })
        .collect();

    gifts.sort_by(|a, b| a.name.cmp(&b.name));
    gifts
}

/// UI data for each choice of an offer.
pub fn build_offer(catalog: &Catalog, offer: &UpgradeOffer) -> Vec<UpgradeChoiceView> {
    offer
        .choices
        .iter()
        .map(|choice| {
            let name = catalog
                .weapon_index(choice.weapon())
                .map(|i| catalog.weapons[i].label().to_string())
                .unwrap_or_else(|| choice.weapon().to_string());
            match choice {
                UpgradeChoice::NewWeapon { .. } => UpgradeChoiceView {
                    name,
                    label: String::new(),
                    rarity: None,
                    new_weapon: true,
                },
                UpgradeChoice::Attribute { rarity, .. } => UpgradeChoiceView {
                    name,
                    label: choice_label(choice),
                    rarity: Some(*rarity),
                    new_weapon: false,
                },
            }
        })
        .collect()
}
