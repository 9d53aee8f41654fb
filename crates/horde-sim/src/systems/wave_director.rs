//! Wave director: tracks the current wave and tops the enemy population up
//! to the wave's minimum on a fixed cadence.

use glam::Vec2;
use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use horde_core::components::{Enemy, Health};
use horde_core::constants::BASE_DIFFICULTY;
use horde_core::defs::{Catalog, EnemyDefinition, LevelData, WaveData, WaveTimingsData};
use horde_core::events::SimEvent;
use horde_core::types::Rect;

use crate::registry::SlotRegistry;
use crate::world_setup;

/// Wave progress carried between ticks.
#[derive(Debug, Clone)]
pub struct WaveDirector {
    /// 1-based wave number, 0 before the first wave row.
    pub wave: u32,
    pub difficulty: f32,
    pub spawn_check_interval_ms: f64,
    since_check_ms: f64,
    next_serial: u32,
}

impl WaveDirector {
    /// The first spawn check runs on the first tick.
    pub fn new(spawn_check_interval_ms: f64) -> Self {
        Self {
            wave: 0,
            difficulty: BASE_DIFFICULTY,
            spawn_check_interval_ms,
            since_check_ms: spawn_check_interval_ms,
            next_serial: 0,
        }
    }

    pub fn next_serial(&mut self) -> u32 {
        self.next_serial += 1;
        self.next_serial
    }
}

/// Index of the last wave row reached at `elapsed_ms`.
pub fn current_wave_index(waves: &[WaveData], elapsed_ms: f64) -> Option<usize> {
    waves
        .partition_point(|w| w.time_seconds * 1000.0 <= elapsed_ms)
        .checked_sub(1)
}

/// 1-based wave number, 0 before the first row.
pub fn wave_number(waves: &[WaveData], elapsed_ms: f64) -> u32 {
    current_wave_index(waves, elapsed_ms).map_or(0, |i| i as u32 + 1)
}

/// Difficulty scalar at `elapsed_ms`.
pub fn difficulty_at(waves: &[WaveData], elapsed_ms: f64) -> f32 {
    current_wave_index(waves, elapsed_ms).map_or(BASE_DIFFICULTY, |i| waves[i].difficulty)
}

/// Population rules in force for `wave`.
pub fn spawn_timings(timings: &[WaveTimingsData], wave: u32) -> Option<&WaveTimingsData> {
    let index = timings.partition_point(|t| t.wave <= wave).checked_sub(1)?;
    timings.get(index)
}

/// Enemy definitions a timings row allows, as catalog indices.
pub fn eligible_enemies(catalog: &Catalog, timings: &WaveTimingsData) -> Vec<usize> {
    catalog
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, def)| timings.allowed_enemies.iter().any(|n| *n == def.name))
        .filter(|(_, def)| timings.max_tier.map_or(true, |tier| def.difficulty <= tier))
        .map(|(i, _)| i)
        .collect()
}

/// A point just outside a random edge of the playfield.
pub fn edge_spawn_point(playfield: &Rect, def: &EnemyDefinition, rng: &mut ChaCha8Rng) -> Vec2 {
    let size = def.size();
    let along_x = playfield.min.x + rng.gen::<f32>() * playfield.width();
    let along_y = playfield.min.y + rng.gen::<f32>() * playfield.height();
    match rng.gen_range(0..4) {
        0 => Vec2::new(along_x, playfield.min.y - size.y),
        1 => Vec2::new(playfield.max.x + size.x, along_y),
        2 => Vec2::new(along_x, playfield.max.y + size.y),
        _ => Vec2::new(playfield.min.x - size.x, along_y),
    }
}

/// Count enemies that are still alive.
pub fn alive_enemies(world: &World) -> u32 {
    world
        .query::<(&Enemy, &Health)>()
        .iter()
        .filter(|(_, (_, health))| !health.defeated)
        .count() as u32
}

/// Update the wave and, on cadence, spawn the population deficit.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    director: &mut WaveDirector,
    catalog: &Catalog,
    level: &LevelData,
    enemies: &mut SlotRegistry,
    playfield: &Rect,
    rng: &mut ChaCha8Rng,
    elapsed_ms: f64,
    dt_ms: f64,
    events: &mut Vec<SimEvent>,
) {
    let wave = wave_number(&level.wave_data, elapsed_ms);
    director.difficulty = difficulty_at(&level.wave_data, elapsed_ms);
    if wave != director.wave {
        director.wave = wave;
        log::info!("wave {wave} started (difficulty {})", director.difficulty);
        events.push(SimEvent::WaveStarted {
            wave,
            difficulty: director.difficulty,
        });
    }

    director.since_check_ms += dt_ms;
    if director.since_check_ms < director.spawn_check_interval_ms {
        return;
    }
    director.since_check_ms = 0.0;

    let Some(timings) = spawn_timings(&level.spawn_timings, wave) else {
        log::error!("no spawn timings for wave {wave}");
        return;
    };
    let alive = alive_enemies(world);
    let mut deficit = timings.min_enemies.saturating_sub(alive);
    if timings.max_enemies > 0 {
        deficit = deficit.min(timings.max_enemies.saturating_sub(alive));
    }
    if deficit == 0 {
        return;
    }

    let eligible = eligible_enemies(catalog, timings);
    if eligible.is_empty() {
        log::error!("no eligible enemies for wave {wave}");
        return;
    }

    for _ in 0..deficit {
        let Some(&def_index) = eligible.choose(rng) else {
            break;
        };
        let def = &catalog.enemies[def_index];
        let position = edge_spawn_point(playfield, def, rng);
        let serial = director.next_serial();
        let entity = world_setup::spawn_enemy(
            world,
            def_index,
            def,
            position,
            wave,
            director.difficulty,
            serial,
        );
        enemies.insert(entity, |e| super::combat::is_alive(world, e));
        events.push(SimEvent::EnemySpawned {
            id: entity.to_bits().get(),
            name: def.name.clone(),
            position,
        });
    }
    log::debug!("spawned {deficit} enemies ({alive} alive)");
}
