//! The simulation engine: owns the world and drives one tick per host frame.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless
//! (no renderer dependency), enabling deterministic testing.

use std::collections::VecDeque;

use anyhow::Result;
use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use horde_core::commands::PlayerCommand;
use horde_core::components::{Enemy, Gift, Health, PlayerStats, Position};
use horde_core::constants::*;
use horde_core::defs::{Catalog, LevelData};
use horde_core::enums::GamePhase;
use horde_core::events::SimEvent;
use horde_core::loader;
use horde_core::state::GameStateSnapshot;
use horde_core::types::{Rect, SimTime};
use horde_core::upgrades::UpgradeOffer;

use crate::components::Corpse;
use crate::registry::SlotRegistry;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::wave_director::WaveDirector;
use crate::world_setup;

/// Player tuning applied when a run starts.
#[derive(Debug, Clone)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub invulnerability_ms: f64,
    /// Pixels per millisecond.
    pub speed: f32,
    pub max_weapons: usize,
    pub pickup_distance_sq: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            invulnerability_ms: PLAYER_INVULNERABILITY_MS,
            speed: PLAYER_SPEED,
            max_weapons: PLAYER_MAX_WEAPONS,
            pickup_distance_sq: PLAYER_PICKUP_DISTANCE_SQ,
        }
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Visible playfield until the renderer reports one.
    pub playfield: Rect,
    /// Unclaimed on-screen corpses allowed before kills merge.
    pub max_corpses: usize,
    pub spawn_check_interval_ms: f64,
    pub player: PlayerTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            playfield: Rect::default(),
            max_corpses: MAX_ON_SCREEN_CORPSES,
            spawn_check_interval_ms: SPAWN_CHECK_INTERVAL_MS,
            player: PlayerTuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    config: SimConfig,
    catalog: Catalog,
    level: LevelData,
    playfield: Rect,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,

    player: Option<Entity>,
    move_direction: Vec2,
    players_only: bool,
    director: WaveDirector,
    enemies: SlotRegistry,
    pickups: SlotRegistry,

    pending_level_ups: u32,
    offer: Option<UpgradeOffer>,
}

impl SimulationEngine {
    /// Create a new simulation engine over trusted definitions.
    pub fn new(config: SimConfig, catalog: Catalog, level: LevelData) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            playfield: config.playfield,
            director: WaveDirector::new(config.spawn_check_interval_ms),
            config,
            catalog,
            level,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            player: None,
            move_direction: Vec2::ZERO,
            players_only: false,
            enemies: SlotRegistry::new(),
            pickups: SlotRegistry::new(),
            pending_level_ups: 0,
            offer: None,
        }
    }

    /// Parse and validate catalog and level JSON, then create the engine.
    pub fn from_json(config: SimConfig, catalog_json: &str, level_json: &str) -> Result<Self> {
        let catalog = loader::parse_catalog(catalog_json)?;
        let level = loader::parse_level(level_json)?;
        Ok(Self::new(config, catalog, level))
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `elapsed_ms` and return the resulting snapshot.
    ///
    /// While paused (or choosing an upgrade) nothing advances: not the
    /// clock, not fire timers, not invulnerability windows.
    pub fn tick(&mut self, elapsed_ms: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.gameplay_running() {
            let dt = if elapsed_ms.is_finite() {
                elapsed_ms.max(0.0)
            } else {
                0.0
            };
            self.run_systems(dt);
            self.time.advance(dt);
            self.check_run_state();
            self.present_next_offer();
        }

        let events = std::mem::take(&mut self.events);
        let ctx = SnapshotContext {
            time: &self.time,
            phase: self.phase,
            players_only: self.players_only,
            director: &self.director,
            catalog: &self.catalog,
            player: self.player,
            offer: self.offer.as_ref(),
        };
        systems::snapshot::build_snapshot(&self.world, &ctx, events)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The player entity, once a run has started.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// The offer waiting for a choice, if any.
    pub fn offer(&self) -> Option<&UpgradeOffer> {
        self.offer.as_ref()
    }

    /// Level-ups still waiting for their offer.
    pub fn pending_level_ups(&self) -> u32 {
        self.pending_level_ups
    }

    /// Mutable world access for tests that stage exact situations.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn a specific enemy at a position with a given difficulty scalar.
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        name: &str,
        position: Vec2,
        difficulty: f32,
    ) -> Option<Entity> {
        let def_index = self.catalog.enemy_index(name)?;
        let serial = self.director.next_serial();
        let entity = world_setup::spawn_enemy(
            &mut self.world,
            def_index,
            &self.catalog.enemies[def_index],
            position,
            self.director.wave,
            difficulty,
            serial,
        );
        let world = &self.world;
        self.enemies.insert(entity, |e| systems::combat::is_alive(world, e));
        Some(entity)
    }

    /// Apply an upgrade choice to the player without going through an offer.
    #[cfg(test)]
    pub fn apply_upgrade(&mut self, choice: &horde_core::upgrades::UpgradeChoice) -> bool {
        let Some(player) = self.player else {
            return false;
        };
        systems::leveling::apply_choice(
            &mut self.world,
            &self.catalog,
            player,
            choice,
            &mut self.events,
        )
    }

    /// Registry of enemy slots.
    #[cfg(test)]
    pub fn enemy_registry(&self) -> &SlotRegistry {
        &self.enemies
    }

    /// Registry of pickup slots.
    #[cfg(test)]
    pub fn pickup_registry(&self) -> &SlotRegistry {
        &self.pickups
    }

    fn gameplay_running(&self) -> bool {
        matches!(self.phase, GamePhase::Active | GamePhase::Defeated)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun { character } => {
                if self.phase == GamePhase::CharacterSelect {
                    self.start_run(&character);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::TogglePause => match self.phase {
                GamePhase::Active => self.phase = GamePhase::Paused,
                GamePhase::Paused => self.phase = GamePhase::Active,
                _ => {}
            },
            PlayerCommand::SetMoveDirection { direction } => {
                self.move_direction = if direction.is_finite() {
                    direction.clamp_length_max(1.0)
                } else {
                    Vec2::ZERO
                };
            }
            PlayerCommand::SetPlayfield { bounds } => {
                self.playfield = bounds;
            }
            PlayerCommand::ChooseUpgrade { index } => self.choose_upgrade(index),
            PlayerCommand::ToggleGodMode => {
                if let Some(health) = self.player_health_mut() {
                    health.god_mode = !health.god_mode;
                    log::info!("god mode {}", health.god_mode);
                }
            }
            PlayerCommand::ToggleDemigodMode => {
                if let Some(health) = self.player_health_mut() {
                    health.demigod_mode = !health.demigod_mode;
                    log::info!("demigod mode {}", health.demigod_mode);
                }
            }
            PlayerCommand::TogglePlayersOnly => {
                self.players_only = !self.players_only;
                log::info!("players only {}", self.players_only);
            }
            PlayerCommand::KillAllEnemies => self.kill_all_enemies(),
            PlayerCommand::ClaimAllPickups => self.claim_all_pickups(),
            PlayerCommand::CollectGift => self.collect_any_gift(),
            PlayerCommand::ForceUpgradeRoll => {
                if self.phase == GamePhase::Active && self.offer.is_none() {
                    self.present_offer();
                }
            }
            PlayerCommand::KillPlayer => {
                if let Some(health) = self.player_health_mut() {
                    health.current = 0.0;
                    health.defeated = true;
                }
                self.check_run_state();
            }
        }
    }

    fn start_run(&mut self, character: &str) {
        let Some(def) = self.catalog.character(character).cloned() else {
            log::error!("unknown character {character}");
            return;
        };

        self.world.clear();
        self.enemies.clear();
        self.pickups.clear();
        self.events.clear();
        self.director = WaveDirector::new(self.config.spawn_check_interval_ms);
        self.pending_level_ups = 0;
        self.offer = None;
        self.time = SimTime::default();

        let player = world_setup::setup_run(
            &mut self.world,
            &self.catalog,
            &self.level,
            &def,
            &self.config.player,
            &mut self.rng,
        );
        self.player = Some(player);
        self.phase = GamePhase::Active;
        log::info!("run started as {}", def.name);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let players_only = self.players_only;
        let player_alive = self
            .player
            .is_some_and(|p| systems::combat::is_alive(&self.world, p));

        // 1. Damage attribution reset
        systems::combat::begin_tick(&mut self.world);
        // 2. Wave director
        if !players_only && player_alive {
            systems::wave_director::run(
                &mut self.world,
                &mut self.director,
                &self.catalog,
                &self.level,
                &mut self.enemies,
                &self.playfield,
                &mut self.rng,
                self.time.elapsed_ms,
                dt,
                &mut self.events,
            );
        }
        // 3. Movement intents
        systems::movement::steer(&mut self.world, self.player, self.move_direction, players_only);
        if !players_only {
            // 4. Weapons fire
            systems::weapons::run(&mut self.world, &self.catalog, &mut self.rng);
            // 5. Projectile steering and lifetime
            systems::projectiles::run(&mut self.world, &mut self.rng, dt);
        }
        // 6. Movement integration
        systems::movement::integrate(&mut self.world, dt, players_only);
        // 7. Collisions
        systems::collision::run(&mut self.world, self.player, &mut self.events);
        // 8. Defeated enemies and corpses
        systems::corpses::process_defeated(
            &mut self.world,
            &self.catalog,
            self.player,
            &mut self.pickups,
            &self.playfield,
            self.config.max_corpses,
            &mut self.events,
        );
        // 9. Pickups and experience
        let xp = systems::corpses::run(
            &mut self.world,
            self.player,
            &self.pickups,
            dt,
            &mut self.events,
        );
        if let Some(player) = self.player {
            self.pending_level_ups +=
                systems::leveling::grant_xp(&mut self.world, player, xp, &mut self.events);
        }
        // 10. Alive-time
        systems::combat::advance_clocks(&mut self.world, dt, players_only);
        // 11. Cleanup
        systems::cleanup::run(
            &mut self.world,
            &self.catalog,
            &self.playfield,
            &mut self.despawn_buffer,
        );
    }

    /// Move to a terminal phase when the player is defeated or has left the level.
    fn check_run_state(&mut self) {
        let Some(player) = self.player else {
            return;
        };

        let defeated = self
            .world
            .get::<&Health>(player)
            .map_or(false, |h| h.defeated);
        if defeated && self.phase != GamePhase::Defeated {
            log::info!("player defeated at {:.1}s", self.time.elapsed_secs());
            self.phase = GamePhase::Defeated;
            self.offer = None;
            self.pending_level_ups = 0;
            self.events.push(SimEvent::PlayerDefeated);
            return;
        }

        let reached_exit = self
            .world
            .get::<&PlayerStats>(player)
            .map_or(false, |s| s.reached_exit);
        if reached_exit && self.phase == GamePhase::Active {
            self.phase = GamePhase::LevelComplete;
        }
    }

    /// Present the next queued level-up offer when none is showing.
    fn present_next_offer(&mut self) {
        if self.phase == GamePhase::Active && self.offer.is_none() && self.pending_level_ups > 0 {
            self.pending_level_ups -= 1;
            self.present_offer();
        }
    }

    fn present_offer(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let offer =
            systems::leveling::roll_offer(&self.world, &self.catalog, player, &mut self.rng);
        if offer.is_empty() {
            log::warn!("nothing to offer on level-up");
            return;
        }
        self.events.push(SimEvent::UpgradeOfferReady {
            choices: offer.len(),
        });
        self.offer = Some(offer);
        self.phase = GamePhase::ChoosingUpgrade;
    }

    fn choose_upgrade(&mut self, index: usize) {
        if self.phase != GamePhase::ChoosingUpgrade {
            return;
        }
        let (Some(player), Some(offer)) = (self.player, self.offer.as_ref()) else {
            return;
        };
        let Some(choice) = offer.choices.get(index).cloned() else {
            log::error!("upgrade choice {index} out of range ({} offered)", offer.len());
            return;
        };

        systems::leveling::apply_choice(
            &mut self.world,
            &self.catalog,
            player,
            &choice,
            &mut self.events,
        );
        self.offer = None;
        self.phase = GamePhase::Active;
        self.present_next_offer();
    }

    fn player_health_mut(&mut self) -> Option<&mut Health> {
        let player = self.player?;
        self.world.query_one_mut::<&mut Health>(player).ok()
    }

    fn kill_all_enemies(&mut self) {
        for (_entity, (_enemy, health)) in self.world.query_mut::<(&Enemy, &mut Health)>() {
            if !health.defeated {
                health.current = 0.0;
                health.defeated = true;
                health.last_damaged_by_player = true;
            }
        }
    }

    fn collect_any_gift(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let gift = self
            .world
            .query::<&Gift>()
            .iter()
            .map(|(entity, _)| entity)
            .min_by_key(|entity| entity.id());
        if let Some(gift) = gift {
            systems::collision::collect_gift(&mut self.world, player, gift, &mut self.events);
        }
    }

    fn claim_all_pickups(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let Ok(player_pos) = self
            .world
            .get::<&Position>(player)
            .map(|p| p.0)
        else {
            return;
        };
        let pickups: Vec<Entity> = self.pickups.iter().collect();
        for pickup in pickups {
            let unclaimed = self
                .world
                .get::<&Corpse>(pickup)
                .map_or(false, |c| !c.is_claimed());
            if unclaimed {
                systems::corpses::claim(
                    &mut self.world,
                    pickup,
                    player,
                    player_pos,
                    &mut self.events,
                );
            }
        }
    }
}
