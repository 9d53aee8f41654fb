//! Game state snapshot: the complete visible state handed to collaborators each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::SimTime;

/// Complete game state returned after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub players_only: bool,
    pub wave: WaveView,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub corpses: Vec<CorpseView>,
    pub gifts: Vec<GiftView>,
    pub exit: Option<Vec2>,
    /// Choices to present while the phase is `ChoosingUpgrade`.
    pub upgrade_offer: Vec<UpgradeChoiceView>,
    pub events: Vec<SimEvent>,
}

/// Wave progress.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// 1-based wave number; 0 before the first wave row elapses.
    pub number: u32,
    pub difficulty: f32,
    pub elapsed_secs: f64,
}

/// Player HUD data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub health_percent: f32,
    pub xp: u32,
    pub level: u32,
    /// Progress toward the next level in `[0, 1]`.
    pub xp_percent: f32,
    pub kills: u32,
    pub gifts_collected: u32,
    pub gifts_needed: u32,
    pub flip_horizontal: bool,
    pub flashing: bool,
    pub weapons: Vec<WeaponView>,
}

/// An equipped weapon and its running statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponView {
    pub name: String,
    pub damage: f32,
    pub speed: f32,
    pub size: f32,
    pub interval_ms: f64,
    pub amount: f32,
    pub lifetime_ms: Option<f64>,
    pub damage_dealt: f32,
    pub kills: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub name: String,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub flip_horizontal: bool,
    pub flashing: bool,
    pub sprite: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub weapon: String,
    pub position: Vec2,
    /// Sprite rotation in radians.
    pub rotation: f32,
    pub scale: f32,
    pub sprite: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpseView {
    pub id: u64,
    pub position: Vec2,
    pub xp_value: u32,
    pub claimed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GiftView {
    pub name: String,
    pub position: Vec2,
}

/// UI data for one upgrade choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeChoiceView {
    /// Weapon display name.
    pub name: String,
    /// Rolled bonus, e.g. "12% Damage"; empty for new weapons.
    pub label: String,
    pub rarity: Option<UpgradeRarity>,
    pub new_weapon: bool,
}
