//! Events emitted by the simulation for UI and audio hooks.
//!
//! Events are queued in emission order during a tick and drained into
//! that tick's snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Notifications for collaborators (HUD, audio, effects).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new wave started (1-based wave number).
    WaveStarted { wave: u32, difficulty: f32 },
    /// An enemy spawned at the playfield edge.
    EnemySpawned { id: u64, name: String, position: Vec2 },
    /// An enemy reached zero health or was destroyed by touching the player.
    EnemyDefeated {
        id: u64,
        name: String,
        position: Vec2,
        by_player: bool,
    },
    /// The player lost health.
    PlayerDamaged { health: f32, max_health: f32 },
    /// The player was defeated.
    PlayerDefeated,
    /// A corpse was dropped at a kill site.
    CorpseDropped { id: u64, position: Vec2, xp_value: u32 },
    /// A kill was folded into an existing corpse because of the on-screen cap.
    CorpseMerged { id: u64, xp_value: u32 },
    /// The player claimed a corpse; it now homes toward them.
    PickupClaimed { id: u64 },
    /// A claimed corpse reached the player.
    PickupCollected { id: u64, xp: u32 },
    /// XP was added to the player.
    XpGained { amount: u32, total: u32 },
    /// One event per level crossed, in increasing order.
    LeveledUp { level: u32 },
    /// An upgrade offer is waiting for a choice.
    UpgradeOfferReady { choices: usize },
    /// A choice from the offer was applied.
    UpgradeApplied { label: String },
    /// The player received a new weapon.
    WeaponAcquired { weapon: String },
    /// A gift was collected.
    GiftCollected { collected: u32, needed: u32 },
    /// Every gift in the level has been collected.
    AllGiftsCollected,
    /// The player reached the exit with all gifts.
    LevelComplete,
}
