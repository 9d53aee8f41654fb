//! Player and host commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// All possible player and host actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Run control ---
    /// Choose a character and start the run.
    StartRun { character: String },
    /// Pause gameplay.
    Pause,
    /// Resume gameplay.
    Resume,
    /// Toggle between paused and active.
    TogglePause,

    // --- Input ---
    /// Desired movement direction for the next ticks. Any source: keys, pointer drag, gamepad.
    SetMoveDirection { direction: Vec2 },

    // --- Collaborators ---
    /// Report the visible playfield rectangle.
    SetPlayfield { bounds: Rect },
    /// Apply one of the presented upgrade choices.
    ChooseUpgrade { index: usize },

    // --- Debug ---
    ToggleGodMode,
    ToggleDemigodMode,
    /// Freeze everything except the player.
    TogglePlayersOnly,
    /// Defeat every living enemy as if the player did it.
    KillAllEnemies,
    /// Claim every unclaimed pickup at once.
    ClaimAllPickups,
    /// Collect one remaining gift without walking to it.
    CollectGift,
    /// Roll and present an upgrade offer without leveling.
    ForceUpgradeRoll,
    /// Defeat the player.
    KillPlayer,
}
