//! Simulation constants and tuning parameters.
//!
//! Units: pixels, milliseconds, pixels per millisecond.

// --- Playfield ---

/// Default visible playfield width until the renderer reports one.
pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 1920.0;

/// Default visible playfield height until the renderer reports one.
pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 1080.0;

/// Enemies further than this many sprite sizes outside the playfield are culled.
pub const ENEMY_CULL_SIZE_MULTIPLE: f32 = 3.0;

// --- Waves ---

/// Spawn checks run on this cadence of simulated time.
pub const SPAWN_CHECK_INTERVAL_MS: f64 = 1000.0;

/// Difficulty scalar used before the first wave row has elapsed.
pub const BASE_DIFFICULTY: f32 = 1.0;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f32 = 10.0;

pub const PLAYER_INVULNERABILITY_MS: f64 = 300.0;

pub const PLAYER_SPEED: f32 = 0.6;

pub const PLAYER_MAX_WEAPONS: usize = 3;

/// Squared distance within which the player claims a pickup.
pub const PLAYER_PICKUP_DISTANCE_SQ: f32 = 200.0 * 200.0;

pub const PLAYER_RADIUS: f32 = 24.0;

/// Damage dealt to the player by touching an enemy.
pub const ENEMY_CONTACT_DAMAGE: f32 = 1.0;

// --- Enemies ---

/// Speed multiplier applied to every enemy definition's speed.
pub const ENEMY_BASE_SPEED: f32 = 0.35;

// --- Combat feedback ---

/// Speed a projectile hit pushes an enemy away with (px/ms).
pub const KNOCKBACK_SPEED: f32 = 0.2;

/// How long a knockback push lasts.
pub const KNOCKBACK_MS: f32 = 100.0;

/// Length of the white damage flash (cosmetic).
pub const DAMAGE_FLASH_MS: f64 = 150.0;

// --- Weapons ---

/// Floor for a weapon's spawn interval after upgrades.
pub const MIN_WEAPON_INTERVAL_MS: f64 = 50.0;

/// Lower bound for a delayed (fractional amount) spawn.
pub const MULTI_SPAWN_DELAY_MS: f64 = 100.0;

/// Maximum random rotation for owner-facing bursts of more than one projectile.
pub const OWNER_FACING_VARIANCE_DEGREES: f32 = 5.0;

/// Living projectiles allowed per weapon before the oldest is removed.
pub const MAX_LIVING_PROJECTILES: usize = 75;

/// Orbit radius around the owner, before size scaling.
pub const ORBIT_RADIUS: f32 = 150.0;

/// Orbit radius fades in after spawn and out before expiry over this window.
pub const ORBIT_FADE_MS: f64 = 250.0;

/// Lifetime applied to orbit and owner-anchored projectiles without one.
pub const ANCHORED_DEFAULT_LIFETIME_MS: f64 = 3000.0;

/// Persistent projectiles may hit the same enemy again after this long.
pub const PROJECTILE_RETRIGGER_MS: f64 = 500.0;

/// Tracking projectiles pick a new target among this many closest enemies.
pub const RETARGET_CANDIDATES: usize = 3;

/// Fallback direction for owner-facing weapons whose owner never moved.
pub const FALLBACK_FACING: glam::Vec2 = glam::Vec2::X;

// --- Corpses & pickups ---

/// Maximum unclaimed corpses visible on screen before kills merge.
pub const MAX_ON_SCREEN_CORPSES: usize = 350;

/// Base homing speed of a claimed pickup.
pub const PICKUP_SPEED: f32 = 0.5;

/// Homing acceleration of a claimed pickup (px/ms²).
pub const PICKUP_ACCELERATION: f32 = 0.002;

/// Claim distance at which pickups home at base speed; farther claims home faster.
pub const PICKUP_REFERENCE_DISTANCE: f32 = 200.0;

/// Squared distance at which a homing pickup is collected.
pub const PICKUP_COLLECT_DISTANCE_SQ: f32 = 25.0 * 25.0;

pub const CORPSE_RADIUS: f32 = 16.0;

// --- Objectives ---

pub const GIFT_RADIUS: f32 = 24.0;

pub const EXIT_RADIUS: f32 = 48.0;

// --- Progression ---

/// Offer slots rolled per level-up.
pub const UPGRADE_CHOICES: usize = 3;
