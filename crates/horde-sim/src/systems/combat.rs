//! Combat actor rules: damage application, invulnerability, per-tick clocks.

use hecs::World;

use horde_core::components::{ActorClock, Health, Player};
use horde_core::constants::DAMAGE_FLASH_MS;

/// What a damage call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// God mode, or the actor was already defeated.
    Ignored,
    /// Inside the invulnerability window.
    Suppressed,
    Damaged,
    /// This call defeated the actor. Returned at most once per actor.
    Defeated,
}

impl DamageOutcome {
    pub fn applied(self) -> bool {
        matches!(self, DamageOutcome::Damaged | DamageOutcome::Defeated)
    }
}

/// Apply `amount` damage to an actor.
///
/// The invulnerability window is measured on the actor's own clock, so time
/// spent paused never shortens it.
pub fn take_damage(
    health: &mut Health,
    clock: &ActorClock,
    amount: f32,
    by_player: bool,
    bypass_invulnerability: bool,
) -> DamageOutcome {
    if health.defeated || health.god_mode {
        return DamageOutcome::Ignored;
    }

    let mut amount = amount.max(0.0);
    if health.demigod_mode && health.current - amount <= 0.0 {
        amount = (health.current - 1.0).max(0.0);
    }

    if !bypass_invulnerability && health.invulnerability_ms > 0.0 {
        if let Some(last) = health.last_damaged_ms {
            if clock.alive_ms <= last + health.invulnerability_ms {
                return DamageOutcome::Suppressed;
            }
        }
    }

    health.last_damaged_by_player = by_player;
    health.current = (health.current - amount).clamp(0.0, health.max);
    health.last_damaged_ms = Some(clock.alive_ms);

    if health.current <= 0.0 {
        health.defeated = true;
        DamageOutcome::Defeated
    } else {
        health.flash_remaining_ms = DAMAGE_FLASH_MS;
        DamageOutcome::Damaged
    }
}

/// Reset per-tick damage attribution. Defeated actors keep theirs until
/// their defeat is processed.
pub fn begin_tick(world: &mut World) {
    for (_entity, health) in world.query_mut::<&mut Health>() {
        if !health.defeated {
            health.last_damaged_by_player = false;
        }
    }
}

/// Advance every actor's alive-time and flash countdown. In players-only
/// mode everything but the player stays frozen.
pub fn advance_clocks(world: &mut World, dt_ms: f64, players_only: bool) {
    for (_entity, (clock, player)) in world.query_mut::<(&mut ActorClock, Option<&Player>)>() {
        if players_only && player.is_none() {
            continue;
        }
        clock.alive_ms += dt_ms;
    }
    for (_entity, (health, player)) in world.query_mut::<(&mut Health, Option<&Player>)>() {
        if players_only && player.is_none() {
            continue;
        }
        health.flash_remaining_ms = (health.flash_remaining_ms - dt_ms).max(0.0);
    }
}

/// Whether `entity` exists and, if it is damageable, is not defeated.
pub fn is_alive(world: &World, entity: hecs::Entity) -> bool {
    match world.get::<&Health>(entity) {
        Ok(health) => !health.defeated,
        Err(_) => world.contains(entity),
    }
}
