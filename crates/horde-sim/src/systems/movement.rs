//! Movement: intents for walking actors, then kinematic integration.
//!
//! Intents are set each tick and cleared by integration:
//! position += clamp(intent, 1) * speed * dt, plus any knockback push.

use glam::Vec2;
use hecs::{Entity, World};

use horde_core::components::{Enemy, Health, Motion, Player, Position};

/// Set movement intents for the player (from input) and enemies (toward the
/// player, or away from it once it is defeated).
pub fn steer(world: &mut World, player: Option<Entity>, move_direction: Vec2, players_only: bool) {
    let target = player.and_then(|p| {
        let pos = world.get::<&Position>(p).ok()?.0;
        let defeated = world.get::<&Health>(p).map_or(true, |h| h.defeated);
        Some((pos, defeated))
    });

    for (_entity, (_player, motion, health)) in
        world.query_mut::<(&Player, &mut Motion, &Health)>()
    {
        motion.intent = if health.defeated {
            Vec2::ZERO
        } else {
            move_direction
        };
    }

    if players_only {
        return;
    }

    for (_entity, (_enemy, pos, motion, health)) in
        world.query_mut::<(&Enemy, &Position, &mut Motion, &Health)>()
    {
        if health.defeated {
            motion.intent = Vec2::ZERO;
            continue;
        }
        motion.intent = match target {
            Some((player_pos, false)) => (player_pos - pos.0).normalize_or_zero(),
            Some((player_pos, true)) => (pos.0 - player_pos).normalize_or_zero(),
            None => Vec2::ZERO,
        };
    }
}

/// Integrate intents into positions and resolve sprite facing.
pub fn integrate(world: &mut World, dt_ms: f64, players_only: bool) {
    let dt = dt_ms as f32;
    for (_entity, (pos, motion, player)) in
        world.query_mut::<(&mut Position, &mut Motion, Option<&Player>)>()
    {
        if players_only && player.is_none() {
            continue;
        }
        let direction = motion.intent.clamp_length_max(1.0);
        motion.velocity = direction * motion.speed;
        let push_ms = motion.knockback_ms.min(dt);
        pos.0 += motion.velocity * dt + motion.knockback * push_ms;
        motion.knockback_ms -= push_ms;
        if direction != Vec2::ZERO {
            motion.last_move = direction.normalize_or_zero();
            if motion.face_move_dir && direction.x != 0.0 {
                let faces_right = motion.sprite_facing.vector().x > 0.0;
                motion.flip_horizontal = (direction.x > 0.0) != faces_right;
            }
        }
        motion.intent = Vec2::ZERO;
    }
}

/// Direction an owner is facing: last movement, else its sprite facing.
pub fn facing_direction(motion: &Motion) -> Vec2 {
    if motion.last_move != Vec2::ZERO {
        return motion.last_move;
    }
    let facing = motion.sprite_facing.vector();
    if motion.flip_horizontal {
        -facing
    } else {
        facing
    }
}
