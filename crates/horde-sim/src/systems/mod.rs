//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They own no state. All state lives in components and the engine.

pub mod cleanup;
pub mod collision;
pub mod combat;
pub mod corpses;
pub mod leveling;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod wave_director;
pub mod weapons;
