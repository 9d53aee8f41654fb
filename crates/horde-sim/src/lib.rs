//! Simulation engine for Horde.
//!
//! Owns the hecs ECS world, runs all systems once per host frame,
//! and produces GameStateSnapshots for the renderer and HUD.

pub mod components;
pub mod engine;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use engine::{PlayerTuning, SimConfig, SimulationEngine};
pub use horde_core as core;
