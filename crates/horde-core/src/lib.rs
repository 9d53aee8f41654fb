//! Core types and definitions for the Horde arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, catalog definitions, commands, state snapshots, events,
//! and constants. It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod defs;
pub mod enums;
pub mod events;
pub mod loader;
pub mod state;
pub mod types;
pub mod upgrades;

#[cfg(test)]
mod tests;
