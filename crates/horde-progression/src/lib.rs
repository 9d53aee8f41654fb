//! Progression rules for Horde.
//!
//! Experience curve, upgrade rarity tiers and value tables, upgrade
//! rolling, and applying a rolled upgrade to a weapon's stat block.
//! No ECS dependency; operates on plain data.

pub mod apply;
pub mod rarity;
pub mod rolling;
pub mod values;
pub mod xp;

pub use horde_core as core;

#[cfg(test)]
mod tests;
