//! Catalog and level loaders.
//!
//! Data files are camelCase JSON exported by the level tooling. Loading
//! validates cross references so the simulation can treat definitions
//! as trusted.

use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};

use crate::defs::{Catalog, LevelData};

/// Parse a catalog from JSON and validate it.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_str(json).context("parse catalog json")?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parse level tables from JSON and validate them.
pub fn parse_level(json: &str) -> Result<LevelData> {
    let level: LevelData = serde_json::from_str(json).context("parse level json")?;
    validate_level(&level)?;
    Ok(level)
}

/// Read and parse a catalog file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let txt = fs::read_to_string(path)
        .with_context(|| format!("read catalog: {}", path.display()))?;
    parse_catalog(&txt).with_context(|| format!("load catalog: {}", path.display()))
}

/// Read and parse a level file.
pub fn load_level(path: impl AsRef<Path>) -> Result<LevelData> {
    let path = path.as_ref();
    let txt =
        fs::read_to_string(path).with_context(|| format!("read level: {}", path.display()))?;
    parse_level(&txt).with_context(|| format!("load level: {}", path.display()))
}

/// Reject catalogs with dangling references or unusable stats.
pub fn validate_catalog(catalog: &Catalog) -> Result<()> {
    for weapon in &catalog.weapons {
        ensure!(
            weapon.base_spawn_interval_ms > 0.0,
            "weapon {} has a non-positive spawn interval",
            weapon.name
        );
        ensure!(
            weapon.amount() >= 1.0,
            "weapon {} must fire at least one projectile",
            weapon.name
        );
        if let Some(child) = &weapon.child {
            if catalog.weapon_index(&child.weapon).is_none() {
                bail!(
                    "weapon {} spawns unknown child weapon {}",
                    weapon.name,
                    child.weapon
                );
            }
        }
    }

    // Child chains must end.
    for weapon in &catalog.weapons {
        let mut next = weapon.child.as_ref();
        for _ in 0..catalog.weapons.len() {
            let Some(child) = next else { break };
            if child.weapon == weapon.name {
                bail!("weapon {} is its own descendant child weapon", weapon.name);
            }
            next = catalog
                .weapon_index(&child.weapon)
                .and_then(|index| catalog.weapons[index].child.as_ref());
        }
    }

    for character in &catalog.characters {
        if catalog.weapon_index(&character.starting_weapon).is_none() {
            bail!(
                "character {} starts with unknown weapon {}",
                character.name,
                character.starting_weapon
            );
        }
    }

    for enemy in &catalog.enemies {
        ensure!(enemy.health > 0.0, "enemy {} has no health", enemy.name);
    }

    Ok(())
}

/// Reject level tables that are not ordered ascending.
pub fn validate_level(level: &LevelData) -> Result<()> {
    for pair in level.wave_data.windows(2) {
        ensure!(
            pair[0].time_seconds <= pair[1].time_seconds,
            "wave data is not ordered by time ({} after {})",
            pair[1].time_seconds,
            pair[0].time_seconds
        );
    }
    for pair in level.spawn_timings.windows(2) {
        ensure!(
            pair[0].wave <= pair[1].wave,
            "spawn timings are not ordered by wave ({} after {})",
            pair[1].wave,
            pair[0].wave
        );
    }
    Ok(())
}
