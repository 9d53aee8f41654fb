//! Upgrade rolling: builds the set of choices offered on level-up.
//!
//! Each slot independently becomes either a new weapon or an attribute
//! upgrade of an owned weapon. Choices that could not be applied (a
//! lifetime bonus for a weapon without a lifetime, a speed bonus for a
//! weapon pinned to its owner) are never produced.

use rand::seq::SliceRandom;
use rand::Rng;

use horde_core::defs::WeaponDefinition;
use horde_core::enums::{SpawnBehavior, UpgradeAttribute, UpgradeRarity};
use horde_core::upgrades::{UpgradeChoice, UpgradeOffer};

use crate::rarity::roll_rarity;
use crate::values::value_range;

/// What the roller needs to know about one owned weapon.
#[derive(Debug, Clone, Copy)]
pub struct OwnedWeapon<'a> {
    pub name: &'a str,
    pub has_lifetime: bool,
    pub behavior: SpawnBehavior,
}

/// Inputs to a roll.
pub struct RollContext<'a> {
    /// Every weapon that exists.
    pub catalog: &'a [WeaponDefinition],
    /// Weapons the player already owns, in acquisition order.
    pub owned: &'a [OwnedWeapon<'a>],
    /// Weapon slots the player has.
    pub max_weapons: usize,
}

/// Whether `attribute` can be applied to `weapon`.
pub fn attribute_applies(attribute: UpgradeAttribute, weapon: &OwnedWeapon<'_>) -> bool {
    match attribute {
        UpgradeAttribute::Lifetime => weapon.has_lifetime,
        UpgradeAttribute::Speed => weapon.behavior != SpawnBehavior::OwnerLocation,
        _ => true,
    }
}

/// Roll up to `num_to_roll` choices. Slots with nothing valid to offer are dropped.
pub fn roll_upgrades<R: Rng + ?Sized>(
    ctx: &RollContext<'_>,
    rng: &mut R,
    num_to_roll: usize,
) -> UpgradeOffer {
    let rarities: Vec<UpgradeRarity> = (0..num_to_roll).map(|_| roll_rarity(rng)).collect();

    let mut attributes = UpgradeAttribute::ALL.to_vec();
    attributes.shuffle(rng);

    let mut offered_weapons: Vec<&str> = Vec::new();
    let mut choices = Vec::with_capacity(num_to_roll);

    for rarity in rarities {
        let available: Vec<&WeaponDefinition> = ctx
            .catalog
            .iter()
            .filter(|def| {
                !ctx.owned.iter().any(|w| w.name == def.name)
                    && !offered_weapons.contains(&def.name.as_str())
            })
            .collect();
        let can_get_new = !available.is_empty() && ctx.owned.len() < ctx.max_weapons;

        if can_get_new && (ctx.owned.is_empty() || rng.gen_bool(0.5)) {
            if let Some(&def) = available.choose(rng) {
                offered_weapons.push(def.name.as_str());
                choices.push(UpgradeChoice::NewWeapon {
                    weapon: def.name.clone(),
                });
            }
            continue;
        }

        let Some(weapon) = ctx.owned.choose(rng) else {
            // Nothing owned and nothing new to offer.
            continue;
        };
        let Some(attribute) = draw_attribute(&mut attributes, weapon) else {
            log::debug!("no applicable attribute left for {}; dropping slot", weapon.name);
            continue;
        };

        let amount = value_range(attribute, rarity).lerp(rng.gen::<f32>());
        choices.push(UpgradeChoice::Attribute {
            weapon: weapon.name.to_string(),
            attribute,
            rarity,
            amount,
        });
    }

    UpgradeOffer { choices }
}

/// Pop the next attribute that applies to `weapon`. Skipped attributes go
/// back into the pool so a later slot can still use them.
fn draw_attribute(
    pool: &mut Vec<UpgradeAttribute>,
    weapon: &OwnedWeapon<'_>,
) -> Option<UpgradeAttribute> {
    let mut skipped = Vec::new();
    let mut found = None;
    while let Some(attribute) = pool.pop() {
        if attribute_applies(attribute, weapon) {
            found = Some(attribute);
            break;
        }
        skipped.push(attribute);
    }
    pool.extend(skipped.into_iter().rev());
    found
}
