//! Applying a rolled attribute upgrade to a weapon's stat block.

use horde_core::components::WeaponStats;
use horde_core::constants::MIN_WEAPON_INTERVAL_MS;
use horde_core::defs::WeaponDefinition;
use horde_core::enums::UpgradeAttribute;

/// Mutate exactly one stat. Returns false when the upgrade could not be
/// applied (a lifetime bonus on a weapon without a lifetime).
pub fn apply_attribute(
    stats: &mut WeaponStats,
    def: &WeaponDefinition,
    attribute: UpgradeAttribute,
    amount: f32,
) -> bool {
    match attribute {
        UpgradeAttribute::Amount => stats.amount += amount,
        UpgradeAttribute::Damage => stats.damage += def.base_damage * amount,
        UpgradeAttribute::Interval => {
            stats.interval_ms =
                (stats.interval_ms + amount as f64 * 1000.0).max(MIN_WEAPON_INTERVAL_MS);
        }
        UpgradeAttribute::Lifetime => match stats.lifetime_ms.as_mut() {
            Some(lifetime) => *lifetime += amount as f64 * 1000.0,
            None => {
                log::error!(
                    "weapon {} told to apply a lifetime upgrade, but it has no lifetime",
                    def.name
                );
                return false;
            }
        },
        UpgradeAttribute::Size => stats.size += def.scale() * amount,
        UpgradeAttribute::Speed => stats.speed += amount,
    }
    true
}
