//! Rarity tiers and weighted sampling.

use rand::Rng;

use horde_core::enums::UpgradeRarity;

/// Probability of each tier. Sums to 1.
pub fn rarity_weight(rarity: UpgradeRarity) -> f64 {
    match rarity {
        UpgradeRarity::Common => 0.5,
        UpgradeRarity::Uncommon => 0.3,
        UpgradeRarity::Rare => 0.15,
        UpgradeRarity::Epic => 0.04,
        UpgradeRarity::Legendary => 0.01,
    }
}

/// Map one uniform draw in `[0, 1)` to a tier by cumulative weight.
pub fn rarity_for_roll(roll: f64) -> UpgradeRarity {
    let mut sum = 0.0;
    for rarity in UpgradeRarity::ALL {
        sum += rarity_weight(rarity);
        if roll <= sum {
            return rarity;
        }
    }
    UpgradeRarity::Common
}

/// Sample a tier with one uniform draw.
pub fn roll_rarity<R: Rng + ?Sized>(rng: &mut R) -> UpgradeRarity {
    rarity_for_roll(rng.gen::<f64>())
}
