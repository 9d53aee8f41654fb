//! Upgrade value ranges per attribute and rarity, and their labels.

use horde_core::enums::{UpgradeAttribute, UpgradeRarity};
use horde_core::upgrades::UpgradeChoice;

/// Inclusive range a rolled upgrade amount falls in.
///
/// `min` and `max` follow the table order, so for `Interval` (which must
/// shrink) `max` is the more negative bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Interpolate between the bounds with `t` in `[0, 1]`.
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t
    }
}

/// Rolled amount range for an attribute at a rarity.
///
/// Units: amount is a projectile count, damage and size are fractions of
/// the base value, interval and lifetime are seconds, speed is px/ms.
pub fn value_range(attribute: UpgradeAttribute, rarity: UpgradeRarity) -> ValueRange {
    use UpgradeAttribute as A;
    use UpgradeRarity as R;

    match (attribute, rarity) {
        (A::Amount, R::Common) => ValueRange::new(0.4, 0.8),
        (A::Amount, R::Uncommon) => ValueRange::new(0.7, 0.9),
        (A::Amount, R::Rare) => ValueRange::new(1.0, 1.4),
        (A::Amount, R::Epic) => ValueRange::new(1.5, 1.9),
        (A::Amount, R::Legendary) => ValueRange::new(1.7, 2.2),

        (A::Damage, R::Common) => ValueRange::new(0.02, 0.04),
        (A::Damage, R::Uncommon) => ValueRange::new(0.04, 0.07),
        (A::Damage, R::Rare) => ValueRange::new(0.06, 0.1),
        (A::Damage, R::Epic) => ValueRange::new(0.15, 0.25),
        (A::Damage, R::Legendary) => ValueRange::new(0.2, 0.35),

        (A::Interval, R::Common) => ValueRange::new(-0.05, -0.1),
        (A::Interval, R::Uncommon) => ValueRange::new(-0.1, -0.15),
        (A::Interval, R::Rare) => ValueRange::new(-0.15, -0.2),
        (A::Interval, R::Epic) => ValueRange::new(-0.2, -0.27),
        (A::Interval, R::Legendary) => ValueRange::new(-0.25, -0.32),

        (A::Lifetime, R::Common) => ValueRange::new(0.1, 0.3),
        (A::Lifetime, R::Uncommon) => ValueRange::new(0.25, 0.35),
        (A::Lifetime, R::Rare) => ValueRange::new(0.35, 0.45),
        (A::Lifetime, R::Epic) => ValueRange::new(0.4, 0.6),
        (A::Lifetime, R::Legendary) => ValueRange::new(0.7, 1.0),

        (A::Size, R::Common) => ValueRange::new(0.05, 0.1),
        (A::Size, R::Uncommon) => ValueRange::new(0.1, 0.15),
        (A::Size, R::Rare) => ValueRange::new(0.15, 0.2),
        (A::Size, R::Epic) => ValueRange::new(0.2, 0.25),
        (A::Size, R::Legendary) => ValueRange::new(0.25, 0.3),

        (A::Speed, R::Common) => ValueRange::new(0.1, 0.15),
        (A::Speed, R::Uncommon) => ValueRange::new(0.15, 0.2),
        (A::Speed, R::Rare) => ValueRange::new(0.2, 0.25),
        (A::Speed, R::Epic) => ValueRange::new(0.25, 0.3),
        (A::Speed, R::Legendary) => ValueRange::new(0.35, 0.4),
    }
}

/// Display units for an attribute's rolled amount.
pub fn units(attribute: UpgradeAttribute) -> &'static str {
    match attribute {
        UpgradeAttribute::Damage | UpgradeAttribute::Size => "%",
        UpgradeAttribute::Interval | UpgradeAttribute::Lifetime => "s",
        UpgradeAttribute::Speed | UpgradeAttribute::Amount => "",
    }
}

/// Format with one significant digit, the way the upgrade cards show it.
pub fn one_significant_digit(value: f32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (-exponent).max(0) as usize;
    let scale = 10f32.powi(exponent);
    let rounded = (value / scale).round() * scale;
    format!("{rounded:.decimals$}")
}

/// Card label for an attribute upgrade, e.g. `"12% Damage"` or `"-0.1s Interval"`.
pub fn attribute_label(attribute: UpgradeAttribute, amount: f32) -> String {
    let units = units(attribute);
    let amount = if units == "%" {
        format!("{}", (amount * 100.0).round() as i32)
    } else {
        one_significant_digit(amount)
    };
    format!("{amount}{units} {attribute:?}")
}

/// Card label for any choice. New weapons have no bonus label.
pub fn choice_label(choice: &UpgradeChoice) -> String {
    match choice {
        UpgradeChoice::NewWeapon { .. } => String::new(),
        UpgradeChoice::Attribute {
            attribute, amount, ..
        } => attribute_label(*attribute, *amount),
    }
}
