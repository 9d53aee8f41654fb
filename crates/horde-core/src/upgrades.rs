//! Upgrade offers presented on level-up.

use serde::{Deserialize, Serialize};

use crate::enums::{UpgradeAttribute, UpgradeRarity};

/// One candidate in an upgrade offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UpgradeChoice {
    /// Acquire a weapon the player does not own yet.
    NewWeapon { weapon: String },
    /// Improve one attribute of an owned weapon.
    Attribute {
        weapon: String,
        attribute: UpgradeAttribute,
        rarity: UpgradeRarity,
        amount: f32,
    },
}

impl UpgradeChoice {
    /// Name of the weapon this choice refers to.
    pub fn weapon(&self) -> &str {
        match self {
            UpgradeChoice::NewWeapon { weapon } => weapon,
            UpgradeChoice::Attribute { weapon, .. } => weapon,
        }
    }
}

/// A transient set of 1 to 3 choices. Discarded once one is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOffer {
    pub choices: Vec<UpgradeChoice>,
}

impl UpgradeOffer {
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }
}
