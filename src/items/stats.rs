use super::types::ItemStack;
use crate::rarity::{Multipliers, TierRegistry};
use serde::{Deserialize, Serialize};

/// Base attributes of an item. Zero means the item has no such stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStats {
    pub durability: f64,
    pub mining_speed: f64,
    pub attack_power: f64,
    pub piercing_power: f64,
    pub armor_flat_damage_reduction: f64,
    pub armor_per_tier_flat_damage_protection_loss: f64,
    pub armor_relative_protection: f64,
    pub armor_per_tier_relative_protection_loss: f64,
    pub shield_protection: f64,
}

impl ItemStats {
    pub fn scaled(&self, m: &Multipliers) -> Self {
        Self {
            durability: self.durability * m.durability,
            mining_speed: self.mining_speed * m.mining_speed,
            attack_power: self.attack_power * m.attack_power,
            piercing_power: self.piercing_power * m.piercing_power,
            armor_flat_damage_reduction: self.armor_flat_damage_reduction
                * m.armor_flat_damage_reduction,
            armor_per_tier_flat_damage_protection_loss: self
                .armor_per_tier_flat_damage_protection_loss
                * m.armor_per_tier_flat_damage_protection_loss,
            armor_relative_protection: self.armor_relative_protection
                * m.armor_relative_protection,
            armor_per_tier_relative_protection_loss: self.armor_per_tier_relative_protection_loss
                * m.armor_per_tier_relative_protection_loss,
            shield_protection: self.shield_protection * m.shield_protection,
        }
    }

    /// Max durability as the host counts it (whole points).
    pub fn durability_points(&self) -> u32 {
        self.durability.round().max(0.0) as u32
    }
}

/// Stats after applying the item's current tier to its base stats.
///
/// Always computed from the base values, so re-rolls never compound.
pub fn effective_stats(item: &ItemStack, registry: &TierRegistry) -> ItemStats {
    item.base_stats.scaled(&item.state.multipliers(registry))
}
