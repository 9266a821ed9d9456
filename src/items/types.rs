use super::stats::ItemStats;
use crate::rarity::{Multipliers, RarityTier, TierRegistry};
use serde::{Deserialize, Serialize};

/// Broad item class, assigned by the host's item classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Tool,
    Weapon,
    Armor,
    Shield,
    Toolkit,
    Other,
}

impl ItemCategory {
    /// Categories that can carry a rarity tier.
    pub fn is_enhanceable(&self) -> bool {
        matches!(
            self,
            ItemCategory::Tool | ItemCategory::Weapon | ItemCategory::Armor | ItemCategory::Shield
        )
    }
}

/// Rarity tag carried by an item. Only the key is stored; multipliers are
/// resolved from the registry each time they are needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedItemState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rarity: Option<String>,
}

impl EnhancedItemState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rarity(key: &str) -> Self {
        Self {
            rarity: Some(key.to_string()),
        }
    }

    pub fn rarity_key(&self) -> Option<&str> {
        self.rarity.as_deref()
    }

    pub fn is_enhanced(&self) -> bool {
        self.rarity.is_some()
    }

    /// Replace the tag, returning the previous key.
    pub fn set_rarity(&mut self, key: &str) -> Option<String> {
        self.rarity.replace(key.to_string())
    }

    /// The applied tier, or `None` for an item that was never enhanced.
    /// Stale keys resolve through the registry fallback.
    pub fn resolve<'r>(&self, registry: &'r TierRegistry) -> Option<(&'r str, &'r RarityTier)> {
        self.rarity.as_deref().map(|key| registry.lookup(key))
    }

    pub fn multipliers(&self, registry: &TierRegistry) -> Multipliers {
        self.resolve(registry)
            .map(|(_, tier)| tier.multipliers)
            .unwrap_or_else(Multipliers::identity)
    }
}

/// A stack of items in one inventory slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub category: ItemCategory,
    #[serde(default)]
    pub state: EnhancedItemState,
    #[serde(default)]
    pub base_stats: ItemStats,
}

fn default_quantity() -> u32 {
    1
}

impl ItemStack {
    pub fn new(code: &str, category: ItemCategory) -> Self {
        Self {
            code: code.to_string(),
            name: String::new(),
            quantity: 1,
            category,
            state: EnhancedItemState::new(),
            base_stats: ItemStats::default(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_stats(mut self, stats: ItemStats) -> Self {
        self.base_stats = stats;
        self
    }

    /// A toolkit stack of `quantity` units.
    pub fn toolkit(code: &str, quantity: u32) -> Self {
        Self::new(code, ItemCategory::Toolkit).with_quantity(quantity)
    }

    /// Display name, falling back to the item code.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.code
        } else {
            &self.name
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}
