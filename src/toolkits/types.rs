use crate::selection::WeightedPool;
use serde::{Deserialize, Serialize};

/// One crafting input for a toolkit. Informational to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInput {
    pub item_code: String,
    pub quantity: u32,
}

impl ToolInput {
    pub fn new(item_code: &str, quantity: u32) -> Self {
        Self {
            item_code: item_code.to_string(),
            quantity,
        }
    }
}

/// A consumable toolkit and the rarity pool it draws from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolkitTier {
    /// Item code of the physical toolkit, e.g. `itemrarity:toolkit-tier1`.
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<ToolInput>,
    #[serde(default)]
    pub rarity_weights: WeightedPool,
}

impl ToolkitTier {
    /// The part of the code after the `domain:` prefix.
    pub fn code_path(&self) -> &str {
        self.code
            .split_once(':')
            .map(|(_, path)| path)
            .unwrap_or(&self.code)
    }

    /// Held-item label, e.g. `Stone Age Kit (Toolkit)`.
    pub fn held_name(&self, base_name: &str) -> String {
        if self.name.is_empty() {
            base_name.to_string()
        } else {
            format!("{} ({})", self.name, base_name)
        }
    }
}
