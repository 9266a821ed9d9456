use super::types::{ToolInput, ToolkitTier};
use crate::selection::WeightedPool;

fn toolkit(code: &str, name: &str, inputs: &[(&str, u32)], weights: &[(&str, f64)]) -> ToolkitTier {
    ToolkitTier {
        code: code.to_string(),
        name: name.to_string(),
        inputs: inputs
            .iter()
            .map(|(item, qty)| ToolInput::new(item, *qty))
            .collect(),
        rarity_weights: WeightedPool::from_pairs(weights),
    }
}

/// Five progression toolkits, from stone to steel.
pub fn default_toolkits() -> Vec<ToolkitTier> {
    vec![
        toolkit(
            "itemrarity:toolkit-tier1",
            "Stone Age Kit",
            &[("game:flint", 5), ("game:stone", 10)],
            &[("common", 75.0), ("uncommon", 25.0)],
        ),
        toolkit(
            "itemrarity:toolkit-tier2",
            "Copper Age Kit",
            &[("game:ingot-copper", 2), ("game:resin", 3)],
            &[("uncommon", 70.0), ("rare", 30.0)],
        ),
        toolkit(
            "itemrarity:toolkit-tier3",
            "Bronze Age Kit",
            &[("game:ingot-bronze", 2), ("game:metalparts", 4)],
            &[("uncommon", 60.0), ("rare", 25.0), ("epic", 10.0), ("legendary", 5.0)],
        ),
        toolkit(
            "itemrarity:toolkit-tier4",
            "Iron Age Kit",
            &[("game:ingot-iron", 2), ("game:metalparts", 6)],
            &[("rare", 60.0), ("epic", 30.0), ("legendary", 10.0)],
        ),
        toolkit(
            "itemrarity:toolkit-tier5",
            "Steel Age Kit",
            &[("game:ingot-steel", 2), ("game:gear-temporal", 1)],
            &[("rare", 50.0), ("epic", 25.0), ("legendary", 20.0), ("unique", 5.0)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_toolkits_with_unique_codes() {
        let kits = default_toolkits();
        assert_eq!(kits.len(), 5);
        for (i, kit) in kits.iter().enumerate() {
            assert_eq!(kit.code, format!("itemrarity:toolkit-tier{}", i + 1));
        }
    }

    #[test]
    fn test_every_pool_sums_to_hundred() {
        for kit in default_toolkits() {
            assert!((kit.rarity_weights.total() - 100.0).abs() < 1e-9, "{}", kit.code);
        }
    }

    #[test]
    fn test_only_steel_kit_reaches_unique() {
        for kit in default_toolkits() {
            let has_unique = kit.rarity_weights.weight("unique").is_some();
            assert_eq!(has_unique, kit.code.ends_with("tier5"), "{}", kit.code);
        }
    }
}
