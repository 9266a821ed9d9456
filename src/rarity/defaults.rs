use super::types::{Multipliers, RarityTier};
use indexmap::IndexMap;

/// Built-in seven-tier set used when no configuration file exists.
pub fn default_tiers() -> IndexMap<String, RarityTier> {
    let tiers = [
        ("cursed", RarityTier::new("Cursed", "#606060", 8.0, Multipliers::uniform(0.5))),
        ("common", RarityTier::new("Common", "#FFFFFF", 40.0, Multipliers::uniform(1.0))),
        ("uncommon", RarityTier::new("Uncommon", "#36FF00", 30.0, Multipliers::uniform(1.1))),
        ("rare", RarityTier::new("Rare", "#13DBE8", 20.0, Multipliers::uniform(1.2))),
        (
            "epic",
            RarityTier::new(
                "Epic",
                "#8413E8",
                12.0,
                Multipliers {
                    durability: 1.4,
                    ..Multipliers::uniform(1.3)
                },
            ),
        ),
        (
            "legendary",
            RarityTier::new(
                "Legendary",
                "#E08614",
                8.0,
                Multipliers {
                    durability: 1.6,
                    shield_protection: 1.6,
                    ..Multipliers::uniform(1.5)
                },
            ),
        ),
        (
            "unique",
            RarityTier::new(
                "Unique",
                "#EC290E",
                2.0,
                Multipliers {
                    durability: 2.0,
                    ..Multipliers::uniform(1.9)
                },
            )
            .with_effects(&["Thor"]),
        ),
    ];

    tiers
        .into_iter()
        .map(|(key, tier)| (key.to_string(), tier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_tiers() {
        assert_eq!(default_tiers().len(), 7);
    }

    #[test]
    fn test_durability_monotonic() {
        let tiers = default_tiers();
        let durabilities: Vec<f64> = tiers.values().map(|t| t.multipliers.durability).collect();
        for pair in durabilities.windows(2) {
            assert!(pair[0] < pair[1], "durability should increase: {pair:?}");
        }
        assert!((durabilities[0] - 0.5).abs() < f64::EPSILON);
        assert!((durabilities[6] - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_multipliers_positive() {
        for (key, tier) in default_tiers() {
            assert!(tier.multipliers.invalid_fields().is_empty(), "{key}");
        }
    }

    #[test]
    fn test_only_unique_has_effects() {
        for (key, tier) in default_tiers() {
            if key == "unique" {
                assert_eq!(tier.effects, vec!["Thor".to_string()]);
            } else {
                assert!(tier.effects.is_empty(), "{key}");
            }
        }
    }
}
