use serde::{Deserialize, Serialize};

/// Multiplicative factors a rarity tier applies to an item's base stats.
///
/// Missing fields deserialize to `1.0`, so a tier file only needs to list
/// the stats it actually changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Multipliers {
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

impl Default for Multipliers {
    fn default() -> Self {
        Self::identity()
    }
}

impl Multipliers {
    /// All factors at 1.0 (an item that was never enhanced).
    pub fn identity() -> Self {
        Self::uniform(1.0)
    }

    /// Every factor set to the same value.
    pub fn uniform(factor: f64) -> Self {
        Self {
            durability: factor,
            mining_speed: factor,
            attack_power: factor,
            piercing_power: factor,
            armor_flat_damage_reduction: factor,
            armor_per_tier_flat_damage_protection_loss: factor,
            armor_relative_protection: factor,
            armor_per_tier_relative_protection_loss: factor,
            shield_protection: factor,
        }
    }

    /// Named view over every factor, in declaration order.
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("durability", self.durability),
            ("mining_speed", self.mining_speed),
            ("attack_power", self.attack_power),
            ("piercing_power", self.piercing_power),
            ("armor_flat_damage_reduction", self.armor_flat_damage_reduction),
            (
                "armor_per_tier_flat_damage_protection_loss",
                self.armor_per_tier_flat_damage_protection_loss,
            ),
            ("armor_relative_protection", self.armor_relative_protection),
            (
                "armor_per_tier_relative_protection_loss",
                self.armor_per_tier_relative_protection_loss,
            ),
            ("shield_protection", self.shield_protection),
        ]
    }

    fn fields_mut(&mut self) -> [(&'static str, &mut f64); 9] {
        [
            ("durability", &mut self.durability),
            ("mining_speed", &mut self.mining_speed),
            ("attack_power", &mut self.attack_power),
            ("piercing_power", &mut self.piercing_power),
            ("armor_flat_damage_reduction", &mut self.armor_flat_damage_reduction),
            (
                "armor_per_tier_flat_damage_protection_loss",
                &mut self.armor_per_tier_flat_damage_protection_loss,
            ),
            ("armor_relative_protection", &mut self.armor_relative_protection),
            (
                "armor_per_tier_relative_protection_loss",
                &mut self.armor_per_tier_relative_protection_loss,
            ),
            ("shield_protection", &mut self.shield_protection),
        ]
    }

    /// Reset every invalid factor to 1.0, returning the names that were reset.
    pub fn reset_invalid(&mut self) -> Vec<&'static str> {
        let mut reset = Vec::new();
        for (name, value) in self.fields_mut() {
            if !is_valid_factor(*value) {
                *value = 1.0;
                reset.push(name);
            }
        }
        reset
    }

    /// Names of fields that are not strictly positive finite numbers.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, v)| !is_valid_factor(*v))
            .map(|(name, _)| name)
            .collect()
    }
}

fn is_valid_factor(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// A named rarity level. The key lives in the registry map, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityTier {
    pub name: String,
    /// Hex color string, e.g. `#13DBE8`.
    pub color: String,
    /// Nominal weight for contexts without a toolkit pool.
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub multipliers: Multipliers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<String>,
}

impl RarityTier {
    pub fn new(name: &str, color: &str, weight: f64, multipliers: Multipliers) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            weight,
            multipliers,
            effects: Vec::new(),
        }
    }

    pub fn with_effects(mut self, effects: &[&str]) -> Self {
        self.effects = effects.iter().map(|e| e.to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_all_ones() {
        let m = Multipliers::identity();
        for (name, value) in m.fields() {
            assert!((value - 1.0).abs() < f64::EPSILON, "{name} should be 1.0");
        }
    }

    #[test]
    fn test_missing_fields_default_to_one() {
        let m: Multipliers = serde_json::from_str(r#"{"durability": 1.5}"#).unwrap();
        assert!((m.durability - 1.5).abs() < f64::EPSILON);
        assert!((m.attack_power - 1.0).abs() < f64::EPSILON);
        assert!((m.shield_protection - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_fields_flags_non_positive() {
        let m = Multipliers {
            durability: 0.0,
            shield_protection: -1.0,
            ..Multipliers::identity()
        };
        assert_eq!(m.invalid_fields(), vec!["durability", "shield_protection"]);
        assert!(Multipliers::uniform(0.5).invalid_fields().is_empty());
    }

    #[test]
    fn test_reset_invalid_keeps_valid_factors() {
        let mut m = Multipliers {
            durability: -2.0,
            attack_power: 0.0,
            shield_protection: f64::INFINITY,
            ..Multipliers::uniform(1.3)
        };
        assert_eq!(
            m.reset_invalid(),
            vec!["durability", "attack_power", "shield_protection"]
        );
        assert_eq!(m.durability, 1.0);
        assert_eq!(m.attack_power, 1.0);
        assert_eq!(m.shield_protection, 1.0);
        assert_eq!(m.mining_speed, 1.3);
        assert!(m.invalid_fields().is_empty());
        assert!(m.reset_invalid().is_empty());
    }

    #[test]
    fn test_effects_skipped_when_empty() {
        let tier = RarityTier::new("Common", "#FFFFFF", 40.0, Multipliers::identity());
        let json = serde_json::to_string(&tier).unwrap();
        assert!(!json.contains("effects"));

        let unique = tier.with_effects(&["Thor"]);
        assert_eq!(unique.effects, vec!["Thor".to_string()]);
    }
}
