use super::error::ConfigError;
use crate::rarity::TierRegistry;
use crate::toolkits::{default_toolkits, ToolkitCatalog};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tier registry plus toolkit catalog, loaded and replaced as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModConfig {
    pub rarities: TierRegistry,
    #[serde(default)]
    pub toolkits: ToolkitCatalog,
    /// When false, toolkits only work on items that have never been enhanced.
    #[serde(default = "default_allow_reroll")]
    pub allow_reroll: bool,
}

fn default_allow_reroll() -> bool {
    true
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            rarities: TierRegistry::default(),
            toolkits: ToolkitCatalog::new(default_toolkits()),
            allow_reroll: true,
        }
    }
}

/// A problem found while validating a loaded config.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    /// Removed from the pool: the tier does not exist.
    UnknownTierInPool { toolkit: String, tier: String },
    /// Kept, but never drawn.
    NonPositiveWeight { toolkit: String, tier: String, weight: f64 },
    /// Toolkit can never produce a tier.
    EmptyPool { toolkit: String },
    DuplicateToolkit { code: String },
    /// Reset to 1.0.
    InvalidMultiplier { tier: String, field: &'static str },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::UnknownTierInPool { toolkit, tier } => {
                write!(f, "toolkit '{toolkit}': rarity '{tier}' is not defined, removed from pool")
            }
            ConfigIssue::NonPositiveWeight {
                toolkit,
                tier,
                weight,
            } => write!(
                f,
                "toolkit '{toolkit}': rarity '{tier}' has weight {weight}, it will never be selected"
            ),
            ConfigIssue::EmptyPool { toolkit } => {
                write!(f, "toolkit '{toolkit}': no rarity has a positive weight")
            }
            ConfigIssue::DuplicateToolkit { code } => {
                write!(f, "toolkit '{code}' is defined more than once, first definition wins")
            }
            ConfigIssue::InvalidMultiplier { tier, field } => {
                write!(f, "rarity '{tier}': multiplier '{field}' must be positive, reset to 1.0")
            }
        }
    }
}

impl ModConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Resolve tier references against the registry.
    ///
    /// Pool entries naming unknown tiers are removed and invalid multipliers
    /// are reset to 1.0; everything else is reported but left in place.
    pub fn sanitize(&mut self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (key, tier) in self.rarities.iter_mut() {
            for field in tier.multipliers.reset_invalid() {
                issues.push(ConfigIssue::InvalidMultiplier {
                    tier: key.to_string(),
                    field,
                });
            }
        }

        let rarities = &self.rarities;
        for toolkit in self.toolkits.iter_mut() {
            let code = toolkit.code.clone();
            toolkit.rarity_weights.retain(|tier, _| {
                let known = rarities.contains(tier);
                if !known {
                    issues.push(ConfigIssue::UnknownTierInPool {
                        toolkit: code.clone(),
                        tier: tier.to_string(),
                    });
                }
                known
            });

            for (tier, weight) in toolkit.rarity_weights.iter() {
                if !crate::selection::types::is_drawable(weight) {
                    issues.push(ConfigIssue::NonPositiveWeight {
                        toolkit: code.clone(),
                        tier: tier.to_string(),
                        weight,
                    });
                }
            }

            if toolkit.rarity_weights.eligible().is_empty() {
                issues.push(ConfigIssue::EmptyPool { toolkit: code });
            }
        }

        for code in self.toolkits.duplicate_codes() {
            issues.push(ConfigIssue::DuplicateToolkit {
                code: code.to_string(),
            });
        }

        for issue in &issues {
            tracing::warn!("config: {issue}");
        }
        issues
    }

    /// Parse and sanitize in one step.
    pub fn parse_validated(json: &str) -> Result<(Self, Vec<ConfigIssue>), ConfigError> {
        let mut config = Self::from_json(json)?;
        let issues = config.sanitize();
        Ok((config, issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_clean() {
        let mut config = ModConfig::default();
        assert!(config.sanitize().is_empty());
        assert_eq!(config.rarities.len(), 7);
        assert_eq!(config.toolkits.len(), 5);
        assert!(config.allow_reroll);
    }

    #[test]
    fn test_unknown_pool_key_removed() {
        let json = r##"{
            "rarities": {"common": {"name": "Common", "color": "#FFFFFF"}},
            "toolkits": [{"code": "a:kit", "name": "Kit",
                          "rarity_weights": {"mythic": 5, "common": 10}}]
        }"##;
        let (config, issues) = ModConfig::parse_validated(json).unwrap();
        let kit = config.toolkits.find_by_output_code("a:kit").unwrap();
        assert_eq!(kit.rarity_weights.len(), 1);
        assert_eq!(kit.rarity_weights.weight("common"), Some(10.0));
        assert_eq!(
            issues,
            vec![ConfigIssue::UnknownTierInPool {
                toolkit: "a:kit".to_string(),
                tier: "mythic".to_string()
            }]
        );
    }

    #[test]
    fn test_zero_weight_pool_reported_not_removed() {
        let json = r##"{
            "rarities": {"common": {"name": "Common", "color": "#FFFFFF"}},
            "toolkits": [{"code": "a:kit", "name": "Kit", "rarity_weights": {"common": 0}}]
        }"##;
        let (config, issues) = ModConfig::parse_validated(json).unwrap();
        let kit = config.toolkits.find_by_output_code("a:kit").unwrap();
        assert_eq!(kit.rarity_weights.len(), 1);
        assert!(issues.contains(&ConfigIssue::EmptyPool {
            toolkit: "a:kit".to_string()
        }));
        assert!(matches!(issues[0], ConfigIssue::NonPositiveWeight { .. }));
    }

    #[test]
    fn test_empty_rarities_rejected() {
        let json = r#"{"rarities": {}, "toolkits": []}"#;
        assert!(ModConfig::from_json(json).is_err());
    }

    #[test]
    fn test_missing_optional_sections() {
        let json = r##"{"rarities": {"common": {"name": "Common", "color": "#FFFFFF"}}}"##;
        let config = ModConfig::from_json(json).unwrap();
        assert!(config.toolkits.is_empty());
        assert!(config.allow_reroll);
    }

    #[test]
    fn test_duplicate_toolkit_reported() {
        let mut config = ModConfig::default();
        let mut kits: Vec<_> = config.toolkits.iter().cloned().collect();
        kits.push(kits[0].clone());
        config.toolkits = ToolkitCatalog::new(kits);
        let issues = config.sanitize();
        assert_eq!(
            issues,
            vec![ConfigIssue::DuplicateToolkit {
                code: "itemrarity:toolkit-tier1".to_string()
            }]
        );
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let config = ModConfig::default();
        let back = ModConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
