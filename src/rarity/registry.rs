use super::defaults::default_tiers;
use super::types::RarityTier;
use crate::config::ConfigError;
use crate::selection::WeightedPool;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Ordered, non-empty set of rarity tiers keyed by their stable identifier.
///
/// Iteration order is the order the tiers were declared in the config file.
/// The first tier doubles as the fallback for unknown keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, RarityTier>", into = "IndexMap<String, RarityTier>")]
pub struct TierRegistry {
    tiers: IndexMap<String, RarityTier>,
}

impl TryFrom<IndexMap<String, RarityTier>> for TierRegistry {
    type Error = ConfigError;

    fn try_from(tiers: IndexMap<String, RarityTier>) -> Result<Self, Self::Error> {
        if tiers.is_empty() {
            return Err(ConfigError::NoRarities);
        }
        Ok(Self { tiers })
    }
}

impl From<TierRegistry> for IndexMap<String, RarityTier> {
    fn from(registry: TierRegistry) -> Self {
        registry.tiers
    }
}

impl Default for TierRegistry {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
        }
    }
}

/// Used only if a registry were somehow emptied; construction forbids it.
fn builtin_fallback() -> &'static (String, RarityTier) {
    static FALLBACK: OnceLock<(String, RarityTier)> = OnceLock::new();
    FALLBACK.get_or_init(|| {
        let tiers = default_tiers();
        let (key, tier) = tiers.into_iter().next().unwrap_or_else(|| {
            (
                "common".to_string(),
                RarityTier::new("Common", "#FFFFFF", 1.0, Default::default()),
            )
        });
        (key, tier)
    })
}

impl TierRegistry {
    pub fn new(tiers: IndexMap<String, RarityTier>) -> Result<Self, ConfigError> {
        Self::try_from(tiers)
    }

    /// Resolve `key`, falling back to the first registered tier.
    ///
    /// Never fails: stale or renamed keys resolve deterministically.
    pub fn lookup(&self, key: &str) -> (&str, &RarityTier) {
        match self.tiers.get_key_value(key).or_else(|| self.tiers.first()) {
            Some((k, tier)) => (k.as_str(), tier),
            None => {
                let (k, tier) = builtin_fallback();
                (k.as_str(), tier)
            }
        }
    }

    /// Strict lookup without fallback.
    pub fn get(&self, key: &str) -> Option<&RarityTier> {
        self.tiers.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tiers.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }

    /// Every tier key, in declaration order.
    pub fn all_keys(&self) -> Vec<String> {
        self.tiers.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RarityTier)> {
        self.tiers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut RarityTier)> {
        self.tiers.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Pool built from each tier's nominal weight, for draws outside any toolkit.
    pub fn default_pool(&self) -> WeightedPool {
        self.tiers
            .iter()
            .map(|(k, tier)| (k.clone(), tier.weight))
            .collect()
    }
}
