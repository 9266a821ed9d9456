use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from tier key to selection weight.
///
/// Insertion order is preserved and is the iteration order the selector
/// walks, which keeps draws reproducible for a seeded RNG.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedPool {
    weights: IndexMap<String, f64>,
}

impl WeightedPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        pairs.iter().map(|(k, w)| (k.to_string(), *w)).collect()
    }

    /// Insert or replace a weight. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, weight: f64) {
        self.weights.insert(key.into(), weight);
    }

    pub fn weight(&self, key: &str) -> Option<f64> {
        self.weights.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, w)| (k.as_str(), *w))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Keep only entries for which `keep` returns true, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, f64) -> bool) {
        self.weights.retain(|k, w| keep(k, *w));
    }

    /// Entries that can actually be drawn: finite and strictly positive.
    pub fn eligible(&self) -> Vec<(&str, f64)> {
        self.iter().filter(|(_, w)| is_drawable(*w)).collect()
    }

    /// Sum of the drawable weights. Can overflow to infinity.
    pub fn total(&self) -> f64 {
        self.eligible().iter().map(|(_, w)| w).sum()
    }

    /// Probability a single draw lands on `key`.
    pub fn share(&self, key: &str) -> f64 {
        let entries = self.eligible();
        let scale = weight_scale(&entries);
        let total: f64 = entries.iter().map(|(_, w)| w / scale).sum();
        match self.weight(key) {
            Some(w) if is_drawable(w) && total > 0.0 => (w / scale) / total,
            _ => 0.0,
        }
    }
}

pub(crate) fn is_drawable(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}

/// Divisor applied to every weight before summing. Each drawable weight is
/// finite, but the sum of several huge ones can overflow to infinity; dividing
/// by the largest weight keeps the sum within `entries.len()`.
pub(crate) fn weight_scale(entries: &[(&str, f64)]) -> f64 {
    let total: f64 = entries.iter().map(|(_, w)| w).sum();
    if total.is_finite() {
        1.0
    } else {
        entries.iter().map(|(_, w)| *w).fold(0.0, f64::max)
    }
}

impl FromIterator<(String, f64)> for WeightedPool {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let pool = WeightedPool::from_pairs(&[("rare", 50.0), ("epic", 25.0), ("common", 1.0)]);
        let keys: Vec<&str> = pool.keys().collect();
        assert_eq!(keys, vec!["rare", "epic", "common"]);
    }

    #[test]
    fn test_eligible_drops_non_positive_and_nan() {
        let pool = WeightedPool::from_pairs(&[
            ("a", 0.0),
            ("b", -3.0),
            ("c", 2.0),
            ("d", f64::NAN),
            ("e", f64::INFINITY),
        ]);
        assert_eq!(pool.eligible(), vec![("c", 2.0)]);
        assert!((pool.total() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_share() {
        let pool = WeightedPool::from_pairs(&[("common", 75.0), ("uncommon", 25.0), ("x", 0.0)]);
        assert!((pool.share("common") - 0.75).abs() < 1e-12);
        assert!((pool.share("uncommon") - 0.25).abs() < 1e-12);
        assert_eq!(pool.share("x"), 0.0);
        assert_eq!(pool.share("missing"), 0.0);
    }

    #[test]
    fn test_json_is_plain_object_in_order() {
        let json = r#"{"uncommon": 70, "rare": 30}"#;
        let pool: WeightedPool = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = pool.keys().collect();
        assert_eq!(keys, vec!["uncommon", "rare"]);
    }
}
