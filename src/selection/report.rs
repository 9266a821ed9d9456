//! Empirical distribution of repeated draws, for calibrating pools.

use super::logic::select;
use super::types::WeightedPool;
use indexmap::IndexMap;
use rand::Rng;
use serde::Serialize;

/// Per-key counts from `draws` selections against one pool.
#[derive(Debug, Clone, Serialize)]
pub struct DrawReport {
    pub label: String,
    pub draws: u64,
    /// Draws that produced no selection (pool had nothing drawable).
    pub misses: u64,
    pub counts: IndexMap<String, u64>,
    pub expected: IndexMap<String, f64>,
}

impl DrawReport {
    /// Observed fraction of draws that selected `key`.
    pub fn frequency(&self, key: &str) -> f64 {
        if self.draws == 0 {
            return 0.0;
        }
        self.counts.get(key).copied().unwrap_or(0) as f64 / self.draws as f64
    }

    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Draw test: {} ({} draws)\n", self.label, self.draws));
        out.push_str(&format!(
            "  {:<14} {:>10} {:>9} {:>9}\n",
            "rarity", "count", "observed", "expected"
        ));
        for (key, count) in &self.counts {
            let expected = self.expected.get(key).copied().unwrap_or(0.0);
            out.push_str(&format!(
                "  {:<14} {:>10} {:>8.2}% {:>8.2}%\n",
                key,
                count,
                self.frequency(key) * 100.0,
                expected * 100.0
            ));
        }
        if self.misses > 0 {
            out.push_str(&format!("  no selection: {}\n", self.misses));
        }
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Run `draws` independent selections and tally the outcome.
pub fn run_draws(label: &str, pool: &WeightedPool, draws: u64, rng: &mut impl Rng) -> DrawReport {
    let mut counts: IndexMap<String, u64> = pool.keys().map(|k| (k.to_string(), 0)).collect();
    let expected = pool.keys().map(|k| (k.to_string(), pool.share(k))).collect();
    let mut misses = 0;

    for _ in 0..draws {
        match select(pool, rng) {
            Some(key) => *counts.entry(key.to_string()).or_insert(0) += 1,
            None => misses += 1,
        }
    }

    DrawReport {
        label: label.to_string(),
        draws,
        misses,
        counts,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_counts_sum_to_draws() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pool = WeightedPool::from_pairs(&[("uncommon", 70.0), ("rare", 30.0)]);
        let report = run_draws("tier2", &pool, 10_000, &mut rng);
        assert_eq!(report.count("uncommon") + report.count("rare"), 10_000);
        assert_eq!(report.misses, 0);
    }

    #[test]
    fn test_empty_pool_counts_misses() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let report = run_draws("empty", &WeightedPool::new(), 50, &mut rng);
        assert_eq!(report.misses, 50);
        assert!(report.counts.is_empty());
        assert!(report.to_text().contains("no selection: 50"));
    }

    #[test]
    fn test_text_lists_every_pool_key() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pool = WeightedPool::from_pairs(&[("common", 1.0), ("cursed", 0.0)]);
        let report = run_draws("kit", &pool, 10, &mut rng);
        let text = report.to_text();
        assert!(text.contains("common"));
        assert!(text.contains("cursed"));
        assert_eq!(report.count("cursed"), 0);
    }

    #[test]
    fn test_json_has_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pool = WeightedPool::from_pairs(&[("common", 1.0)]);
        let report = run_draws("kit", &pool, 5, &mut rng);
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["counts"]["common"], 5);
        assert_eq!(value["draws"], 5);
    }
}
