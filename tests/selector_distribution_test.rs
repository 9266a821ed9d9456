//! Integration test: weighted tier selection over many draws.
//!
//! Checks that observed frequencies converge on weight shares, that
//! zero-weight entries are never produced, and that empty pools are safe.

use item_rarity::config::ModConfig;
use item_rarity::selection::{pick_with_roll, run_draws, select, WeightedPool};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =========================================================================
// Proportionality
// =========================================================================

#[test]
fn test_two_entry_pool_converges_within_one_percent() {
    let pool = WeightedPool::from_pairs(&[("a", 3.0), ("b", 1.0)]);
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let report = run_draws("a/b", &pool, 1_000_000, &mut rng);

    assert_eq!(report.misses, 0);
    assert!(
        (report.frequency("a") - 0.75).abs() < 0.01,
        "a drawn {:.4} of the time",
        report.frequency("a")
    );
    assert!((report.frequency("b") - 0.25).abs() < 0.01);
}

#[test]
fn test_every_default_toolkit_matches_its_shares() {
    let config = ModConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for kit in config.toolkits.iter() {
        let report = run_draws(&kit.code, &kit.rarity_weights, 200_000, &mut rng);
        for (key, _) in kit.rarity_weights.iter() {
            let expected = kit.rarity_weights.share(key);
            assert!(
                (report.frequency(key) - expected).abs() < 0.01,
                "{}: {key} observed {:.4}, expected {expected:.4}",
                kit.code,
                report.frequency(key)
            );
        }
    }
}

#[test]
fn test_pool_order_does_not_change_shares() {
    let forward = WeightedPool::from_pairs(&[("rare", 60.0), ("epic", 30.0), ("legendary", 10.0)]);
    let backward = WeightedPool::from_pairs(&[("legendary", 10.0), ("epic", 30.0), ("rare", 60.0)]);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let a = run_draws("forward", &forward, 300_000, &mut rng);
    let b = run_draws("backward", &backward, 300_000, &mut rng);
    for key in ["rare", "epic", "legendary"] {
        assert!((a.frequency(key) - b.frequency(key)).abs() < 0.01);
    }
}

// =========================================================================
// Exclusion and empty pools
// =========================================================================

#[test]
fn test_zero_and_negative_weights_never_drawn() {
    let pool = WeightedPool::from_pairs(&[
        ("common", 0.0),
        ("rare", 5.0),
        ("cursed", -3.0),
        ("epic", f64::NAN),
    ]);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..50_000 {
        assert_eq!(select(&pool, &mut rng), Some("rare"));
    }
}

#[test]
fn test_empty_pool_selects_nothing() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert_eq!(select(&WeightedPool::new(), &mut rng), None);

    let zeros = WeightedPool::from_pairs(&[("common", 0.0), ("rare", 0.0)]);
    let report = run_draws("zeros", &zeros, 100, &mut rng);
    assert_eq!(report.misses, 100);
    assert_eq!(report.count("common"), 0);
}

#[test]
fn test_roll_walks_cumulative_weights_in_order() {
    let pool = WeightedPool::from_pairs(&[("rare", 50.0), ("epic", 25.0), ("legendary", 20.0), ("unique", 5.0)]);
    assert_eq!(pick_with_roll(&pool, 0.10), Some("rare"));
    assert_eq!(pick_with_roll(&pool, 0.60), Some("epic"));
    assert_eq!(pick_with_roll(&pool, 0.90), Some("legendary"));
    assert_eq!(pick_with_roll(&pool, 0.99), Some("unique"));
}

#[test]
fn test_report_text_lists_every_key() {
    let pool = WeightedPool::from_pairs(&[("common", 75.0), ("uncommon", 25.0)]);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let report = run_draws("itemrarity:toolkit-tier1", &pool, 1_000, &mut rng);
    let text = report.to_text();
    assert!(text.contains("itemrarity:toolkit-tier1"));
    assert!(text.contains("common"));
    assert!(text.contains("uncommon"));

    let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
    assert_eq!(json["draws"], 1_000);
}
