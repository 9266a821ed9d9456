use super::types::{weight_scale, WeightedPool};
use rand::Rng;

/// Draw one key from `pool`, weighted by its drawable entries.
///
/// Returns `None` without consuming randomness when nothing is drawable.
/// Exactly one uniform value is drawn otherwise.
pub fn select<'a>(pool: &'a WeightedPool, rng: &mut impl Rng) -> Option<&'a str> {
    let entries = pool.eligible();
    if entries.is_empty() {
        return None;
    }
    let unit = rng.gen::<f64>();
    Some(pick(&entries, unit))
}

/// Deterministic half of [`select`]: resolve a unit roll in `[0, 1)`.
pub fn pick_with_roll(pool: &WeightedPool, unit: f64) -> Option<&str> {
    let entries = pool.eligible();
    if entries.is_empty() {
        return None;
    }
    Some(pick(&entries, unit))
}

fn pick<'a>(entries: &[(&'a str, f64)], unit: f64) -> &'a str {
    let scale = weight_scale(entries);
    let total: f64 = entries.iter().map(|(_, w)| w / scale).sum();
    let roll = unit * total;

    let mut cumulative = 0.0;
    for &(key, weight) in entries {
        cumulative += weight / scale;
        if roll < cumulative {
            return key;
        }
    }

    // Only reachable through rounding when `unit` is at the top of the range.
    tracing::debug!(roll, total, "weighted draw fell through, using first entry");
    entries[0].0
}
