//! Item stacks, their rarity tag, derived stats and the suitability gate.

pub mod stats;
pub mod suitability;
pub mod types;

pub use stats::*;
pub use suitability::*;
pub use types::*;
