//! Rarity tiers: the multiplier sets and the registry that resolves tier keys.

pub mod defaults;
pub mod registry;
pub mod types;

pub use defaults::*;
pub use registry::*;
pub use types::*;
