//! Administrative commands: force a tier, reload config, sample a pool,
//! inspect an item.

pub mod error;
pub mod logic;
pub mod types;

pub use error::*;
pub use logic::*;
pub use types::*;
