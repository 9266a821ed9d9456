//! Toolkit definitions: what each toolkit costs and which tiers it can roll.

pub mod catalog;
pub mod defaults;
pub mod recipes;
pub mod types;

pub use catalog::*;
pub use defaults::*;
pub use recipes::*;
pub use types::*;
