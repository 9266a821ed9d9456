//! Utility modules: JSON file persistence.

pub mod persistence;

pub use persistence::*;
