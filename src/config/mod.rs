//! The `ModConfig` aggregate, its validation, storage and atomic replacement.

pub mod error;
pub mod handle;
pub mod persistence;
pub mod types;

pub use error::*;
pub use handle::*;
pub use persistence::*;
pub use types::*;
