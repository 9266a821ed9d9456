//! Weighted tier selection and draw statistics.

pub mod logic;
pub mod report;
pub mod types;

pub use logic::*;
pub use report::*;
pub use types::*;
