//! Toolkit application: the state machine that turns a toolkit use into a
//! rarity tag on the target item and one consumed toolkit.
//!
//! Flow per interaction: `Idle -> Validating -> Selecting -> Mutating ->
//! Consumed`, with `Aborted` reachable from `Validating` and `Selecting`.
//! Every check runs before the first write, so an aborted interaction never
//! leaves the target tagged or the toolkit stack reduced.

pub mod inventory;
pub mod logic;
pub mod types;

pub use inventory::*;
pub use logic::*;
pub use types::*;
