//! Item Rarity - toolkit-driven rarity tiers for game items.
//!
//! A toolkit applied to a tool, weapon or armor piece draws a rarity tier
//! from the toolkit's weighted pool and tags the item with it. The tier's
//! multipliers scale the item's stats; the toolkit is consumed.

pub mod commands;
pub mod config;
pub mod engine;
pub mod items;
pub mod rarity;
pub mod selection;
pub mod sync;
pub mod toolkits;
pub mod utils;
