//! Server-to-client configuration distribution.
//!
//! The server owns the authoritative [`ModConfig`](crate::config::ModConfig)
//! and pushes it whole; clients replace their copy on receipt and keep the
//! last good one when a message cannot be decoded.

#[cfg(feature = "web")]
pub mod client;
pub mod message;
pub mod replica;
#[cfg(feature = "web")]
pub mod server;

#[cfg(feature = "web")]
pub use client::*;
pub use message::*;
pub use replica::*;
#[cfg(feature = "web")]
pub use server::*;
