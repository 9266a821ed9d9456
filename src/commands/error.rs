use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("unknown rarity '{key}', expected one of: {}", .available.join(", "))]
    UnknownRarity { key: String, available: Vec<String> },
    #[error("unknown toolkit '{0}'")]
    UnknownToolkit(String),
    #[error("no item held")]
    NoHeldItem,
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
