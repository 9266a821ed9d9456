use crate::config::{ConfigError, ConfigIssue, ModConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("malformed sync message: {0}")]
    Envelope(#[from] serde_json::Error),
    #[error("invalid configuration in sync message: {0}")]
    Config(#[from] ConfigError),
    #[cfg(feature = "web")]
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Server-to-client push of the whole configuration.
///
/// The config travels as a JSON string inside a one-field envelope, so the
/// receiver can reject a bad payload without touching its current config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSyncMessage {
    pub serialized_config: String,
}

impl ConfigSyncMessage {
    pub fn from_config(config: &ModConfig) -> Result<Self, SyncError> {
        Ok(Self {
            serialized_config: config.to_json()?,
        })
    }

    /// Deserialize and sanitize the carried config.
    pub fn decode(&self) -> Result<(ModConfig, Vec<ConfigIssue>), SyncError> {
        Ok(ModConfig::parse_validated(&self.serialized_config)?)
    }

    pub fn to_wire(&self) -> Result<String, SyncError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_wire(text: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(text)?)
    }
}
