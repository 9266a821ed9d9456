use super::message::ConfigSyncMessage;
use crate::config::{ConfigHandle, ModConfig};
use std::sync::Arc;

/// Result of feeding one sync message into a replica.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicaUpdate {
    Replaced,
    /// The message could not be decoded; the previous config is still active.
    Retained,
}

/// Client-side copy of the server's configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigReplica {
    handle: ConfigHandle,
}

impl ConfigReplica {
    pub fn new(handle: ConfigHandle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &ConfigHandle {
        &self.handle
    }

    pub fn current(&self) -> Arc<ModConfig> {
        self.handle.snapshot()
    }

    pub fn receive(&self, message: &ConfigSyncMessage) -> ReplicaUpdate {
        match message.decode() {
            Ok((config, _issues)) => {
                tracing::info!(
                    rarities = config.rarities.len(),
                    toolkits = config.toolkits.len(),
                    "received configuration from server"
                );
                self.handle.replace(config);
                ReplicaUpdate::Replaced
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to apply server configuration, keeping current");
                ReplicaUpdate::Retained
            }
        }
    }

    /// Decode a raw wire frame and apply it.
    pub fn receive_wire(&self, text: &str) -> ReplicaUpdate {
        match ConfigSyncMessage::from_wire(text) {
            Ok(message) => self.receive(&message),
            Err(e) => {
                tracing::error!(error = %e, "dropping malformed sync frame");
                ReplicaUpdate::Retained
            }
        }
    }
}
