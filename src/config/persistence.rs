use super::error::ConfigError;
use super::types::{ConfigIssue, ModConfig};
use crate::utils::persistence::{default_config_path, read_json, write_json};
use std::path::{Path, PathBuf};

/// Where configuration is loaded from and stored to.
pub trait ConfigStore {
    /// `Ok(None)` when no configuration has been stored yet.
    fn load(&self) -> Result<Option<ModConfig>, ConfigError>;
    fn store(&self, config: &ModConfig) -> Result<(), ConfigError>;
}

/// Pretty-printed JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.itemrarity/itemrarity.json`
    pub fn default_location() -> Result<Self, ConfigError> {
        Ok(Self::new(default_config_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self) -> Result<Option<ModConfig>, ConfigError> {
        Ok(read_json(&self.path)?)
    }

    fn store(&self, config: &ModConfig) -> Result<(), ConfigError> {
        Ok(write_json(&self.path, config)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from the store (and written back with any new fields).
    Loaded,
    /// Nothing stored; the built-in default was generated and stored.
    Generated,
    /// The stored config could not be read; the built-in default is used
    /// and the stored file is left untouched.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ModConfig,
    pub source: ConfigSource,
    pub issues: Vec<ConfigIssue>,
}

/// Load configuration, falling back to the built-in default on any failure.
///
/// Never returns an error: failures are logged and resolved locally.
pub fn load_or_default(store: &dyn ConfigStore) -> LoadedConfig {
    match store.load() {
        Ok(Some(mut config)) => {
            let issues = config.sanitize();
            if let Err(e) = store.store(&config) {
                tracing::warn!(error = %e, "could not write back configuration");
            }
            tracing::info!(
                rarities = config.rarities.len(),
                toolkits = config.toolkits.len(),
                "configuration loaded"
            );
            LoadedConfig {
                config,
                source: ConfigSource::Loaded,
                issues,
            }
        }
        Ok(None) => {
            let config = ModConfig::default();
            if let Err(e) = store.store(&config) {
                tracing::warn!(error = %e, "could not store default configuration");
            }
            tracing::info!("configuration not found, generated default configuration");
            LoadedConfig {
                config,
                source: ConfigSource::Generated,
                issues: Vec::new(),
            }
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "failed to load configuration, falling back to defaults (existing file not overwritten)"
            );
            LoadedConfig {
                config: ModConfig::default(),
                source: ConfigSource::Fallback,
                issues: Vec::new(),
            }
        }
    }
}
