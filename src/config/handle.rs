use super::types::ModConfig;
use std::sync::{Arc, RwLock};

/// Shared, swappable reference to the current [`ModConfig`].
///
/// Readers take a snapshot and keep using it for the whole interaction.
/// A reload replaces the reference; published configs are never mutated.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    current: Arc<RwLock<Arc<ModConfig>>>,
}

impl ConfigHandle {
    pub fn new(config: ModConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    pub fn snapshot(&self) -> Arc<ModConfig> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Publish `config`, returning the one it replaced.
    pub fn replace(&self, config: ModConfig) -> Arc<ModConfig> {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, Arc::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_snapshot_survives_replace() {
        let handle = ConfigHandle::new(ModConfig::default());
        let before = handle.snapshot();

        let mut next = ModConfig::default();
        next.allow_reroll = false;
        let replaced = handle.replace(next);

        assert!(before.allow_reroll);
        assert!(Arc::ptr_eq(&before, &replaced));
        assert!(!handle.snapshot().allow_reroll);
    }

    #[test]
    fn test_clones_share_state() {
        let handle = ConfigHandle::new(ModConfig::default());
        let other = handle.clone();
        let mut next = ModConfig::default();
        next.allow_reroll = false;
        other.replace(next);
        assert!(!handle.snapshot().allow_reroll);
    }

    #[test]
    fn test_concurrent_readers_see_whole_configs() {
        let handle = ConfigHandle::new(ModConfig::default());
        let writer = {
            let handle = handle.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let mut next = ModConfig::default();
                    next.allow_reroll = i % 2 == 0;
                    handle.replace(next);
                }
            })
        };
        for _ in 0..200 {
            let snap = handle.snapshot();
            assert_eq!(snap.rarities.len(), 7);
            assert_eq!(snap.toolkits.len(), 5);
        }
        writer.join().unwrap();
    }
}
