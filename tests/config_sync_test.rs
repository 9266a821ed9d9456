//! Integration test: server-pushed configuration reaching a client replica.

use item_rarity::config::{ConfigHandle, ModConfig};
use item_rarity::engine::{ApplicationEngine, Authority, Hotbar, ToolkitOutcome, ToolkitUseRequest};
use item_rarity::items::{ItemCategory, ItemStack};
use item_rarity::sync::{ConfigReplica, ConfigSyncMessage, ReplicaUpdate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn server_config() -> ModConfig {
    let mut config = ModConfig::default();
    config.allow_reroll = false;
    config
}

// =========================================================================
// Replica behaviour
// =========================================================================

#[test]
fn test_client_engine_follows_pushed_config() {
    let replica = ConfigReplica::default();
    let client = ApplicationEngine::new(replica.handle().clone(), Authority::Predictive);

    let frame = ConfigSyncMessage::from_config(&server_config())
        .unwrap()
        .to_wire()
        .unwrap();
    assert_eq!(replica.receive_wire(&frame), ReplicaUpdate::Replaced);

    let mut enhanced = ItemStack::new("game:shield-wood", ItemCategory::Shield);
    enhanced.state.set_rarity("rare");
    let mut bar = Hotbar::new(2);
    bar.put(0, ItemStack::toolkit("itemrarity:toolkit-tier2", 1));
    bar.put(1, enhanced);

    let outcome = client.on_toolkit_used(
        ToolkitUseRequest::adjacent(0),
        &mut bar,
        &mut ChaCha8Rng::seed_from_u64(4),
        &mut Vec::new(),
    );
    assert!(matches!(outcome, ToolkitOutcome::Aborted { .. }));
}

#[test]
fn test_corrupt_push_keeps_last_good_config() {
    let replica = ConfigReplica::new(ConfigHandle::new(server_config()));
    let mut frame = ConfigSyncMessage::from_config(&ModConfig::default())
        .unwrap()
        .to_wire()
        .unwrap();
    frame.truncate(frame.len() / 2);

    assert_eq!(replica.receive_wire(&frame), ReplicaUpdate::Retained);
    assert_eq!(*replica.current(), server_config());
}

#[test]
fn test_push_with_unknown_pool_key_is_sanitized() {
    let mut config = ModConfig::default();
    for kit in config.toolkits.iter_mut() {
        kit.rarity_weights.insert("mythic", 50.0);
    }
    let message = ConfigSyncMessage::from_config(&config).unwrap();

    let replica = ConfigReplica::default();
    assert_eq!(replica.receive(&message), ReplicaUpdate::Replaced);
    for kit in replica.current().toolkits.iter() {
        assert_eq!(kit.rarity_weights.weight("mythic"), None);
    }
}

// =========================================================================
// WebSocket transport
// =========================================================================

#[cfg(feature = "web")]
mod transport {
    use super::*;
    use item_rarity::sync::{run_sync_client, serve, SyncServer};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::TcpListener;

    async fn wait_for(replica: &ConfigReplica, check: impl Fn(&ModConfig) -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !check(&replica.current()) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_push_on_connect_and_on_publish() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        let server = Arc::new(SyncServer::new(ConfigHandle::new(server_config())));
        tokio::spawn(serve(listener, Arc::clone(&server)));

        let replica = ConfigReplica::default();
        let client_replica = replica.clone();
        tokio::spawn(async move { run_sync_client(&url, client_replica).await });
        wait_for(&replica, |c| !c.allow_reroll).await;

        let mut reloaded = server_config();
        reloaded.toolkits = Default::default();
        server.publish(reloaded).unwrap();
        wait_for(&replica, |c| c.toolkits.is_empty()).await;
    }
}
