//! WebSocket server that pushes the authoritative configuration to clients.

use super::message::{ConfigSyncMessage, SyncError};
use crate::config::{ConfigHandle, ModConfig};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;

/// Channel carrying encoded sync frames to every connection.
pub type FrameSender = broadcast::Sender<String>;

pub struct SyncServer {
    config: ConfigHandle,
    frames: FrameSender,
}

impl SyncServer {
    pub fn new(config: ConfigHandle) -> Self {
        let (frames, _) = broadcast::channel(16);
        Self { config, frames }
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Encoded frame for the currently published config.
    pub fn current_frame(&self) -> Result<String, SyncError> {
        ConfigSyncMessage::from_config(&self.config.snapshot())?.to_wire()
    }

    /// Replace the config and push it to every connected client.
    ///
    /// Returns the number of connections the frame was queued for.
    pub fn publish(&self, config: ModConfig) -> Result<usize, SyncError> {
        let frame = ConfigSyncMessage::from_config(&config)?.to_wire()?;
        self.config.replace(config);
        // No subscribers is not an error: nobody is connected yet.
        let receivers = self.frames.send(frame).unwrap_or(0);
        tracing::info!(receivers, "broadcast configuration");
        Ok(receivers)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.frames.subscribe()
    }
}

/// Bind the sync listener. Fails when the address is unusable.
pub async fn bind_sync_server(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("config sync listening on ws://{}", listener.local_addr()?);
    Ok(listener)
}

/// Bind `addr` and serve sync connections until the task is dropped.
pub async fn start_sync_server(addr: SocketAddr, server: Arc<SyncServer>) -> std::io::Result<()> {
    let listener = bind_sync_server(addr).await?;
    serve(listener, server).await
}

/// Accept loop over an already bound listener.
pub async fn serve(listener: TcpListener, server: Arc<SyncServer>) -> std::io::Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, addr, server).await {
                        tracing::warn!(%addr, error = %e, "sync connection error");
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "accept error");
            }
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    server: Arc<SyncServer>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    tracing::info!(%addr, "sync client connected");

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Subscribe before the initial push so no reload falls in between.
    let mut frames = server.subscribe();
    ws_sender.send(Message::Text(server.current_frame()?)).await?;

    loop {
        tokio::select! {
            frame = frames.recv() => match frame {
                Ok(text) => ws_sender.send(Message::Text(text)).await?,
                Err(broadcast::error::RecvError::Closed) => break,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Only the latest config matters.
                    tracing::debug!(%addr, skipped, "client lagged, sending current config");
                    ws_sender.send(Message::Text(server.current_frame()?)).await?;
                }
            },
            incoming = ws_receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                // Clients have nothing to say.
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::info!(%addr, "sync client disconnected");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_clients() {
        let server = SyncServer::new(ConfigHandle::default());
        let mut config = ModConfig::default();
        config.allow_reroll = false;
        assert_eq!(server.publish(config).unwrap(), 0);
        assert!(!server.config().snapshot().allow_reroll);
    }

    #[tokio::test]
    async fn test_address_in_use_is_an_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();
        assert!(bind_sync_server(addr).await.is_err());

        let server = Arc::new(SyncServer::new(ConfigHandle::default()));
        assert!(start_sync_server(addr, server).await.is_err());
    }

    #[test]
    fn test_publish_reaches_subscribers() {
        let server = SyncServer::new(ConfigHandle::default());
        let mut rx = server.subscribe();
        server.publish(ModConfig::default()).unwrap();
        let frame = rx.try_recv().unwrap();
        assert_eq!(frame, server.current_frame().unwrap());
    }
}
