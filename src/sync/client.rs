use super::message::SyncError;
use super::replica::{ConfigReplica, ReplicaUpdate};
use futures_util::StreamExt;
use tokio_tungstenite::tungstenite::Message;

/// Connect to a sync server and feed every pushed config into `replica`
/// until the server closes the connection.
///
/// Returns the number of configs applied.
pub async fn run_sync_client(url: &str, replica: ConfigReplica) -> Result<usize, SyncError> {
    let (ws_stream, _) = tokio_tungstenite::connect_async(url).await?;
    tracing::info!(url, "connected to config sync server");

    let (_, mut ws_receiver) = ws_stream.split();
    let mut applied = 0;
    while let Some(msg) = ws_receiver.next().await {
        match msg? {
            Message::Text(text) => {
                if replica.receive_wire(&text) == ReplicaUpdate::Replaced {
                    applied += 1;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    tracing::info!(url, applied, "config sync connection closed");
    Ok(applied)
}
