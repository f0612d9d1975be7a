use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

/// How often every connection is pinged.
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Spawn the heartbeat task: periodic Ping frames keep intermediaries
/// from idling connections out and flush half-dead sockets.
///
/// Runs for the life of the process; the handle lets shutdown abort it.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PING_INTERVAL);
        loop {
            ticker.tick().await;
            let connections = ws_manager.connection_count().await;
            if connections == 0 {
                continue;
            }
            tracing::trace!(connections, "Pinging WebSocket clients");
            ws_manager.ping_all().await;
        }
    })
}
