//! Registry of live WebSocket connections.
//!
//! Every upgraded connection gets an unbounded channel; the manager holds
//! the sender halves keyed by connection id. Task outcome frames, join
//! acknowledgements, and protocol errors all funnel through [`send_to`]
//! into the connection's own sender task.
//!
//! [`send_to`]: WsManager::send_to

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing frames to one WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Tracks every open WebSocket connection.
///
/// Wrapped in `Arc` and shared between the upgrade handler, the heartbeat
/// task, and graceful shutdown.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsSender>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection and hand back the receiver half its sender
    /// task drains. Registering an id twice replaces the old sender.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.write().await.insert(conn_id, tx);
        rx
    }

    /// Forget a connection. Unknown ids are a no-op.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Push one frame to one connection.
    ///
    /// Returns `false` when the connection is unknown or its channel has
    /// already closed; the connection's own receive loop handles cleanup.
    pub async fn send_to(&self, conn_id: &str, message: Message) -> bool {
        match self.connections.read().await.get(conn_id) {
            Some(sender) => sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Number of open connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Ping every connection so half-dead sockets surface as send errors.
    pub async fn ping_all(&self) {
        for sender in self.connections.read().await.values() {
            let _ = sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection and drop them all.
    ///
    /// Part of graceful shutdown: clients are told the server is going
    /// away before the process exits.
    pub async fn shutdown_all(&self) {
        let mut connections = self.connections.write().await;
        let count = connections.len();
        for sender in connections.values() {
            let _ = sender.send(Message::Close(None));
        }
        connections.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
