use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use comicgen_core::task_events::{MSG_TYPE_ERROR, MSG_TYPE_JOIN_TASK, MSG_TYPE_TASK_JOINED};
use comicgen_core::types::TaskId;
use comicgen_events::registry::OutcomeSender;
use comicgen_events::TaskRegistry;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Inbound client frame. Only `join_task` is understood today.
#[derive(Debug, Deserialize)]
struct ClientMessage {
    #[serde(rename = "type")]
    msg_type: String,
    task_id: Option<String>,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is registered with `WsManager` and
/// managed by three tasks: a sender forwarding outbound frames, an outcome
/// forwarder serializing registry events, and the inbound receive loop.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, state.registry))
}

/// Manage a single WebSocket connection after upgrade.
///
/// 1. Registers the connection with `WsManager`.
/// 2. Spawns a sender task that forwards messages from the manager channel.
/// 3. Spawns a forwarder that turns published `TaskOutcome`s into frames.
/// 4. Processes inbound messages on the current task.
/// 5. Cleans up (including registry subscriptions) on disconnect.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, registry: Arc<TaskRegistry>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = ws_manager.add(conn_id.clone()).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Outcome forwarder: one channel per connection, registered with the
    // task registry on every join. Outcomes are serialized and pushed into
    // the connection's outbound channel.
    let (outcome_tx, mut outcome_rx) = tokio::sync::mpsc::unbounded_channel();
    let forward_manager = Arc::clone(&ws_manager);
    let forward_conn_id = conn_id.clone();
    let forward_task = tokio::spawn(async move {
        while let Some(outcome) = outcome_rx.recv().await {
            match serde_json::to_string(&outcome) {
                Ok(json) => {
                    forward_manager
                        .send_to(&forward_conn_id, Message::Text(json.into()))
                        .await;
                }
                Err(e) => {
                    tracing::error!(conn_id = %forward_conn_id, error = %e, "Failed to serialize outcome");
                }
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                handle_text_message(&text, &conn_id, &ws_manager, &registry, &outcome_tx).await;
            }
            Ok(_msg) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: drop subscriptions, remove connection, stop helper tasks.
    registry.leave(&conn_id).await;
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    forward_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Dispatch a single inbound text frame.
async fn handle_text_message(
    text: &str,
    conn_id: &str,
    ws_manager: &WsManager,
    registry: &TaskRegistry,
    outcome_tx: &OutcomeSender,
) {
    let parsed: ClientMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(conn_id, error = %e, "Unparseable WebSocket frame");
            send_error(ws_manager, conn_id, "unparseable message").await;
            return;
        }
    };

    match parsed.msg_type.as_str() {
        MSG_TYPE_JOIN_TASK => {
            let task_id: TaskId = match parsed.task_id.as_deref().map(str::parse) {
                Some(Ok(id)) => id,
                _ => {
                    send_error(ws_manager, conn_id, "join_task requires a valid task_id").await;
                    return;
                }
            };

            // Joining replays the cached outcome when the worker already
            // finished, so a late subscriber still gets its event.
            registry.join(task_id, conn_id, outcome_tx.clone()).await;
            tracing::debug!(conn_id, task_id = %task_id, "Connection joined task room");

            let ack = serde_json::json!({
                "type": MSG_TYPE_TASK_JOINED,
                "task_id": task_id,
            });
            ws_manager
                .send_to(conn_id, Message::Text(ack.to_string().into()))
                .await;
        }
        other => {
            tracing::debug!(conn_id, msg_type = other, "Unknown WebSocket message type");
            send_error(ws_manager, conn_id, "unknown message type").await;
        }
    }
}

async fn send_error(ws_manager: &WsManager, conn_id: &str, message: &str) {
    let payload = serde_json::json!({
        "type": MSG_TYPE_ERROR,
        "message": message,
    });
    ws_manager
        .send_to(conn_id, Message::Text(payload.to_string().into()))
        .await;
}
