//! In-memory registry of task rooms.
//!
//! A room is the set of live connections subscribed to one task's outcome,
//! plus a short-lived cache of the last published outcome. The cache is
//! what closes the race between "worker finishes fast" and "client
//! subscribes slow": a join that arrives after the publish is served the
//! cached outcome immediately instead of waiting for an event that will
//! never come again.
//!
//! Locking is fine-grained: the outer `RwLock` only guards the shape of
//! the room map, and all per-task work serializes on that room's own
//! mutex, so unrelated tasks never contend. No lock is ever held across a
//! backend call -- publishers acquire the room only after generation is
//! done.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use comicgen_core::types::TaskId;
use tokio::sync::{mpsc, Mutex, RwLock};

use crate::outcome::TaskOutcome;

/// Channel sender half for pushing outcomes to one connection.
pub type OutcomeSender = mpsc::UnboundedSender<TaskOutcome>;

/// Receiver half handed to the connection's forwarding task.
pub type OutcomeReceiver = mpsc::UnboundedReceiver<TaskOutcome>;

/// How long a published outcome stays replayable for late joiners.
pub const DEFAULT_OUTCOME_TTL: Duration = Duration::from_secs(300);

/// A cached outcome with its publication time.
struct CachedOutcome {
    outcome: TaskOutcome,
    published_at: Instant,
}

/// Subscribers and outcome cache for one task.
#[derive(Default)]
struct TaskRoom {
    subscribers: HashMap<String, OutcomeSender>,
    cached: Option<CachedOutcome>,
}

impl TaskRoom {
    /// The cached outcome, if it has not expired.
    fn fresh_outcome(&self, ttl: Duration) -> Option<&TaskOutcome> {
        self.cached
            .as_ref()
            .filter(|c| c.published_at.elapsed() < ttl)
            .map(|c| &c.outcome)
    }

    /// Whether the room holds nothing worth keeping.
    fn is_disposable(&self, ttl: Duration) -> bool {
        self.subscribers.is_empty() && self.fresh_outcome(ttl).is_none()
    }
}

/// Manages all task rooms.
///
/// Thread-safe via interior locking; designed to be wrapped in `Arc` and
/// shared between the gateway, the worker pool, and the WebSocket layer.
pub struct TaskRegistry {
    rooms: RwLock<HashMap<TaskId, Arc<Mutex<TaskRoom>>>>,
    outcome_ttl: Duration,
}

impl TaskRegistry {
    /// Create a registry whose cached outcomes expire after `outcome_ttl`.
    pub fn new(outcome_ttl: Duration) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            outcome_ttl,
        }
    }

    /// Get or create the room for a task.
    ///
    /// Lock order is always map-then-room; callers lock the returned room
    /// only after the map guard is dropped.
    async fn room(&self, task_id: TaskId) -> Arc<Mutex<TaskRoom>> {
        if let Some(room) = self.rooms.read().await.get(&task_id) {
            return Arc::clone(room);
        }
        let mut rooms = self.rooms.write().await;
        Arc::clone(rooms.entry(task_id).or_default())
    }

    /// Subscribe a connection to a task's outcome.
    ///
    /// If an outcome was already published and is still fresh, it is
    /// delivered to this connection immediately (late-join replay). A
    /// repeated join from the same connection replaces its sender but does
    /// not replay a second time.
    pub async fn join(&self, task_id: TaskId, conn_id: &str, sender: OutcomeSender) {
        let room = self.room(task_id).await;
        let mut room = room.lock().await;

        let already_subscribed = room
            .subscribers
            .insert(conn_id.to_string(), sender.clone())
            .is_some();

        if !already_subscribed {
            if let Some(outcome) = room.fresh_outcome(self.outcome_ttl) {
                let _ = sender.send(outcome.clone());
                tracing::debug!(task_id = %task_id, conn_id, "Replayed cached outcome on join");
            }
        }
    }

    /// Remove a connection from every room it joined.
    ///
    /// Called on disconnect; a subscription's lifetime is bounded by its
    /// connection. Rooms left with no subscribers and no fresh cache are
    /// dropped.
    pub async fn leave(&self, conn_id: &str) {
        let entries: Vec<(TaskId, Arc<Mutex<TaskRoom>>)> = self
            .rooms
            .read()
            .await
            .iter()
            .map(|(id, room)| (*id, Arc::clone(room)))
            .collect();

        let mut disposable = Vec::new();
        for (task_id, room) in entries {
            let mut room = room.lock().await;
            if room.subscribers.remove(conn_id).is_some()
                && room.is_disposable(self.outcome_ttl)
            {
                disposable.push(task_id);
            }
        }

        if !disposable.is_empty() {
            let mut rooms = self.rooms.write().await;
            for task_id in disposable {
                if let Some(room) = rooms.get(&task_id) {
                    // Re-check under the write lock; a join may have raced in.
                    if room.lock().await.is_disposable(self.outcome_ttl) {
                        rooms.remove(&task_id);
                    }
                }
            }
        }
    }

    /// Publish the terminal outcome for a task.
    ///
    /// Stores it in the cache (superseding any previous outcome for the
    /// same task) and delivers it to every current subscriber. Sends to
    /// connections that have since disconnected are silently skipped.
    pub async fn publish(&self, task_id: TaskId, outcome: TaskOutcome) {
        let room = self.room(task_id).await;
        let mut room = room.lock().await;

        room.cached = Some(CachedOutcome {
            outcome: outcome.clone(),
            published_at: Instant::now(),
        });

        let mut delivered = 0usize;
        for sender in room.subscribers.values() {
            if sender.send(outcome.clone()).is_ok() {
                delivered += 1;
            }
        }
        tracing::debug!(task_id = %task_id, delivered, "Published task outcome");
    }

    /// Re-deliver the cached outcome to one already-joined connection.
    ///
    /// Returns `true` if something was delivered.
    pub async fn replay(&self, task_id: TaskId, conn_id: &str) -> bool {
        let room = match self.rooms.read().await.get(&task_id) {
            Some(room) => Arc::clone(room),
            None => return false,
        };
        let room = room.lock().await;

        match (room.fresh_outcome(self.outcome_ttl), room.subscribers.get(conn_id)) {
            (Some(outcome), Some(sender)) => sender.send(outcome.clone()).is_ok(),
            _ => false,
        }
    }

    /// Drop expired outcome caches and the rooms they leave empty.
    ///
    /// Returns the number of rooms removed. Driven by a periodic sweep
    /// task so cache memory stays bounded.
    pub async fn prune_expired(&self) -> usize {
        let entries: Vec<(TaskId, Arc<Mutex<TaskRoom>>)> = self
            .rooms
            .read()
            .await
            .iter()
            .map(|(id, room)| (*id, Arc::clone(room)))
            .collect();

        let mut disposable = Vec::new();
        for (task_id, room) in entries {
            let mut room = room.lock().await;
            if room.fresh_outcome(self.outcome_ttl).is_none() {
                room.cached = None;
            }
            if room.is_disposable(self.outcome_ttl) {
                disposable.push(task_id);
            }
        }

        let mut removed = 0;
        if !disposable.is_empty() {
            let mut rooms = self.rooms.write().await;
            for task_id in disposable {
                if let Some(room) = rooms.get(&task_id) {
                    if room.lock().await.is_disposable(self.outcome_ttl) {
                        rooms.remove(&task_id);
                        removed += 1;
                    }
                }
            }
        }
        removed
    }

    /// Current number of subscribers for a task.
    pub async fn subscriber_count(&self, task_id: TaskId) -> usize {
        match self.rooms.read().await.get(&task_id) {
            Some(room) => room.lock().await.subscribers.len(),
            None => 0,
        }
    }

    /// Current number of live rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_OUTCOME_TTL)
    }
}
