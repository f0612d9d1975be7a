//! WebSocket message type constants for the task notification protocol.
//!
//! Used by the API WebSocket handler when parsing inbound frames and by
//! clients matching on pushed events.

/// Inbound: client asks to subscribe to a task's outcome.
pub const MSG_TYPE_JOIN_TASK: &str = "join_task";

/// Outbound: acknowledgement that the join was registered.
pub const MSG_TYPE_TASK_JOINED: &str = "task_joined";

/// Outbound: a request frame could not be understood.
pub const MSG_TYPE_ERROR: &str = "error";

/// Outcome event name for a successful generation.
pub const EVENT_COMPLETED: &str = "completed";

/// Outcome event name for a terminally failed generation.
pub const EVENT_FAILED: &str = "failed";
