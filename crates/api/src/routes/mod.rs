//! Route definitions.
//!
//! Route hierarchy under `/api/v1`:
//!
//! ```text
//! /ws                        WebSocket (task subscriptions)
//!
//! /heroes                    list, create (generated from a name)
//! /villains                  list, create (generated from a name)
//!
//! /comics                    list (polling fallback)
//! /comics/{id}               get
//! /comics/generate           submit a generation job (returns task_id)
//!
//! /tasks/{task_id}           job status read (reload-resume fallback)
//! ```
//!
//! `/health` is mounted at root level, outside `/api/v1`.

pub mod comics;
pub mod health;
pub mod heroes;
pub mod tasks;
pub mod villains;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/heroes", heroes::router())
        .nest("/villains", villains::router())
        .nest("/comics", comics::router())
        .nest("/tasks", tasks::router())
}
