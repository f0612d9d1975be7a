//! HTTP-level integration tests for the generation gateway and the
//! fallback read paths (`/comics`, `/tasks`).
//!
//! Only the submission side runs here -- no worker pool is started, so
//! jobs stay `queued` and the task status endpoint can be checked against
//! known state.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Test: POST /api/v1/comics/generate returns 202 with a task id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_returns_accepted_with_task_id(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/comics/generate",
        json!({ "hero_ids": [1, 2], "villain_ids": [3] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = body_json(response).await;
    let task_id = body["data"]["task_id"].as_str().expect("task_id present");
    assert!(task_id.parse::<Uuid>().is_ok(), "task_id must be a UUID");
}

// ---------------------------------------------------------------------------
// Test: task ids are unique across submissions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn task_ids_are_unique_across_submissions(pool: PgPool) {
    let app = build_test_app(pool);
    let input = json!({ "hero_ids": [], "villain_ids": [] });

    let first = body_json(post_json(app.clone(), "/api/v1/comics/generate", input.clone()).await)
        .await["data"]["task_id"]
        .clone();
    let second = body_json(post_json(app, "/api/v1/comics/generate", input).await).await["data"]
        ["task_id"]
        .clone();

    assert_ne!(first, second);
}

// ---------------------------------------------------------------------------
// Test: empty id sequences are accepted
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_input_sequences_are_accepted(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/comics/generate",
        json!({ "hero_ids": [], "villain_ids": [] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

// ---------------------------------------------------------------------------
// Test: negative entity ids are rejected with a validation error
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_ids_are_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/comics/generate",
        json!({ "hero_ids": [1, -5], "villain_ids": [] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("-5"));
}

// ---------------------------------------------------------------------------
// Test: non-integer ids never reach the handler
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_ids_are_rejected_by_deserialization(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/comics/generate",
        json!({ "hero_ids": ["one"], "villain_ids": [] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/tasks/{task_id} reports the queued job
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn task_status_reports_queued_job(pool: PgPool) {
    let app = build_test_app(pool);

    let submitted = body_json(
        post_json(
            app.clone(),
            "/api/v1/comics/generate",
            json!({ "hero_ids": [7], "villain_ids": [8, 9] }),
        )
        .await,
    )
    .await;
    let task_id = submitted["data"]["task_id"].as_str().unwrap().to_string();

    let response = get(app, &format!("/api/v1/tasks/{task_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "queued");
    assert_eq!(body["data"]["hero_ids"], json!([7]));
    assert_eq!(body["data"]["villain_ids"], json!([8, 9]));
    assert_eq!(body["data"]["comic_id"], json!(null));
}

// ---------------------------------------------------------------------------
// Test: unknown task id returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_task_id_returns_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, &format!("/api/v1/tasks/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: the polling fallback endpoints respond without any artifacts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn comics_list_starts_empty(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app.clone(), "/api/v1/comics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"], json!([]));

    let response = get(app, "/api/v1/comics/12345").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
