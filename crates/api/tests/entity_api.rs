//! HTTP-level integration tests for the `/heroes` and `/villains`
//! endpoints, which generate full profiles synchronously from a name.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with_backend, get, post_json, StubBackend};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: POST /api/v1/heroes generates, sanitizes, and persists a profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_hero_persists_generated_profile(pool: PgPool) {
    // The backend wraps its JSON in commentary and a fence, as the real
    // one routinely does.
    let backend = StubBackend::scripted(vec![Ok(
        "Hero: Bob```json\n{\"hero_name\":\"Bob\",\"age\":30,\"powers\":\"Flight, Laser Vision\"}\n```"
            .to_string(),
    )]);
    let app = build_test_app_with_backend(pool, backend);

    let response = post_json(app.clone(), "/api/v1/heroes", json!({ "hero_name": "Bob" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["hero_name"], "Bob");
    assert_eq!(body["data"]["age"], 30);
    assert_eq!(body["data"]["powers"], "Flight, Laser Vision");
    // Attributes the backend left unknown stay null.
    assert_eq!(body["data"]["real_name"], json!(null));

    let listed = body_json(get(app, "/api/v1/heroes").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: empty hero name is rejected before any backend call
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_hero_rejects_empty_name(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(app, "/api/v1/heroes", json!({ "hero_name": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: a backend that keeps returning prose maps to 502
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unusable_backend_text_maps_to_bad_gateway(pool: PgPool) {
    // Two responses: the sanitizer rejects the first, the pipeline asks
    // for one fresh generation, then gives up.
    let backend = StubBackend::scripted(vec![
        Ok("no idea".to_string()),
        Ok("still no idea".to_string()),
    ]);
    let app = build_test_app_with_backend(pool, backend);

    let response = post_json(app.clone(), "/api/v1/heroes", json!({ "hero_name": "Bob" })).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["code"], "GENERATION_FAILED");

    // Nothing half-built may reach storage.
    let listed = body_json(get(app, "/api/v1/heroes").await).await;
    assert_eq!(listed["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Test: an unreachable backend maps to 502 BACKEND_UNAVAILABLE
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unreachable_backend_maps_to_backend_unavailable(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(app, "/api/v1/villains", json!({ "villain_name": "Umbra" })).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["code"], "BACKEND_UNAVAILABLE");
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/villains round-trips a generated profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_villain_persists_generated_profile(pool: PgPool) {
    let backend = StubBackend::scripted(vec![Ok(
        r#"{"villain_name":"Umbra","origin":"The Void","strength_level":70}"#.to_string(),
    )]);
    let app = build_test_app_with_backend(pool, backend);

    let response =
        post_json(app.clone(), "/api/v1/villains", json!({ "villain_name": "Umbra" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["villain_name"], "Umbra");
    assert_eq!(body["data"]["origin"], "The Void");
    assert_eq!(body["data"]["strength_level"], 70);

    let listed = body_json(get(app, "/api/v1/villains").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}
