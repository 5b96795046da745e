//! Tests for the API-key gate and the health probe.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use chatgate_axum::routes::create_router;
use chatgate_core::settings::Settings;

use common::{StubInferenceClient, body_json, get, test_app, test_context};

fn auth_settings() -> Settings {
    Settings {
        enable_auth: true,
        api_key: "sekrit".into(),
        ..Settings::default()
    }
}

async fn auth_app() -> axum::Router {
    let ctx = test_context(
        auth_settings(),
        Some(Arc::new(StubInferenceClient::default())),
    )
    .await;
    create_router(ctx)
}

fn get_with_key(uri: &str, key: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-api-key", key)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn v1_routes_reject_missing_or_wrong_key() {
    let app = auth_app().await;

    let response = app.clone().oneshot(get("/v1/models")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(get_with_key("/v1/models", "wrong"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn v1_routes_accept_the_configured_key() {
    let app = auth_app().await;

    let response = app
        .oneshot(get_with_key("/v1/models", "sekrit"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn root_and_health_stay_open_with_auth_enabled() {
    let app = auth_app().await;

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_disabled_means_no_gate() {
    let app = test_app().await;

    let response = app.oneshot(get("/v1/models")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn root_banner_names_the_service() {
    let app = test_app().await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "chatgate");
    assert_eq!(body["status"], "running");
    assert!(body["endpoints"]["chat_completions"].is_string());
}

#[tokio::test]
async fn health_is_healthy_with_a_reachable_engine() {
    let app = test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["vllm_connected"], true);
    assert_eq!(body["available_models"][0], "stub-model");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn health_is_degraded_when_the_probe_fails() {
    let ctx = test_context(
        Settings::default(),
        Some(Arc::new(StubInferenceClient::failing())),
    )
    .await;
    let app = create_router(ctx);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["vllm_connected"], false);
    assert!(body["available_models"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_is_unhealthy_without_a_client() {
    let ctx = test_context(Settings::default(), None).await;
    let app = create_router(ctx);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["vllm_connected"], false);
}
