//! Integration tests for the service scaffold.
//!
//! Lifecycle tests run against the mock client; tests that need a real
//! MongoDB instance are marked `#[ignore]`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use mongo_api_starter::api::{create_router, AppState};
use mongo_api_starter::config::Settings;
use mongo_api_starter::db::mock::{MockBehavior, MockClient};
use mongo_api_starter::db::{Lifecycle, MongoClient};
use mongo_api_starter::error::AppError;

fn test_settings() -> Settings {
    Settings {
        mongodb_database: "starter_test".to_string(),
        app_version: "9.9.9".to_string(),
        environment: "test".to_string(),
        ..Settings::default()
    }
}

/// Startup followed immediately by shutdown, no requests served, leaves no
/// open connection.
#[tokio::test]
async fn startup_then_shutdown_leaves_no_open_connection() {
    let client = MockClient::new();
    let calls = client.calls();

    let lifecycle = Lifecycle::new();
    lifecycle.startup(client, "starter_test").await.unwrap();
    lifecycle.shutdown().await;

    assert!(calls.shutdown_called());
}

/// An unreachable database aborts startup before any route is servable.
#[tokio::test]
async fn unreachable_database_aborts_startup() {
    let client = MockClient::with_behavior(MockBehavior { fail_ping: true });
    let calls = client.calls();

    let lifecycle = Lifecycle::new();
    let result = lifecycle.startup(client, "starter_test").await;

    assert!(result.is_err());
    // The half-built client was still released.
    assert!(calls.shutdown_called());
    assert!(matches!(
        lifecycle.handle().await,
        Err(AppError::Uninitialized)
    ));
}

/// The handle is only available inside the READY window.
#[tokio::test]
async fn handle_is_scoped_to_the_serving_window() {
    let lifecycle = Lifecycle::new();
    assert!(matches!(
        lifecycle.handle().await,
        Err(AppError::Uninitialized)
    ));

    lifecycle
        .startup(MockClient::new(), "starter_test")
        .await
        .unwrap();
    assert_eq!(lifecycle.handle().await.unwrap().name, "starter_test");

    lifecycle.shutdown().await;
    assert!(matches!(
        lifecycle.handle().await,
        Err(AppError::Uninitialized)
    ));
}

/// The health endpoint serves without a database, echoing configured
/// metadata verbatim.
#[tokio::test]
async fn health_serves_without_database() {
    let state = AppState::new(test_settings(), Arc::new(Lifecycle::new()));
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "9.9.9");
    assert_eq!(body["environment"], "test");
}

/// Full lifecycle pass against a real server.
#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn lifecycle_against_real_mongodb() {
    let settings = test_settings();

    let client = MongoClient::connect(&settings)
        .await
        .expect("client construction");

    let lifecycle = Lifecycle::new();
    lifecycle
        .startup(client, &settings.mongodb_database)
        .await
        .expect("MongoDB reachable");

    let db = lifecycle.handle().await.expect("handle in READY state");
    assert_eq!(db.name(), "starter_test");

    lifecycle.shutdown().await;
    assert!(matches!(
        lifecycle.handle().await,
        Err(AppError::Uninitialized)
    ));
}

/// Readiness flips to 200 once startup completes against a real server.
#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn ready_endpoint_flips_after_startup() {
    let settings = test_settings();
    let lifecycle = Arc::new(Lifecycle::new());
    let state = AppState::new(settings.clone(), lifecycle.clone());
    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let client = MongoClient::connect(&settings)
        .await
        .expect("client construction");
    lifecycle
        .startup(client, &settings.mongodb_database)
        .await
        .expect("MongoDB reachable");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    lifecycle.shutdown().await;
}
