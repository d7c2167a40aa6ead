//! HTTP API handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::config::Settings;
use crate::db::{Lifecycle, MongoClient};
use crate::error::ErrorBody;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable settings snapshot.
    pub settings: Arc<Settings>,
    /// Database connection lifecycle manager.
    pub db: Arc<Lifecycle<MongoClient>>,
}

impl AppState {
    /// Create app state from loaded settings and a lifecycle manager.
    pub fn new(settings: Settings, db: Arc<Lifecycle<MongoClient>>) -> Self {
        Self {
            settings: Arc::new(settings),
            db,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: &'static str,
    /// Configured application version, echoed verbatim.
    pub version: String,
    /// Configured environment label, echoed verbatim.
    pub environment: String,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether the database lifecycle is in its serving window.
    pub ready: bool,
}

/// Placeholder example record.
#[derive(Debug, Serialize)]
pub struct ExampleResponse {
    /// Example identifier.
    pub id: String,
    /// Example name.
    pub name: String,
}

/// Health check handler - always returns 200, regardless of database state.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: state.settings.app_version.clone(),
        environment: state.settings.environment.clone(),
    })
}

/// Readiness handler - 200 once the database lifecycle is READY, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.db.is_ready().await;

    let status = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadyResponse { ready: is_ready }))
}

/// List examples (placeholder, no business behavior).
pub async fn list_examples() -> impl IntoResponse {
    Json(Vec::<ExampleResponse>::new())
}

/// Fetch a single example by id (placeholder, echoes the id back).
pub async fn get_example(Path(id): Path<String>) -> impl IntoResponse {
    Json(ExampleResponse {
        id,
        name: "example".to_string(),
    })
}

/// Fallback handler - JSON 404 for unmatched paths.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "not found".to_string(),
        }),
    )
}
