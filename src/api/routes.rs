//! HTTP API route definitions.

use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Settings;

use super::handlers::{get_example, health, list_examples, not_found, ready, AppState};

/// Create the API router.
///
/// The health and readiness endpoints live at the root; the example group
/// is nested under the configured API prefix. Conflicting registrations
/// (a group mounted twice, overlapping paths) panic here, during startup,
/// never at request time.
pub fn create_router(state: AppState) -> Router {
    let prefix = state.settings.api_prefix.clone();
    let cors = cors_layer(&state.settings);

    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Example route group
        .nest(&prefix, example_routes())
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Example route group. Paths are relative to the mount prefix.
pub fn example_routes() -> Router<AppState> {
    Router::new()
        .route("/examples", get(list_examples))
        .route("/examples/:id", get(get_example))
}

/// Build the CORS layer from the configured origin list.
///
/// A wildcard entry allows any origin without credentials; an explicit
/// origin list enables credentials (wildcards and credentials cannot be
/// combined in a CORS response).
fn cors_layer(settings: &Settings) -> CorsLayer {
    if settings.allowed_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = settings
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    }
}
