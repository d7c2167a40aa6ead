//! Unified error types for the service scaffold.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Unified application error.
///
/// Two classes matter at runtime: startup failures (configuration,
/// unreachable database) abort the process before any route is servable,
/// and [`AppError::Uninitialized`] marks a database handle request outside
/// the READY window. Everything else maps to a generic 500 response.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// MongoDB driver error.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Startup sequencing failure with no underlying driver cause.
    #[error("startup failed: {0}")]
    Startup(String),

    /// Database handle requested before startup or after shutdown.
    #[error("database not initialized")]
    Uninitialized,

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Programming-error class: log the cause, don't leak it.
            AppError::Uninitialized => "internal server error".to_string(),
            other => other.to_string(),
        };

        tracing::error!("request failed: {}", self);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { error: message }),
        )
            .into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_maps_to_internal_error() {
        let response = AppError::Uninitialized.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn startup_error_maps_to_internal_error() {
        let response = AppError::Startup("database unreachable".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn uninitialized_display_matches_contract() {
        assert_eq!(
            AppError::Uninitialized.to_string(),
            "database not initialized"
        );
    }
}
