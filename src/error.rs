//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and the JSON failure envelope
//! `{"success": false, "error": "<message>"}`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{GameId, UserId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "success": false,
///   "error": "Score must be a non-negative integer"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant                     | HTTP Status |
/// |-----------------------------|-------------|
/// | `Validation`                | 400         |
/// | `Unauthorized`              | 401         |
/// | `Forbidden`                 | 403         |
/// | `GameNotFound` / `UserNotFound` / `NotFound` | 404 |
/// | `Timeout`                   | 408         |
/// | `DatabaseUnavailable`       | 500         |
/// | `Persistence` / `Internal`  | 500         |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request input has the wrong shape or range.
    #[error("{0}")]
    Validation(String),

    /// Credential missing or invalid.
    #[error("{0}")]
    Unauthorized(String),

    /// Caller is authenticated but not entitled to the resource.
    #[error("{0}")]
    Forbidden(String),

    /// Game with the given id does not exist.
    #[error("Game not found")]
    GameNotFound(GameId),

    /// User with the given id does not exist.
    #[error("User not found")]
    UserNotFound(UserId),

    /// Any other missing resource (unknown route, ...).
    #[error("{0}")]
    NotFound(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timeout")]
    Timeout,

    /// The store handle is not configured or the store cannot be reached.
    #[error("Database service not available")]
    DatabaseUnavailable,

    /// Store operation failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::GameNotFound(_) | Self::UserNotFound(_) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::DatabaseUnavailable | Self::Persistence(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the message shown to clients.
    ///
    /// Store and internal failures collapse to a fixed message so that no
    /// internal detail leaks into the response body.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Persistence(_) | Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Persistence(detail) | Self::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
            }
            Self::DatabaseUnavailable => tracing::warn!("store handle not available"),
            Self::Timeout => tracing::warn!("request timed out"),
            _ => tracing::debug!(%status, error = %self, "request rejected"),
        }
        let body = ErrorResponse {
            success: false,
            error: self.public_message(),
        };
        (status, axum::Json(body)).into_response()
    }
}
