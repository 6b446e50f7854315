//! System endpoints: banner, health checks, and the 404 fallback.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::error::GatewayError;

/// Root banner.
#[derive(Debug, Serialize, ToSchema)]
pub struct BannerResponse {
    /// Service name.
    pub message: String,
    /// Always `running`.
    pub status: String,
    /// Current server time (RFC 3339).
    pub timestamp: String,
}

/// Dependency status reported by `/health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    /// `connected` or `disconnected`.
    pub database: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy`.
    pub status: String,
    /// Dependency status.
    pub services: ServiceStatus,
    /// Current server time (RFC 3339).
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// Liveness response for `/api/v1/health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LivenessResponse {
    /// Always `OK`.
    pub status: String,
    /// Current server time (RFC 3339).
    pub timestamp: String,
}

/// `GET /` — Service banner.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Service banner",
    responses(
        (status = 200, description = "Server is running", body = BannerResponse),
    )
)]
pub async fn banner_handler() -> impl IntoResponse {
    Json(BannerResponse {
        message: "Playrush Backend Server".to_string(),
        status: "running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// `GET /health` — Service and store health.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Reports whether the score store answers a ping. The service itself stays healthy when the store is down; store-backed endpoints answer 500 instead.",
    responses(
        (status = 200, description = "Service health", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.store.get() {
        Ok(store) => match store.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!(error = %e, "store ping failed");
                "disconnected"
            }
        },
        Err(_) => "disconnected",
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            services: ServiceStatus {
                database: database.to_string(),
            },
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /api/v1/health` — Liveness check; never touches the store.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "System",
    summary = "Liveness check",
    responses(
        (status = 200, description = "Process is up", body = LivenessResponse),
    )
)]
pub async fn liveness_handler() -> impl IntoResponse {
    Json(LivenessResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found() -> GatewayError {
    GatewayError::NotFound("Route not found".to_string())
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banner_handler))
        .route("/health", get(health_handler))
}
