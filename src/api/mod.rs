//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; the banner and `/health`
//! live at the root.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::HeaderValue;
use axum::http::header::{
    STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};
use axum::{BoxError, Router};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::error::GatewayError;

pub use openapi::ApiDoc;

/// Builds the route table with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
        .merge(docs_routes())
}

/// Builds the complete application: routes, middleware, and state.
///
/// Requests exceeding `request_timeout_secs` are answered with a 408 in
/// the usual error envelope.
pub fn build_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    let middleware = ServiceBuilder::new()
        .layer(CorsLayer::permissive())
        .map_response(|res: axum::response::Response<_>| res.map(axum::body::Body::new))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        ))
        .layer(HandleErrorLayer::new(middleware_error))
        .layer(TimeoutLayer::new(timeout));

    build_router()
        .fallback(handlers::system::not_found)
        .layer(middleware)
        .with_state(state)
}

/// Converts errors raised by the middleware stack into gateway errors.
async fn middleware_error(err: BoxError) -> GatewayError {
    if err.is::<Elapsed>() {
        GatewayError::Timeout
    } else {
        GatewayError::Internal(err.to_string())
    }
}

#[cfg(not(feature = "swagger-ui"))]
fn docs_routes() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;
    use utoipa::OpenApi;

    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

#[cfg(feature = "swagger-ui")]
fn docs_routes() -> Router<AppState> {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn elapsed_timeout_maps_to_request_timeout() {
        let err = middleware_error(Box::new(Elapsed::new())).await;
        assert!(matches!(err, GatewayError::Timeout));
        assert_eq!(err.status_code(), axum::http::StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn other_middleware_errors_are_internal() {
        let err = middleware_error("boom".into()).await;
        assert!(matches!(err, GatewayError::Internal(_)));
        assert_eq!(err.public_message(), "Internal server error");
    }
}
