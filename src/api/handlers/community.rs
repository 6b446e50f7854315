//! Community feed handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::ApiResponse;
use crate::app_state::AppState;
use crate::domain::CommunityActivity;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /community/recent-activity` — Latest community posts.
///
/// # Errors
///
/// Returns [`GatewayError`] on store failures.
#[utoipa::path(
    get,
    path = "/api/v1/community/recent-activity",
    tag = "Community",
    summary = "Recent activity",
    description = "The 20 most recent community posts, newest first. Accepted high scores post here automatically.",
    responses(
        (status = 200, description = "`data` of the success envelope", body = Vec<CommunityActivity>),
        (status = 500, description = "Store unavailable or failed", body = ErrorResponse),
    )
)]
pub async fn recent_activity(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let activities = state.activity_service.recent().await?;
    Ok(Json(ApiResponse::ok(activities)))
}

/// Community routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/community/recent-activity", get(recent_activity))
}
