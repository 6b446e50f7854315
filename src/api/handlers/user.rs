//! Profile handlers. A player may only read or edit their own profile.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ApiResponse, ProfileDto, UpdateProfileRequest};
use crate::api::extract::AuthenticatedUser;
use crate::app_state::AppState;
use crate::domain::UserId;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /users/{user_id}` — Read the caller's profile.
///
/// # Errors
///
/// Returns [`GatewayError`] when the caller is not `user_id` or the store
/// fails.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    summary = "Get profile",
    description = "Returns the caller's profile, creating an empty one on first access.",
    params(("user_id" = String, Path, description = "Player id; must match the bearer token")),
    responses(
        (status = 200, description = "`data` of the success envelope", body = ProfileDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Profile belongs to someone else", body = ErrorResponse),
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthenticatedUser(requester): AuthenticatedUser,
    user_id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path(user_id) = user_id?;
    let user_id = UserId::parse(&user_id)?;
    let profile = state
        .profile_service
        .get_profile(&requester, &user_id)
        .await?;
    Ok(Json(ApiResponse::ok(ProfileDto::from(profile))))
}

/// `PUT /users/{user_id}` — Change the caller's display name.
///
/// # Errors
///
/// Returns [`GatewayError`] when the caller is not `user_id`, the name is
/// invalid, or the store fails.
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    summary = "Update profile",
    description = "Sets the display name (3–20 characters after trimming). Existing leaderboard rows keep the name they were recorded with.",
    params(("user_id" = String, Path, description = "Player id; must match the bearer token")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "`data` of the success envelope", body = ProfileDto),
        (status = 400, description = "Invalid display name", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Profile belongs to someone else", body = ErrorResponse),
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthenticatedUser(requester): AuthenticatedUser,
    user_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path(user_id) = user_id?;
    let user_id = UserId::parse(&user_id)?;
    let Json(req) = payload?;
    let display_name = req.display_name.unwrap_or_default();
    let profile = state
        .profile_service
        .update_display_name(&requester, &user_id, &display_name)
        .await?;
    Ok(Json(
        ApiResponse::ok(ProfileDto::from(profile)).with_message("Profile updated"),
    ))
}

/// Profile routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{user_id}", get(get_profile).put(update_profile))
}
