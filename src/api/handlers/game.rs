//! Game registry handlers: admin registration and public listing.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ApiResponse, GameDto, LimitParams, RegisterGameRequest, RegisteredGameDto};
use crate::api::extract::require_admin;
use crate::app_state::AppState;
use crate::domain::ranking::MAX_LEADERBOARD_LIMIT;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /admin/games` — Register a game and issue its API key.
///
/// # Errors
///
/// Returns [`GatewayError`] on a bad admin key, invalid name, or store
/// failure.
#[utoipa::path(
    post,
    path = "/api/v1/admin/games",
    tag = "Games",
    summary = "Register a game",
    description = "Creates a game and returns its plaintext API key. The key is not retrievable later.",
    request_body = RegisterGameRequest,
    params(("x-admin-key" = String, Header, description = "Operator admin key")),
    responses(
        (status = 201, description = "`data` of the success envelope", body = RegisteredGameDto),
        (status = 400, description = "Invalid game name", body = ErrorResponse),
        (status = 401, description = "Missing admin key", body = ErrorResponse),
        (status = 403, description = "Invalid admin key", body = ErrorResponse),
    )
)]
pub async fn register_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RegisterGameRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    require_admin(&headers, &state)?;
    let Json(req) = payload?;
    let registered = state
        .game_service
        .register_game(&req.name, req.description.as_deref().unwrap_or_default())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(RegisteredGameDto::from(registered)).with_message("Game registered")),
    ))
}

/// `GET /games` — List registered games.
///
/// # Errors
///
/// Returns [`GatewayError`] on store failures.
#[utoipa::path(
    get,
    path = "/api/v1/games",
    tag = "Games",
    summary = "List games",
    description = "Registered games, oldest first. API keys are never included.",
    params(LimitParams),
    responses(
        (status = 200, description = "`data` of the success envelope", body = Vec<GameDto>),
        (status = 400, description = "Malformed `limit`", body = ErrorResponse),
        (status = 500, description = "Store unavailable or failed", body = ErrorResponse),
    )
)]
pub async fn list_games(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Query(params) = params?;
    let limit = params.resolve(MAX_LEADERBOARD_LIMIT);
    let games: Vec<GameDto> = state
        .game_service
        .list_games(limit)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(ApiResponse::ok(games)))
}

/// Game routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/games", post(register_game))
        .route("/games", get(list_games))
}
