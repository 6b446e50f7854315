//! Leaderboard query handlers: global, per-game, and single-player rank.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    ApiResponse, GameLeaderboardEntryDto, GlobalLeaderboardEntryDto, LimitParams, UserRankDto,
};
use crate::app_state::AppState;
use crate::domain::{GameId, UserId};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /leaderboard/global` — Players ranked by total points.
///
/// # Errors
///
/// Returns [`GatewayError`] on store failures.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/global",
    tag = "Leaderboards",
    summary = "Global leaderboard",
    description = "Players ordered by total points, highest first. Ties go to the older profile.",
    params(LimitParams),
    responses(
        (status = 200, description = "`data` of the success envelope", body = Vec<GlobalLeaderboardEntryDto>),
        (status = 400, description = "Malformed `limit`", body = ErrorResponse),
        (status = 500, description = "Store unavailable or failed", body = ErrorResponse),
    )
)]
pub async fn global_leaderboard(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Query(params) = params?;
    let limit = params.resolve(state.config.leaderboard_default_limit);
    let rows: Vec<GlobalLeaderboardEntryDto> = state
        .leaderboard_service
        .global_leaderboard(limit)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(ApiResponse::ok(rows)))
}

/// `GET /leaderboard/{game_id}` — Best scores of one game.
///
/// # Errors
///
/// Returns [`GatewayError`] on an empty game id or store failures.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/{game_id}",
    tag = "Leaderboards",
    summary = "Game leaderboard",
    description = "Each player's best score in the game, highest first. Ties go to whoever reached the score first. An unplayed game yields an empty list.",
    params(
        ("game_id" = String, Path, description = "Game id"),
        LimitParams,
    ),
    responses(
        (status = 200, description = "`data` of the success envelope", body = Vec<GameLeaderboardEntryDto>),
        (status = 400, description = "Malformed `limit`", body = ErrorResponse),
        (status = 500, description = "Store unavailable or failed", body = ErrorResponse),
    )
)]
pub async fn game_leaderboard(
    State(state): State<AppState>,
    game_id: Result<Path<String>, PathRejection>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path(game_id) = game_id?;
    let Query(params) = params?;
    let game_id = GameId::parse(&game_id)?;
    let limit = params.resolve(state.config.leaderboard_default_limit);
    let rows: Vec<GameLeaderboardEntryDto> = state
        .leaderboard_service
        .game_leaderboard(&game_id, limit)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(ApiResponse::ok(rows)))
}

/// `GET /leaderboard/{game_id}/rank/{user_id}` — One player's rank.
///
/// # Errors
///
/// Returns [`GatewayError`] on empty ids or store failures.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/{game_id}/rank/{user_id}",
    tag = "Leaderboards",
    summary = "Player rank in a game",
    description = "1-based position of the player on the game's leaderboard, or `null` when the player has no score there.",
    params(
        ("game_id" = String, Path, description = "Game id"),
        ("user_id" = String, Path, description = "Player id"),
    ),
    responses(
        (status = 200, description = "`data` of the success envelope", body = UserRankDto),
        (status = 500, description = "Store unavailable or failed", body = ErrorResponse),
    )
)]
pub async fn user_rank(
    State(state): State<AppState>,
    ids: Result<Path<(String, String)>, PathRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Path((game_id, user_id)) = ids?;
    let game_id = GameId::parse(&game_id)?;
    let user_id = UserId::parse(&user_id)?;
    let rank = state
        .leaderboard_service
        .user_rank(&game_id, &user_id)
        .await?;
    Ok(Json(ApiResponse::ok(UserRankDto {
        game_id: game_id.to_string(),
        user_id: user_id.to_string(),
        rank,
    })))
}

/// Leaderboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard/global", get(global_leaderboard))
        .route("/leaderboard/{game_id}", get(game_leaderboard))
        .route("/leaderboard/{game_id}/rank/{user_id}", get(user_rank))
}
