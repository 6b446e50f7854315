//! Score submission handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{ApiResponse, SubmitScoreRequest, SubmitScoreResponse};
use crate::api::extract::{API_KEY_HEADER, AuthenticatedUser, header_value};
use crate::app_state::AppState;
use crate::domain::GameId;
use crate::error::{ErrorResponse, GatewayError};
use crate::service::score_service::validate_score;

/// `POST /submit-score` — Submit a score for the authenticated player.
///
/// Checks run in a fixed order: bearer token, body shape and `gameId`,
/// score value, then the game's API key.
///
/// # Errors
///
/// Returns [`GatewayError`] for any failed check or store failure.
#[utoipa::path(
    post,
    path = "/api/v1/submit-score",
    tag = "Scores",
    summary = "Submit a score",
    description = "Records the score if it beats the player's stored best for the game. Accepted scores are added to the player's total points. Requires a bearer token and the game's `x-api-key` header.",
    request_body = SubmitScoreRequest,
    params(
        ("x-api-key" = String, Header, description = "API key issued when the game was registered"),
    ),
    responses(
        (status = 200, description = "Submission processed; `data` of the success envelope", body = SubmitScoreResponse),
        (status = 400, description = "Missing gameId or invalid score", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token, or missing API key", body = ErrorResponse),
        (status = 403, description = "Invalid API key for the game", body = ErrorResponse),
        (status = 500, description = "Store unavailable or failed", body = ErrorResponse),
    )
)]
pub async fn submit_score(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    headers: HeaderMap,
    payload: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload?;
    let game_id = GameId::parse(req.game_id.as_deref().unwrap_or_default())?;
    let score = validate_score(req.score.as_ref())?;

    let api_key = header_value(&headers, API_KEY_HEADER)
        .ok_or_else(|| GatewayError::Unauthorized("Missing API key".to_string()))?;
    if !state.game_service.verify_api_key(&game_id, api_key).await? {
        return Err(GatewayError::Forbidden("Invalid API key".to_string()));
    }

    let meta = req.user_data.unwrap_or_default();
    let outcome = state
        .score_service
        .submit_score(&game_id, &user_id, score, &meta)
        .await?;

    let message = if outcome.accepted {
        "Score submitted successfully"
    } else {
        "Score not higher than current best"
    };
    let data = SubmitScoreResponse {
        game_id: game_id.to_string(),
        user_id: user_id.to_string(),
        score,
        accepted: outcome.accepted,
        best_score: outcome.applied_score,
    };

    Ok(Json(ApiResponse::ok(data).with_message(message)))
}

/// Score routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/submit-score", post(submit_score))
}
