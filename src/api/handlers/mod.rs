//! REST endpoint handlers organized by resource.

pub mod community;
pub mod game;
pub mod leaderboard;
pub mod score;
pub mod system;
pub mod user;

use axum::Router;
use axum::routing::get;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(system::liveness_handler))
        .merge(score::routes())
        .merge(leaderboard::routes())
        .merge(user::routes())
        .merge(game::routes())
        .merge(community::routes())
}
