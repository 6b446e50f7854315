//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::handlers;

/// Generated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Playrush Gateway",
        description = "Score submission and leaderboards for the Playrush game portal."
    ),
    paths(
        handlers::score::submit_score,
        handlers::leaderboard::global_leaderboard,
        handlers::leaderboard::game_leaderboard,
        handlers::leaderboard::user_rank,
        handlers::user::get_profile,
        handlers::user::update_profile,
        handlers::game::register_game,
        handlers::game::list_games,
        handlers::community::recent_activity,
        handlers::system::banner_handler,
        handlers::system::health_handler,
        handlers::system::liveness_handler,
    ),
    tags(
        (name = "Scores", description = "Score submission"),
        (name = "Leaderboards", description = "Per-game and global rankings"),
        (name = "Users", description = "Player profiles"),
        (name = "Games", description = "Game registry"),
        (name = "Community", description = "Activity feed"),
        (name = "System", description = "Health and banner"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_core_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/submit-score",
            "/api/v1/leaderboard/global",
            "/api/v1/leaderboard/{game_id}",
            "/api/v1/leaderboard/{game_id}/rank/{user_id}",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
