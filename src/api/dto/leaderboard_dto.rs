//! Leaderboard DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{RankedScore, RankedUser};

/// Row of a per-game leaderboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameLeaderboardEntryDto {
    /// Player id.
    pub user_id: String,
    /// Player name at the time of the best score.
    pub display_name: String,
    /// Best score.
    pub score: u64,
    /// 1-based position.
    pub rank: usize,
}

impl From<RankedScore> for GameLeaderboardEntryDto {
    fn from(row: RankedScore) -> Self {
        Self {
            user_id: row.record.user_id.to_string(),
            display_name: row.record.display_name,
            score: row.record.score,
            rank: row.rank,
        }
    }
}

/// Row of the global leaderboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GlobalLeaderboardEntryDto {
    /// Player id.
    pub user_id: String,
    /// Current display name.
    pub display_name: String,
    /// Sum of accepted submissions.
    pub total_points: u64,
    /// 1-based position.
    pub rank: usize,
}

impl From<RankedUser> for GlobalLeaderboardEntryDto {
    fn from(row: RankedUser) -> Self {
        Self {
            user_id: row.aggregate.user_id.to_string(),
            display_name: row.aggregate.display_name,
            total_points: row.aggregate.total_points,
            rank: row.rank,
        }
    }
}

/// `data` of `GET /leaderboard/{gameId}/rank/{userId}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRankDto {
    /// Game id.
    pub game_id: String,
    /// Player id.
    pub user_id: String,
    /// 1-based rank, `null` when the player has no score in the game.
    pub rank: Option<usize>,
}
