//! Score submission DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserMeta;

/// Request body for `POST /submit-score`.
///
/// Fields are optional at the serde level so that missing values surface
/// as validation errors with specific messages.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    /// Game the score was achieved in.
    #[serde(default)]
    pub game_id: Option<String>,
    /// Candidate score; must be a non-negative integer.
    #[serde(default)]
    #[schema(value_type = Option<u64>)]
    pub score: Option<serde_json::Value>,
    /// Player metadata used to name a new profile.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub user_data: Option<UserMeta>,
}

/// `data` of a successful `POST /submit-score`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreResponse {
    /// Game id.
    pub game_id: String,
    /// Authenticated player.
    pub user_id: String,
    /// Submitted score.
    pub score: u64,
    /// Whether the submission beat the stored best.
    pub accepted: bool,
    /// Best score stored after the submission.
    pub best_score: u64,
}
