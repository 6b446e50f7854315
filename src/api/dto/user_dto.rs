//! Profile DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserAggregate;

/// Player profile as returned by the `/users/{userId}` endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    /// Player id.
    pub user_id: String,
    /// Display name.
    pub display_name: String,
    /// Sum of accepted submissions.
    pub total_points: u64,
    /// Number of accepted submissions.
    pub games_played: u64,
    /// Profile creation time.
    pub created_at: DateTime<Utc>,
    /// Last activity time.
    pub last_active: DateTime<Utc>,
}

impl From<UserAggregate> for ProfileDto {
    fn from(agg: UserAggregate) -> Self {
        Self {
            user_id: agg.user_id.to_string(),
            display_name: agg.display_name,
            total_points: agg.total_points,
            games_played: agg.games_played,
            created_at: agg.created_at,
            last_active: agg.last_active,
        }
    }
}

/// Request body for `PUT /users/{userId}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name, 3–20 characters.
    #[serde(default)]
    pub display_name: Option<String>,
}
