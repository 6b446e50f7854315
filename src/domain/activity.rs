//! Community activity feed entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category of a community activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A player joined.
    Login,
    /// A leaderboard-relevant event (new high score, rank change).
    Leaderboard,
    /// A community task was completed.
    Task,
}

impl ActivityKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Leaderboard => "leaderboard",
            Self::Task => "task",
        }
    }

    /// Parses a wire name, returning `None` for unknown kinds.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "login" => Some(Self::Login),
            "leaderboard" => Some(Self::Leaderboard),
            "task" => Some(Self::Task),
            _ => None,
        }
    }
}

/// One item in the community feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommunityActivity {
    /// Unique activity id.
    pub id: uuid::Uuid,
    /// Short headline.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Points associated with the event.
    pub points: u64,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
}

impl CommunityActivity {
    /// Creates a new activity stamped with `timestamp`.
    #[must_use]
    pub fn new(
        kind: ActivityKind,
        title: impl Into<String>,
        description: impl Into<String>,
        points: u64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            kind,
            points,
            timestamp,
        }
    }
}
