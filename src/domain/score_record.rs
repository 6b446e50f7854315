//! Best-score entry for one player in one game.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GameId, UserId};

/// Persisted best score for a `(game, user)` pair.
///
/// For a fixed key `score` never decreases: a submission only replaces it
/// when strictly greater. `display_name` is a snapshot taken at write time
/// and is not authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Game the score belongs to.
    pub game_id: GameId,
    /// Player who achieved the score.
    pub user_id: UserId,
    /// Best score so far.
    pub score: u64,
    /// Player display name at the time of the last accepted write.
    pub display_name: String,
    /// Time of the last accepted write.
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a compare-and-swap against the stored best score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreUpdate {
    /// No record existed; one was created with the candidate score.
    Created(ScoreRecord),
    /// The candidate was strictly greater and replaced the stored score.
    Improved {
        /// Score that was replaced.
        previous: u64,
        /// Record after the write.
        record: ScoreRecord,
    },
    /// The candidate did not beat the stored score; nothing was written.
    Unchanged(ScoreRecord),
}

impl ScoreUpdate {
    /// Applies the monotonic-improvement rule to an optional existing record.
    ///
    /// Store implementations call this while holding whatever isolation
    /// they use for the read-modify-write, then persist the returned record
    /// when [`ScoreUpdate::accepted`] is true.
    #[must_use]
    pub fn decide(
        existing: Option<ScoreRecord>,
        game_id: &GameId,
        user_id: &UserId,
        candidate: u64,
        display_name: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let fresh = || ScoreRecord {
            game_id: game_id.clone(),
            user_id: user_id.clone(),
            score: candidate,
            display_name: display_name.to_string(),
            updated_at: now,
        };
        match existing {
            None => Self::Created(fresh()),
            Some(current) if candidate > current.score => Self::Improved {
                previous: current.score,
                record: fresh(),
            },
            Some(current) => Self::Unchanged(current),
        }
    }

    /// Returns `true` when the candidate score was committed.
    #[must_use]
    pub const fn accepted(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }

    /// Returns the record as it stands after the update.
    #[must_use]
    pub const fn record(&self) -> &ScoreRecord {
        match self {
            Self::Created(record) | Self::Improved { record, .. } | Self::Unchanged(record) => {
                record
            }
        }
    }
}
