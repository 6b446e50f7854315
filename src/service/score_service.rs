//! Score submission handler.
//!
//! Flow for one submission: resolve the game, make sure the player has a
//! profile, run the compare-and-swap against the stored best score, and only
//! when the candidate is accepted update the player's aggregate (exactly
//! once) and post to the community feed.

use chrono::Utc;

use crate::domain::{GameId, ScoreRecord, ScoreUpdate, UserAggregate, UserId, UserMeta};
use crate::error::GatewayError;
use crate::service::{ActivityService, AggregateUpdater, GameService, ProfileService};
use crate::store::StoreHandle;

/// Largest accepted score (2^53 - 1, the largest integer every JSON client
/// represents exactly).
pub const MAX_SCORE: u64 = 9_007_199_254_740_991;

/// Result of a score submission.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// Whether the candidate was committed.
    pub accepted: bool,
    /// Best score stored after the submission.
    pub applied_score: u64,
    /// Stored record after the submission.
    pub record: ScoreRecord,
    /// Updated aggregate, present only when accepted.
    pub aggregate: Option<UserAggregate>,
}

/// Validates and applies score submissions.
#[derive(Debug, Clone)]
pub struct ScoreService {
    store: StoreHandle,
    games: GameService,
    profiles: ProfileService,
    aggregates: AggregateUpdater,
    activities: ActivityService,
}

impl ScoreService {
    /// Wires a score service from its collaborators.
    #[must_use]
    pub fn new(
        store: StoreHandle,
        games: GameService,
        profiles: ProfileService,
        aggregates: AggregateUpdater,
        activities: ActivityService,
    ) -> Self {
        Self {
            store,
            games,
            profiles,
            aggregates,
            activities,
        }
    }

    /// Submits `score` for `user_id` in `game_id`.
    ///
    /// The stored best only changes when `score` is strictly greater; a
    /// lower or equal score is a no-op that reports `accepted: false` and
    /// leaves the player's aggregate untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] when `score` exceeds
    /// [`MAX_SCORE`], [`GatewayError::GameNotFound`] for unknown games, and
    /// propagates store failures (not retried).
    pub async fn submit_score(
        &self,
        game_id: &GameId,
        user_id: &UserId,
        score: u64,
        meta: &UserMeta,
    ) -> Result<SubmissionOutcome, GatewayError> {
        if score > MAX_SCORE {
            return Err(invalid_score());
        }
        let store = self.store.get()?;

        let game = self.games.get_game(game_id).await?;
        let profile = self.profiles.ensure_user(user_id, meta).await?;

        let update = store
            .record_best_score(game_id, user_id, score, &profile.display_name, Utc::now())
            .await?;

        let aggregate = if update.accepted() {
            let aggregate = self
                .aggregates
                .apply_accepted_score(user_id, &profile.display_name, score)
                .await?;
            self.activities
                .record_high_score(&game, update.record())
                .await;
            Some(aggregate)
        } else {
            None
        };

        match &update {
            ScoreUpdate::Created(_) => {
                tracing::info!(%game_id, %user_id, score, "first score recorded");
            }
            ScoreUpdate::Improved { previous, .. } => {
                tracing::info!(%game_id, %user_id, score, previous, "score accepted");
            }
            ScoreUpdate::Unchanged(record) => {
                tracing::debug!(%game_id, %user_id, score, best = record.score, "score not higher");
            }
        }

        let accepted = update.accepted();
        let record = update.record().clone();
        Ok(SubmissionOutcome {
            accepted,
            applied_score: record.score,
            record,
            aggregate,
        })
    }
}

fn invalid_score() -> GatewayError {
    GatewayError::Validation("Score must be a non-negative integer".to_string())
}

/// Validates a raw JSON score.
///
/// Accepts non-negative integers up to [`MAX_SCORE`], including integral
/// floats such as `5.0`.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] when the score is missing, null,
/// negative, fractional, non-numeric or too large.
pub fn validate_score(raw: Option<&serde_json::Value>) -> Result<u64, GatewayError> {
    let value = raw
        .filter(|v| !v.is_null())
        .ok_or_else(|| GatewayError::Validation("Missing score".to_string()))?;

    let score = match value.as_u64() {
        Some(score) => score,
        None => match value.as_f64() {
            Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= MAX_SCORE as f64 => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let score = f as u64;
                score
            }
            _ => return Err(invalid_score()),
        },
    };

    if score > MAX_SCORE {
        return Err(invalid_score());
    }
    Ok(score)
}
