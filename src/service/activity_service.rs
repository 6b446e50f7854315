//! Community activity feed.

use chrono::Utc;

use crate::domain::{ActivityKind, CommunityActivity, Game, ScoreRecord};
use crate::error::GatewayError;
use crate::store::StoreHandle;

/// Number of entries served by the recent-activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 20;

/// Appends to and reads from the community feed.
#[derive(Debug, Clone)]
pub struct ActivityService {
    store: StoreHandle,
}

impl ActivityService {
    /// Creates an activity service over `store`.
    #[must_use]
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Posts a "High Score Achieved" entry for an accepted submission.
    ///
    /// Best effort: failures are logged and swallowed so that the feed can
    /// never fail a score submission.
    pub async fn record_high_score(&self, game: &Game, record: &ScoreRecord) {
        let activity = CommunityActivity::new(
            ActivityKind::Leaderboard,
            "High Score Achieved",
            format!(
                "{} achieved a new high score of {} in {}!",
                record.display_name, record.score, game.name
            ),
            record.score,
            Utc::now(),
        );
        let result = match self.store.get() {
            Ok(store) => store.append_activity(activity).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, game_id = %game.id, "failed to record activity");
        }
    }

    /// Returns the newest [`RECENT_ACTIVITY_LIMIT`] activities.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn recent(&self) -> Result<Vec<CommunityActivity>, GatewayError> {
        self.store
            .get()?
            .recent_activities(RECENT_ACTIVITY_LIMIT)
            .await
    }
}
