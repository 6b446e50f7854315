//! User aggregate updater: running totals per user.

use chrono::Utc;

use crate::domain::{UserAggregate, UserId};
use crate::error::GatewayError;
use crate::store::StoreHandle;

/// Maintains `total_points` / `games_played` from accepted submissions.
///
/// Not idempotent: each call counts one more submission. The caller must
/// invoke it exactly once per accepted score.
#[derive(Debug, Clone)]
pub struct AggregateUpdater {
    store: StoreHandle,
}

impl AggregateUpdater {
    /// Creates an updater over `store`.
    #[must_use]
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Adds `score` to the user's total points and one to games played.
    ///
    /// Creates the aggregate, named `display_name`, if the user has none.
    ///
    /// # Errors
    ///
    /// Propagates store failures, including
    /// [`GatewayError::DatabaseUnavailable`].
    pub async fn apply_accepted_score(
        &self,
        user_id: &UserId,
        display_name: &str,
        score: u64,
    ) -> Result<UserAggregate, GatewayError> {
        let aggregate = self
            .store
            .get()?
            .increment_aggregate(user_id, display_name, score, Utc::now())
            .await?;
        tracing::debug!(
            %user_id,
            score,
            total_points = aggregate.total_points,
            games_played = aggregate.games_played,
            "aggregate updated"
        );
        Ok(aggregate)
    }
}
