//! Leaderboard query engine.
//!
//! Pull-based: every query reads the relevant collection in full, orders it
//! with [`crate::domain::ranking`] and returns the ranked view. Nothing is
//! cached, so there is nothing to invalidate.

use crate::domain::ranking::{self, MAX_LEADERBOARD_LIMIT};
use crate::domain::{GameId, RankedScore, RankedUser, UserId};
use crate::error::GatewayError;
use crate::store::StoreHandle;

/// Computes game and global leaderboards on demand.
#[derive(Debug, Clone)]
pub struct LeaderboardService {
    store: StoreHandle,
}

impl LeaderboardService {
    /// Creates a leaderboard service over `store`.
    #[must_use]
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Top `limit` scores of a game, best first, with positional ranks.
    ///
    /// A game nobody has played yields an empty board.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn game_leaderboard(
        &self,
        game_id: &GameId,
        limit: usize,
    ) -> Result<Vec<RankedScore>, GatewayError> {
        let records = self.store.get()?.scores_for_game(game_id).await?;
        Ok(ranking::rank_scores(records, clamp_limit(limit)))
    }

    /// Top `limit` users by total points, with positional ranks.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn global_leaderboard(&self, limit: usize) -> Result<Vec<RankedUser>, GatewayError> {
        let users = self.store.get()?.list_users().await?;
        Ok(ranking::rank_users(users, clamp_limit(limit)))
    }

    /// 1-based rank of `user_id` in `game_id`, or `None` if the user has no
    /// score there (including when the game has no scores at all).
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn user_rank(
        &self,
        game_id: &GameId,
        user_id: &UserId,
    ) -> Result<Option<usize>, GatewayError> {
        let records = self.store.get()?.scores_for_game(game_id).await?;
        Ok(ranking::rank_of(records, user_id))
    }
}

fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_LEADERBOARD_LIMIT)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::store::{MemoryStore, Store};

    fn game() -> GameId {
        let Ok(id) = GameId::parse("g") else {
            panic!("valid id");
        };
        id
    }

    fn user(id: &str) -> UserId {
        let Ok(id) = UserId::parse(id) else {
            panic!("valid id");
        };
        id
    }

    async fn seeded() -> LeaderboardService {
        let store = Arc::new(MemoryStore::new());
        for (u, score) in [("first", 100), ("second", 80), ("third", 60)] {
            let _ = store
                .record_best_score(&game(), &user(u), score, u, Utc::now())
                .await;
            let _ = store.increment_aggregate(&user(u), u, score, Utc::now()).await;
        }
        LeaderboardService::new(StoreHandle::new(store))
    }

    #[tokio::test]
    async fn game_board_is_ranked_descending() {
        let svc = seeded().await;
        let Ok(board) = svc.game_leaderboard(&game(), 100).await else {
            panic!("query failed");
        };
        let rows: Vec<(usize, u64)> = board.iter().map(|r| (r.rank, r.record.score)).collect();
        assert_eq!(rows, vec![(1, 100), (2, 80), (3, 60)]);
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let svc = seeded().await;
        let (Ok(a), Ok(b)) = (
            svc.game_leaderboard(&game(), 100).await,
            svc.game_leaderboard(&game(), 100).await,
        ) else {
            panic!("query failed");
        };
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn user_rank_matches_board_position() {
        let svc = seeded().await;
        assert!(matches!(svc.user_rank(&game(), &user("second")).await, Ok(Some(2))));
        assert!(matches!(svc.user_rank(&game(), &user("nobody")).await, Ok(None)));
    }

    #[tokio::test]
    async fn unknown_game_has_empty_board_and_no_rank() {
        let svc = seeded().await;
        let Ok(other) = GameId::parse("never-played") else {
            panic!("valid id");
        };
        assert!(matches!(svc.game_leaderboard(&other, 10).await, Ok(b) if b.is_empty()));
        assert!(matches!(svc.user_rank(&other, &user("first")).await, Ok(None)));
    }

    #[tokio::test]
    async fn global_board_orders_by_total_points() {
        let svc = seeded().await;
        let Ok(board) = svc.global_leaderboard(2).await else {
            panic!("query failed");
        };
        let rows: Vec<(usize, &str)> = board
            .iter()
            .map(|r| (r.rank, r.aggregate.user_id.as_str()))
            .collect();
        assert_eq!(rows, vec![(1, "first"), (2, "second")]);
    }

    #[tokio::test]
    async fn queries_fail_cleanly_without_store() {
        let svc = LeaderboardService::new(StoreHandle::unavailable());
        assert!(matches!(
            svc.global_leaderboard(10).await,
            Err(GatewayError::DatabaseUnavailable)
        ));
    }
}
