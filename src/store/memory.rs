//! In-memory store backed by `tokio` read-write locks.
//!
//! Each collection lives in its own `RwLock`. Read-modify-write operations
//! (the score compare-and-swap, aggregate increments) run entirely under
//! the collection's write lock, which gives them the same atomicity the
//! PostgreSQL backend gets from transactions.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::Store;
use crate::domain::{
    CommunityActivity, Game, GameId, ScoreRecord, ScoreUpdate, UserAggregate, UserId,
};
use crate::error::GatewayError;

type ScoreKey = (GameId, UserId);

/// Number of community activities kept; older entries are dropped first.
pub const ACTIVITY_RETENTION: usize = 100;

/// Process-local [`Store`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scores: RwLock<HashMap<ScoreKey, ScoreRecord>>,
    users: RwLock<HashMap<UserId, UserAggregate>>,
    games: RwLock<HashMap<GameId, Game>>,
    activities: RwLock<VecDeque<CommunityActivity>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn record_best_score(
        &self,
        game_id: &GameId,
        user_id: &UserId,
        score: u64,
        display_name: &str,
        now: DateTime<Utc>,
    ) -> Result<ScoreUpdate, GatewayError> {
        let key = (game_id.clone(), user_id.clone());
        let mut scores = self.scores.write().await;
        let existing = scores.get(&key).cloned();
        let update = ScoreUpdate::decide(existing, game_id, user_id, score, display_name, now);
        if update.accepted() {
            scores.insert(key, update.record().clone());
        }
        Ok(update)
    }

    async fn get_score(
        &self,
        game_id: &GameId,
        user_id: &UserId,
    ) -> Result<Option<ScoreRecord>, GatewayError> {
        let key = (game_id.clone(), user_id.clone());
        Ok(self.scores.read().await.get(&key).cloned())
    }

    async fn scores_for_game(&self, game_id: &GameId) -> Result<Vec<ScoreRecord>, GatewayError> {
        let scores = self.scores.read().await;
        Ok(scores
            .values()
            .filter(|r| &r.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn get_user(&self, user_id: &UserId) -> Result<Option<UserAggregate>, GatewayError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn create_user_if_absent(
        &self,
        aggregate: UserAggregate,
    ) -> Result<UserAggregate, GatewayError> {
        let mut users = self.users.write().await;
        let stored = users
            .entry(aggregate.user_id.clone())
            .or_insert(aggregate);
        Ok(stored.clone())
    }

    async fn set_display_name(
        &self,
        user_id: &UserId,
        display_name: &str,
        now: DateTime<Utc>,
    ) -> Result<UserAggregate, GatewayError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| GatewayError::UserNotFound(user_id.clone()))?;
        user.display_name = display_name.to_string();
        user.last_active = now;
        Ok(user.clone())
    }

    async fn increment_aggregate(
        &self,
        user_id: &UserId,
        display_name: &str,
        score: u64,
        now: DateTime<Utc>,
    ) -> Result<UserAggregate, GatewayError> {
        let mut users = self.users.write().await;
        let user = users
            .entry(user_id.clone())
            .or_insert_with(|| UserAggregate::new(user_id.clone(), display_name.to_string(), now));
        user.record_accepted(score, now);
        Ok(user.clone())
    }

    async fn list_users(&self) -> Result<Vec<UserAggregate>, GatewayError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn insert_game(&self, game: Game) -> Result<(), GatewayError> {
        let mut games = self.games.write().await;
        if games.contains_key(&game.id) {
            return Err(GatewayError::Validation(format!(
                "game {} already exists",
                game.id
            )));
        }
        games.insert(game.id.clone(), game);
        Ok(())
    }

    async fn get_game(&self, game_id: &GameId) -> Result<Option<Game>, GatewayError> {
        Ok(self.games.read().await.get(game_id).cloned())
    }

    async fn list_games(&self, limit: usize) -> Result<Vec<Game>, GatewayError> {
        let mut games: Vec<Game> = self.games.read().await.values().cloned().collect();
        games.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        games.truncate(limit);
        Ok(games)
    }

    async fn append_activity(&self, activity: CommunityActivity) -> Result<(), GatewayError> {
        let mut activities = self.activities.write().await;
        activities.push_back(activity);
        while activities.len() > ACTIVITY_RETENTION {
            activities.pop_front();
        }
        Ok(())
    }

    async fn recent_activities(
        &self,
        limit: usize,
    ) -> Result<Vec<CommunityActivity>, GatewayError> {
        let mut activities: Vec<CommunityActivity> =
            self.activities.read().await.iter().cloned().collect();
        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        activities.truncate(limit);
        Ok(activities)
    }
}
