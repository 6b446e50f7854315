//! Store layer: the document store behind scores, users, games, and the
//! community feed.
//!
//! Services never talk to a concrete backend. They receive a
//! [`StoreHandle`], which may be empty when no store is configured; every
//! access goes through [`StoreHandle::get`], which short-circuits with
//! [`GatewayError::DatabaseUnavailable`] instead of attempting the call.
//!
//! Two backends implement [`Store`]:
//!
//! - [`MemoryStore`]: process-local maps, used by tests and the default
//!   `memory` backend.
//! - [`PostgresStore`]: `sqlx::PgPool` backed, with embedded migrations.
//!
//! The only mutation discipline enforced by the trait is that
//! [`Store::record_best_score`] is an atomic compare-and-swap and
//! [`Store::increment_aggregate`] is an atomic increment.

pub mod memory;
pub mod postgres;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    CommunityActivity, Game, GameId, ScoreRecord, ScoreUpdate, UserAggregate, UserId,
};
use crate::error::GatewayError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Persistent collections used by the gateway.
#[async_trait]
pub trait Store: Send + Sync + fmt::Debug {
    /// Reports whether the backend is reachable.
    async fn ping(&self) -> Result<(), GatewayError>;

    // ── Scores ──────────────────────────────────────────────────────────

    /// Atomically applies the monotonic-improvement rule for
    /// `(game_id, user_id)` and writes the record when it is accepted.
    ///
    /// Two concurrent calls for the same key never both observe the old
    /// score; the higher candidate is always the one retained.
    async fn record_best_score(
        &self,
        game_id: &GameId,
        user_id: &UserId,
        score: u64,
        display_name: &str,
        now: DateTime<Utc>,
    ) -> Result<ScoreUpdate, GatewayError>;

    /// Returns the stored best score for `(game_id, user_id)`.
    async fn get_score(
        &self,
        game_id: &GameId,
        user_id: &UserId,
    ) -> Result<Option<ScoreRecord>, GatewayError>;

    /// Returns every score record of a game, in no particular order.
    async fn scores_for_game(&self, game_id: &GameId) -> Result<Vec<ScoreRecord>, GatewayError>;

    // ── Users ───────────────────────────────────────────────────────────

    /// Returns the aggregate for `user_id`, if any.
    async fn get_user(&self, user_id: &UserId) -> Result<Option<UserAggregate>, GatewayError>;

    /// Inserts `aggregate` unless the user already exists; returns whichever
    /// aggregate is stored afterwards.
    async fn create_user_if_absent(
        &self,
        aggregate: UserAggregate,
    ) -> Result<UserAggregate, GatewayError>;

    /// Replaces the display name and bumps `last_active`.
    ///
    /// Fails with [`GatewayError::UserNotFound`] for unknown users.
    async fn set_display_name(
        &self,
        user_id: &UserId,
        display_name: &str,
        now: DateTime<Utc>,
    ) -> Result<UserAggregate, GatewayError>;

    /// Atomically adds `score` to `total_points`, adds one to
    /// `games_played` and sets `last_active`. Creates the aggregate (named
    /// `display_name`) when absent.
    async fn increment_aggregate(
        &self,
        user_id: &UserId,
        display_name: &str,
        score: u64,
        now: DateTime<Utc>,
    ) -> Result<UserAggregate, GatewayError>;

    /// Returns every user aggregate, in no particular order.
    async fn list_users(&self) -> Result<Vec<UserAggregate>, GatewayError>;

    // ── Games ───────────────────────────────────────────────────────────

    /// Registers a new game.
    async fn insert_game(&self, game: Game) -> Result<(), GatewayError>;

    /// Looks a game up by id.
    async fn get_game(&self, game_id: &GameId) -> Result<Option<Game>, GatewayError>;

    /// Returns up to `limit` games, oldest registration first.
    async fn list_games(&self, limit: usize) -> Result<Vec<Game>, GatewayError>;

    // ── Community feed ─────────────────────────────────────────────────

    /// Appends an activity to the feed.
    async fn append_activity(&self, activity: CommunityActivity) -> Result<(), GatewayError>;

    /// Returns up to `limit` activities, newest first.
    async fn recent_activities(
        &self,
        limit: usize,
    ) -> Result<Vec<CommunityActivity>, GatewayError>;
}

/// Possibly-empty handle to the configured [`Store`].
#[derive(Debug, Clone, Default)]
pub struct StoreHandle {
    inner: Option<Arc<dyn Store>>,
}

impl StoreHandle {
    /// Wraps a configured store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { inner: Some(store) }
    }

    /// Creates a handle with no store behind it.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { inner: None }
    }

    /// Returns the store.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DatabaseUnavailable`] when no store is
    /// configured.
    pub fn get(&self) -> Result<&dyn Store, GatewayError> {
        self.inner
            .as_deref()
            .ok_or(GatewayError::DatabaseUnavailable)
    }

    /// Returns `true` when a store is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}
