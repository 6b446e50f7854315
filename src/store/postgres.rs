//! PostgreSQL implementation of the store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::Store;
use crate::config::GatewayConfig;
use crate::domain::{
    ActivityKind, CommunityActivity, Game, GameId, ScoreRecord, ScoreUpdate, UserAggregate,
    UserId,
};
use crate::error::GatewayError;

type ScoreRow = (String, String, i64, String, DateTime<Utc>);
type UserRow = (String, String, i64, i64, DateTime<Utc>, DateTime<Utc>);
type GameRow = (String, String, String, String, String, DateTime<Utc>);
type ActivityRow = (uuid::Uuid, String, String, String, i64, DateTime<Utc>);

const SCORE_COLUMNS: &str = "game_id, user_id, score, display_name, updated_at";
const USER_COLUMNS: &str =
    "user_id, display_name, total_points, games_played, created_at, last_active";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DatabaseUnavailable`] when no database URL is
    /// configured or the server cannot be reached.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let url = config
            .database_url
            .as_deref()
            .ok_or(GatewayError::DatabaseUnavailable)?;
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to connect to postgres");
                GatewayError::DatabaseUnavailable
            })?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] if a migration fails.
    pub async fn run_migrations(&self) -> Result<(), GatewayError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| GatewayError::Persistence(e.to_string()))
    }
}

/// Maps connectivity failures to `DatabaseUnavailable`, everything else to
/// `Persistence`.
fn map_sqlx(err: sqlx::Error) -> GatewayError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            GatewayError::DatabaseUnavailable
        }
        other => GatewayError::Persistence(other.to_string()),
    }
}

fn to_i64(value: u64) -> Result<i64, GatewayError> {
    i64::try_from(value).map_err(|_| GatewayError::Validation(format!("value {value} too large")))
}

fn to_u64(value: i64) -> Result<u64, GatewayError> {
    u64::try_from(value)
        .map_err(|_| GatewayError::Persistence(format!("negative stored value {value}")))
}

fn score_from_row(row: ScoreRow) -> Result<ScoreRecord, GatewayError> {
    let (game_id, user_id, score, display_name, updated_at) = row;
    Ok(ScoreRecord {
        game_id: GameId::parse(&game_id)?,
        user_id: UserId::parse(&user_id)?,
        score: to_u64(score)?,
        display_name,
        updated_at,
    })
}

fn user_from_row(row: UserRow) -> Result<UserAggregate, GatewayError> {
    let (user_id, display_name, total_points, games_played, created_at, last_active) = row;
    Ok(UserAggregate {
        user_id: UserId::parse(&user_id)?,
        display_name,
        total_points: to_u64(total_points)?,
        games_played: to_u64(games_played)?,
        created_at,
        last_active,
    })
}

fn game_from_row(row: GameRow) -> Result<Game, GatewayError> {
    let (id, name, short_name, description, api_key_hash, created_at) = row;
    Ok(Game {
        id: GameId::parse(&id)?,
        name,
        short_name,
        description,
        api_key_hash,
        created_at,
    })
}

fn activity_from_row(row: ActivityRow) -> Result<CommunityActivity, GatewayError> {
    let (id, title, description, kind, points, timestamp) = row;
    let kind = ActivityKind::from_name(&kind)
        .ok_or_else(|| GatewayError::Persistence(format!("unknown activity kind {kind}")))?;
    Ok(CommunityActivity {
        id,
        title,
        description,
        kind,
        points: to_u64(points)?,
        timestamp,
    })
}

#[async_trait]
impl Store for PostgresStore {
    async fn ping(&self) -> Result<(), GatewayError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
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
        let candidate = to_i64(score)?;
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // A concurrent first insert blocks here until it commits, after
        // which the row exists and is locked below.
        let inserted = sqlx::query_as::<_, ScoreRow>(&format!(
            "INSERT INTO scores ({SCORE_COLUMNS}) VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (game_id, user_id) DO NOTHING RETURNING {SCORE_COLUMNS}"
        ))
        .bind(game_id.as_str())
        .bind(user_id.as_str())
        .bind(candidate)
        .bind(display_name)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if let Some(row) = inserted {
            tx.commit().await.map_err(map_sqlx)?;
            return Ok(ScoreUpdate::Created(score_from_row(row)?));
        }

        let current = sqlx::query_as::<_, ScoreRow>(&format!(
            "SELECT {SCORE_COLUMNS} FROM scores WHERE game_id = $1 AND user_id = $2 FOR UPDATE"
        ))
        .bind(game_id.as_str())
        .bind(user_id.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let update = ScoreUpdate::decide(
            Some(score_from_row(current)?),
            game_id,
            user_id,
            score,
            display_name,
            now,
        );

        if update.accepted() {
            sqlx::query(
                "UPDATE scores SET score = $3, display_name = $4, updated_at = $5 \
                 WHERE game_id = $1 AND user_id = $2",
            )
            .bind(game_id.as_str())
            .bind(user_id.as_str())
            .bind(candidate)
            .bind(display_name)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(update)
    }

    async fn get_score(
        &self,
        game_id: &GameId,
        user_id: &UserId,
    ) -> Result<Option<ScoreRecord>, GatewayError> {
        let row = sqlx::query_as::<_, ScoreRow>(&format!(
            "SELECT {SCORE_COLUMNS} FROM scores WHERE game_id = $1 AND user_id = $2"
        ))
        .bind(game_id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(score_from_row).transpose()
    }

    async fn scores_for_game(&self, game_id: &GameId) -> Result<Vec<ScoreRecord>, GatewayError> {
        let rows = sqlx::query_as::<_, ScoreRow>(&format!(
            "SELECT {SCORE_COLUMNS} FROM scores WHERE game_id = $1"
        ))
        .bind(game_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        rows.into_iter().map(score_from_row).collect()
    }

    async fn get_user(&self, user_id: &UserId) -> Result<Option<UserAggregate>, GatewayError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(user_from_row).transpose()
    }

    async fn create_user_if_absent(
        &self,
        aggregate: UserAggregate,
    ) -> Result<UserAggregate, GatewayError> {
        sqlx::query(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id) DO NOTHING"
        ))
        .bind(aggregate.user_id.as_str())
        .bind(&aggregate.display_name)
        .bind(to_i64(aggregate.total_points)?)
        .bind(to_i64(aggregate.games_played)?)
        .bind(aggregate.created_at)
        .bind(aggregate.last_active)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.get_user(&aggregate.user_id)
            .await?
            .ok_or_else(|| GatewayError::Internal("user vanished after insert".to_string()))
    }

    async fn set_display_name(
        &self,
        user_id: &UserId,
        display_name: &str,
        now: DateTime<Utc>,
    ) -> Result<UserAggregate, GatewayError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET display_name = $2, last_active = $3 WHERE user_id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id.as_str())
        .bind(display_name)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(user_from_row)
            .transpose()?
            .ok_or_else(|| GatewayError::UserNotFound(user_id.clone()))
    }

    async fn increment_aggregate(
        &self,
        user_id: &UserId,
        display_name: &str,
        score: u64,
        now: DateTime<Utc>,
    ) -> Result<UserAggregate, GatewayError> {
        // Single statement: the increment happens inside the row update, so
        // concurrent submissions by the same user cannot lose points.
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, 1, $4, $4) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 total_points = users.total_points + EXCLUDED.total_points, \
                 games_played = users.games_played + 1, \
                 last_active = EXCLUDED.last_active \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id.as_str())
        .bind(display_name)
        .bind(to_i64(score)?)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        user_from_row(row)
    }

    async fn list_users(&self) -> Result<Vec<UserAggregate>, GatewayError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(user_from_row).collect()
    }

    async fn insert_game(&self, game: Game) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO games (id, name, short_name, description, api_key_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(game.id.as_str())
        .bind(&game.name)
        .bind(&game.short_name)
        .bind(&game.description)
        .bind(&game.api_key_hash)
        .bind(game.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn get_game(&self, game_id: &GameId) -> Result<Option<Game>, GatewayError> {
        let row = sqlx::query_as::<_, GameRow>(
            "SELECT id, name, short_name, description, api_key_hash, created_at \
             FROM games WHERE id = $1",
        )
        .bind(game_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(game_from_row).transpose()
    }

    async fn list_games(&self, limit: usize) -> Result<Vec<Game>, GatewayError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, GameRow>(
            "SELECT id, name, short_name, description, api_key_hash, created_at \
             FROM games ORDER BY created_at ASC, id ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        rows.into_iter().map(game_from_row).collect()
    }

    async fn append_activity(&self, activity: CommunityActivity) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO community_activities (id, title, description, kind, points, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(activity.id)
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(activity.kind.as_str())
        .bind(to_i64(activity.points)?)
        .bind(activity.timestamp)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn recent_activities(
        &self,
        limit: usize,
    ) -> Result<Vec<CommunityActivity>, GatewayError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, ActivityRow>(
            "SELECT id, title, description, kind, points, created_at \
             FROM community_activities ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        rows.into_iter().map(activity_from_row).collect()
    }
}
