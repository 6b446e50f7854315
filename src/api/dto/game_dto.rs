//! Game registry DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Game;
use crate::service::RegisteredGame;

/// Request body for `POST /admin/games`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterGameRequest {
    /// Game title.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Public game metadata.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    /// Game id.
    pub id: String,
    /// Title.
    pub name: String,
    /// URL-friendly name.
    pub game_short_name: String,
    /// Description.
    pub description: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<Game> for GameDto {
    fn from(game: Game) -> Self {
        Self {
            id: game.id.to_string(),
            name: game.name,
            game_short_name: game.short_name,
            description: game.description,
            created_at: game.created_at,
        }
    }
}

/// `data` of a successful registration. `apiKey` is shown only once.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredGameDto {
    /// Game metadata.
    #[serde(flatten)]
    pub game: GameDto,
    /// Plaintext API key.
    pub api_key: String,
}

impl From<RegisteredGame> for RegisteredGameDto {
    fn from(registered: RegisteredGame) -> Self {
        Self {
            game: registered.game.into(),
            api_key: registered.api_key,
        }
    }
}
