//! Game registry: registration, lookup and API key checks.

use chrono::Utc;

use crate::domain::game::short_name;
use crate::domain::{Game, GameId};
use crate::error::GatewayError;
use crate::identity::ApiKeyHasher;
use crate::store::StoreHandle;

/// Maximum game name length in characters.
pub const GAME_NAME_MAX: usize = 64;

/// A freshly registered game together with its one-time plaintext key.
#[derive(Debug, Clone)]
pub struct RegisteredGame {
    /// Stored game.
    pub game: Game,
    /// Plaintext API key; not recoverable later.
    pub api_key: String,
}

/// Registry of games allowed to submit scores.
#[derive(Debug, Clone)]
pub struct GameService {
    store: StoreHandle,
    hasher: ApiKeyHasher,
}

impl GameService {
    /// Creates a game service over `store`.
    #[must_use]
    pub fn new(store: StoreHandle, hasher: ApiKeyHasher) -> Self {
        Self { store, hasher }
    }

    /// Registers a game and returns its plaintext API key once.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for an empty or overlong name;
    /// propagates store failures.
    pub async fn register_game(
        &self,
        name: &str,
        description: &str,
    ) -> Result<RegisteredGame, GatewayError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GatewayError::Validation("Missing game name".to_string()));
        }
        if name.chars().count() > GAME_NAME_MAX {
            return Err(GatewayError::Validation(format!(
                "Game name must be at most {GAME_NAME_MAX} characters"
            )));
        }

        let api_key = self.hasher.generate();
        let game = Game {
            id: GameId::generate(),
            name: name.to_string(),
            short_name: short_name(name),
            description: description.trim().to_string(),
            api_key_hash: self.hasher.hash(&api_key),
            created_at: Utc::now(),
        };
        self.store.get()?.insert_game(game.clone()).await?;

        tracing::info!(game_id = %game.id, short_name = %game.short_name, "game registered");
        Ok(RegisteredGame { game, api_key })
    }

    /// Looks a game up.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::GameNotFound`] for unknown ids; propagates
    /// store failures.
    pub async fn get_game(&self, game_id: &GameId) -> Result<Game, GatewayError> {
        self.store
            .get()?
            .get_game(game_id)
            .await?
            .ok_or_else(|| GatewayError::GameNotFound(game_id.clone()))
    }

    /// Checks a game client's API key. Unknown games never verify.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn verify_api_key(&self, game_id: &GameId, key: &str) -> Result<bool, GatewayError> {
        let game = self.store.get()?.get_game(game_id).await?;
        Ok(game.is_some_and(|g| self.hasher.verify(key, &g.api_key_hash)))
    }

    /// Lists up to `limit` games, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn list_games(&self, limit: usize) -> Result<Vec<Game>, GatewayError> {
        self.store.get()?.list_games(limit).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    fn service() -> GameService {
        GameService::new(
            StoreHandle::new(Arc::new(MemoryStore::new())),
            ApiKeyHasher::new("test-salt"),
        )
    }

    #[tokio::test]
    async fn registered_key_verifies() {
        let svc = service();
        let Ok(registered) = svc.register_game(" Chain Bros ", "Platformer").await else {
            panic!("registration failed");
        };
        assert_eq!(registered.game.name, "Chain Bros");
        assert_eq!(registered.game.short_name, "chain-bros");
        assert_ne!(registered.game.api_key_hash, registered.api_key);

        let id = &registered.game.id;
        assert!(matches!(svc.verify_api_key(id, &registered.api_key).await, Ok(true)));
        assert!(matches!(svc.verify_api_key(id, "nope").await, Ok(false)));
    }

    #[tokio::test]
    async fn unknown_game_never_verifies() {
        let svc = service();
        let Ok(id) = GameId::parse("ghost") else {
            panic!("valid id");
        };
        assert!(matches!(svc.verify_api_key(&id, "key").await, Ok(false)));
        assert!(matches!(
            svc.get_game(&id).await,
            Err(GatewayError::GameNotFound(_))
        ));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let svc = service();
        assert!(matches!(
            svc.register_game("   ", "").await,
            Err(GatewayError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn list_games_honors_limit() {
        let svc = service();
        for name in ["a", "b", "c"] {
            let _ = svc.register_game(name, "").await;
        }
        let Ok(games) = svc.list_games(2).await else {
            panic!("list failed");
        };
        assert_eq!(games.len(), 2);
    }
}
