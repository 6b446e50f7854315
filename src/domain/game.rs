//! Registered mini-game metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GameId;

/// A mini-game allowed to submit scores.
///
/// Only the salted hash of the game's API key is kept; the plaintext key is
/// handed out once at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Unique game identifier.
    pub id: GameId,
    /// Human-readable title.
    pub name: String,
    /// URL-friendly name derived from `name`.
    pub short_name: String,
    /// Free-form description.
    pub description: String,
    /// Lowercase hex SHA-256 of `api_key + salt`.
    pub api_key_hash: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Lowercases and trims `name`, collapsing whitespace runs into `-`.
#[must_use]
pub fn short_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_collapses_whitespace() {
        assert_eq!(short_name("  Chain   Bros "), "chain-bros");
        assert_eq!(short_name("Tetris"), "tetris");
    }
}
