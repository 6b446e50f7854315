//! Type-safe game and user identifiers.
//!
//! Both identifiers are opaque strings assigned outside this service (the
//! identity provider issues user ids, game ids come from the registry), so
//! they are newtypes over `String` rather than UUIDs. The wrappers keep a
//! game id from being passed where a user id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Maximum accepted identifier length in bytes.
pub const MAX_ID_LEN: usize = 128;

/// Identifier of a registered mini-game.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

/// Opaque identifier of an authenticated player.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl GameId {
    /// Parses a game id, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the id is empty or longer
    /// than [`MAX_ID_LEN`].
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        validate_id(raw, "gameId").map(Self)
    }

    /// Generates a fresh random game id (UUID v4, simple form).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl UserId {
    /// Parses a user id, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the id is empty or longer
    /// than [`MAX_ID_LEN`].
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        validate_id(raw, "userId").map(Self)
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_id(raw: &str, field: &str) -> Result<String, GatewayError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::Validation(format!("Missing {field}")));
    }
    if trimmed.len() > MAX_ID_LEN {
        return Err(GatewayError::Validation(format!(
            "{field} must be at most {MAX_ID_LEN} bytes"
        )));
    }
    Ok(trimmed.to_string())
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
