//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::ranking::MAX_LEADERBOARD_LIMIT;

/// Success envelope: `{"success": true, "message"?: ..., "data": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// Optional human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` in a success envelope.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Adds a message to the envelope.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// `?limit=` query parameter for list endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitParams {
    /// Number of rows (1–100).
    #[serde(default)]
    pub limit: Option<usize>,
}

impl LimitParams {
    /// Returns the requested limit clamped to `1..=100`, or `default`.
    #[must_use]
    pub fn resolve(&self, default: usize) -> usize {
        self.limit
            .unwrap_or(default)
            .clamp(1, MAX_LEADERBOARD_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(LimitParams { limit: None }.resolve(100), 100);
        assert_eq!(LimitParams { limit: Some(0) }.resolve(100), 1);
        assert_eq!(LimitParams { limit: Some(5000) }.resolve(100), 100);
        assert_eq!(LimitParams { limit: Some(10) }.resolve(100), 10);
    }

    #[test]
    fn envelope_omits_missing_message() {
        let json = serde_json::to_value(ApiResponse::ok(1)).ok();
        assert_eq!(json, Some(serde_json::json!({"success": true, "data": 1})));
    }
}
