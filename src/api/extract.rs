//! Request extractors and header helpers shared by handlers.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::domain::UserId;
use crate::error::GatewayError;

/// Header carrying a game client's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the operator's admin key.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Player identity established from an `Authorization: Bearer` header.
///
/// Rejects with `401` when the header is missing, malformed, or the token
/// does not verify.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| GatewayError::Unauthorized("No token provided".to_string()))?;
        let user_id = state.identity.authenticate(token).await?;
        Ok(Self(user_id))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Non-empty value of header `name`, if present and valid UTF-8.
#[must_use]
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Checks the `x-admin-key` header against the configured admin key.
///
/// # Errors
///
/// Returns [`GatewayError::Unauthorized`] when the header is missing and
/// [`GatewayError::Forbidden`] when it does not match or no admin key is
/// configured.
pub fn require_admin(headers: &HeaderMap, state: &AppState) -> Result<(), GatewayError> {
    let presented = header_value(headers, ADMIN_KEY_HEADER)
        .ok_or_else(|| GatewayError::Unauthorized("Missing admin key".to_string()))?;
    match state.config.admin_api_key.as_deref() {
        Some(expected) if expected == presented => Ok(()),
        _ => Err(GatewayError::Forbidden("Invalid admin key".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn bearer_token_requires_scheme_and_value() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn blank_header_values_are_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("  "));
        assert_eq!(header_value(&headers, API_KEY_HEADER), None);

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("k1"));
        assert_eq!(header_value(&headers, API_KEY_HEADER), Some("k1"));
    }
}
