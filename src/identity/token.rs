//! HMAC-SHA256 signed bearer tokens.
//!
//! Token format: `base64url(json claims).base64url(hmac_sha256(json claims))`,
//! both parts unpadded. Claims carry the user id (`sub`), issue time and
//! expiry as Unix seconds.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::IdentityVerifier;
use crate::domain::UserId;
use crate::error::GatewayError;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies signed bearer tokens with a shared HMAC key.
pub struct SignedTokenVerifier {
    key: Vec<u8>,
}

impl std::fmt::Debug for SignedTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedTokenVerifier")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl SignedTokenVerifier {
    /// Creates a verifier with the given HMAC key.
    #[must_use]
    pub fn new(key: Vec<u8>) -> Self {
        Self { key }
    }

    /// Creates a verifier with a random 32-byte key. Tokens do not survive
    /// a restart.
    #[must_use]
    pub fn random() -> Self {
        let mut key = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key }
    }

    /// Issues a token for `user_id` that expires after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the claims cannot be encoded.
    pub fn issue(&self, user_id: &UserId, ttl: Duration) -> Result<String, GatewayError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        let payload =
            serde_json::to_vec(&claims).map_err(|e| GatewayError::Internal(e.to_string()))?;
        let signature = self.mac(&payload)?.finalize().into_bytes();
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verifies `token` and returns the user id it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] for malformed, tampered or
    /// expired tokens.
    pub fn verify(&self, token: &str) -> Result<UserId, GatewayError> {
        let invalid = || GatewayError::Unauthorized("Invalid or expired token".to_string());

        let (payload_b64, signature_b64) = token.trim().split_once('.').ok_or_else(invalid)?;
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).map_err(|_| invalid())?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| invalid())?;

        self.mac(&payload)?
            .verify_slice(&signature)
            .map_err(|_| invalid())?;

        let claims: Claims = serde_json::from_slice(&payload).map_err(|_| invalid())?;
        if claims.exp <= Utc::now().timestamp() {
            return Err(invalid());
        }
        UserId::parse(&claims.sub).map_err(|_| invalid())
    }

    fn mac(&self, payload: &[u8]) -> Result<HmacSha256, GatewayError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| GatewayError::Internal(e.to_string()))?;
        mac.update(payload);
        Ok(mac)
    }
}

#[async_trait]
impl IdentityVerifier for SignedTokenVerifier {
    async fn authenticate(&self, bearer_token: &str) -> Result<UserId, GatewayError> {
        self.verify(bearer_token)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn user() -> UserId {
        let Ok(id) = UserId::parse("did:privy:player-1") else {
            panic!("valid id");
        };
        id
    }

    #[test]
    fn issued_token_verifies() {
        let verifier = SignedTokenVerifier::random();
        let Ok(token) = verifier.issue(&user(), Duration::hours(1)) else {
            panic!("issue failed");
        };
        let Ok(subject) = verifier.verify(&token) else {
            panic!("verify failed");
        };
        assert_eq!(subject, user());
    }

    #[test]
    fn token_from_other_key_is_rejected() {
        let issuer = SignedTokenVerifier::new(b"issuer-key".to_vec());
        let verifier = SignedTokenVerifier::new(b"other-key".to_vec());
        let Ok(token) = issuer.issue(&user(), Duration::hours(1)) else {
            panic!("issue failed");
        };
        assert!(matches!(
            verifier.verify(&token),
            Err(GatewayError::Unauthorized(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = SignedTokenVerifier::random();
        let Ok(token) = verifier.issue(&user(), Duration::seconds(-5)) else {
            panic!("issue failed");
        };
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let verifier = SignedTokenVerifier::random();
        let Ok(token) = verifier.issue(&user(), Duration::hours(1)) else {
            panic!("issue failed");
        };
        let Some((_, signature)) = token.split_once('.') else {
            panic!("malformed token");
        };
        let forged_claims = br#"{"sub":"someone-else","iat":0,"exp":99999999999}"#;
        let forged = format!("{}.{signature}", URL_SAFE_NO_PAD.encode(forged_claims));
        assert!(verifier.verify(&forged).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let verifier = SignedTokenVerifier::random();
        for token in ["", "abc", "a.b.c", "!!!.???"] {
            assert!(verifier.verify(token).is_err(), "{token}");
        }
    }
}
