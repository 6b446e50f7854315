//! Identity and authorization collaborators.
//!
//! The gateway does not own user accounts. A bearer token issued by the
//! identity provider is turned into a [`UserId`] by an [`IdentityVerifier`];
//! game clients additionally prove which game they are with a per-game API
//! key checked through [`ApiKeyHasher`].

pub mod api_key;
pub mod token;

use async_trait::async_trait;

use crate::domain::UserId;
use crate::error::GatewayError;

pub use api_key::ApiKeyHasher;
pub use token::SignedTokenVerifier;

/// Resolves a bearer credential to an authenticated user.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + std::fmt::Debug {
    /// Returns the user the token was issued for.
    ///
    /// Implementations fail with [`GatewayError::Unauthorized`] for any
    /// token they do not accept.
    async fn authenticate(&self, bearer_token: &str) -> Result<UserId, GatewayError>;
}
