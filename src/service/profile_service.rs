//! Player profiles: lazy creation, own-user reads and display name edits.

use chrono::Utc;

use crate::domain::{UserAggregate, UserId, UserMeta};
use crate::error::GatewayError;
use crate::store::StoreHandle;

/// Minimum display name length in characters.
pub const DISPLAY_NAME_MIN: usize = 3;
/// Maximum display name length in characters.
pub const DISPLAY_NAME_MAX: usize = 20;

/// Profile operations. A profile is the user's [`UserAggregate`].
#[derive(Debug, Clone)]
pub struct ProfileService {
    store: StoreHandle,
}

impl ProfileService {
    /// Creates a profile service over `store`.
    #[must_use]
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Returns the user's profile, creating it from `meta` if absent.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn ensure_user(
        &self,
        user_id: &UserId,
        meta: &UserMeta,
    ) -> Result<UserAggregate, GatewayError> {
        let store = self.store.get()?;
        if let Some(existing) = store.get_user(user_id).await? {
            return Ok(existing);
        }
        let fresh = UserAggregate::new(user_id.clone(), meta.derive_display_name(), Utc::now());
        let stored = store.create_user_if_absent(fresh).await?;
        tracing::info!(%user_id, display_name = %stored.display_name, "user profile created");
        Ok(stored)
    }

    /// Returns `user_id`'s profile to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Forbidden`] when `requester` is someone
    /// else; propagates store failures.
    pub async fn get_profile(
        &self,
        requester: &UserId,
        user_id: &UserId,
    ) -> Result<UserAggregate, GatewayError> {
        ensure_own_user(requester, user_id)?;
        self.ensure_user(user_id, &UserMeta::default()).await
    }

    /// Changes the display name of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Forbidden`] when `requester` is someone
    /// else, [`GatewayError::Validation`] when the trimmed name is not
    /// 3–20 characters; propagates store failures.
    pub async fn update_display_name(
        &self,
        requester: &UserId,
        user_id: &UserId,
        display_name: &str,
    ) -> Result<UserAggregate, GatewayError> {
        ensure_own_user(requester, user_id)?;
        let display_name = validate_display_name(display_name)?;

        let meta = UserMeta {
            display_name: Some(display_name.to_string()),
            ..UserMeta::default()
        };
        self.ensure_user(user_id, &meta).await?;

        let updated = self
            .store
            .get()?
            .set_display_name(user_id, display_name, Utc::now())
            .await?;
        tracing::info!(%user_id, display_name, "display name updated");
        Ok(updated)
    }
}

fn ensure_own_user(requester: &UserId, user_id: &UserId) -> Result<(), GatewayError> {
    if requester == user_id {
        Ok(())
    } else {
        Err(GatewayError::Forbidden("Access denied".to_string()))
    }
}

fn validate_display_name(raw: &str) -> Result<&str, GatewayError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if (DISPLAY_NAME_MIN..=DISPLAY_NAME_MAX).contains(&len) {
        Ok(trimmed)
    } else {
        Err(GatewayError::Validation(format!(
            "Display name must be between {DISPLAY_NAME_MIN} and {DISPLAY_NAME_MAX} characters"
        )))
    }
}
