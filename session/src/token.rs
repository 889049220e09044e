//! Token keeper
//! ------------
//! The storage boundary for everything a login leaves behind. It owns the
//! `auth_token` and `logged_user` keys and is responsible for:
//!
//!  - persisting the whole login payload and extracting the token on read
//!  - removing the token together with its dependent cached entities
//!    (list snapshot, profile) so a cleared session leaves nothing stale
//!  - serving as the dispatcher's `TokenProvider`, degrading store read
//!    failures to "no token" so requests still go out
//!
//! No network access; a pure storage boundary.
use std::sync::Arc;

use tracing::warn;

use api::dispatcher::TokenProvider;
use api::types::{AuthPayload, UserProfile};
use store::{keys, StateStore};

pub struct TokenKeeper<S> {
    store: Arc<S>,
}

impl<S: StateStore> TokenKeeper<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current token, if one is persisted. A missing key or an unparsable
    /// stored payload both read as absent; the latter warns.
    pub async fn get(&self) -> anyhow::Result<Option<String>> {
        let Some(raw) = self.store.get(keys::AUTH_TOKEN).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<AuthPayload>(&raw) {
            Ok(payload) => Ok(Some(payload.xtoken)),
            Err(e) => {
                warn!(error = %e, "stored auth payload is unparsable; treating as absent");
                Ok(None)
            }
        }
    }

    /// Persist a login payload. At most one token exists at a time;
    /// setting overwrites.
    pub async fn set(&self, payload: &AuthPayload) -> anyhow::Result<()> {
        let raw = serde_json::to_string(payload)?;
        self.store.put(keys::AUTH_TOKEN, &raw).await
    }

    /// Remove the token and everything that only makes sense next to it.
    /// Idempotent; clearing an empty store is a no-op.
    pub async fn clear(&self) -> anyhow::Result<()> {
        self.store.remove(keys::AUTH_TOKEN).await?;
        self.store.remove(keys::SHOPPING_LISTS).await?;
        self.store.remove(keys::LOGGED_USER).await?;
        Ok(())
    }

    /// Persist the logged-in user's profile.
    pub async fn set_profile(&self, profile: &UserProfile) -> anyhow::Result<()> {
        let raw = serde_json::to_string(profile)?;
        self.store.put(keys::LOGGED_USER, &raw).await
    }

    /// Read the persisted profile without a server round-trip. Unparsable
    /// stored data reads as absent, same policy as `get`.
    pub async fn cached_profile(&self) -> anyhow::Result<Option<UserProfile>> {
        let Some(raw) = self.store.get(keys::LOGGED_USER).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!(error = %e, "stored profile is unparsable; treating as absent");
                Ok(None)
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: StateStore> TokenProvider for TokenKeeper<S> {
    async fn token(&self) -> Option<String> {
        match self.get().await {
            Ok(token) => token,
            // The request proceeds anonymously; the server is the authority
            // on rejecting it.
            Err(e) => {
                warn!(error = %e, "token lookup failed; sending without a token");
                None
            }
        }
    }
}
