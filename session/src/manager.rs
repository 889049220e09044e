//! Session state machine. Owns the process-local authentication status and
//! drives every transition: login, logout, registration, password change.
//! The persisted token is the durable authority at startup; the status here
//! only tracks what has happened since.
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use tracing::{info, warn};

use api::client::ApiClient;
use api::types::{AuthPayload, NewAccount, UserProfile};
use store::StateStore;

use crate::model::{SessionError, SessionStatus};
use crate::token::TokenKeeper;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10,15}$").expect("valid phone regex"));

const MIN_PASSWORD_LEN: usize = 8;

pub struct SessionManager<S> {
    keeper: Arc<TokenKeeper<S>>,
    api: Arc<ApiClient<TokenKeeper<S>>>,
    status: Mutex<SessionStatus>,
}

impl<S: StateStore> SessionManager<S> {
    /// Derive the initial status from the store: a persisted token means
    /// the user is treated as authenticated without a server round-trip
    /// (the first rejected request corrects the optimism).
    pub async fn new(keeper: Arc<TokenKeeper<S>>, api: Arc<ApiClient<TokenKeeper<S>>>) -> Self {
        let initial = match keeper.get().await {
            Ok(Some(_)) => SessionStatus::Authenticated,
            Ok(None) => SessionStatus::Anonymous,
            Err(e) => {
                warn!(error = %e, "token read failed at startup; starting anonymous");
                SessionStatus::Anonymous
            }
        };

        Self {
            keeper,
            api,
            status: Mutex::new(initial),
        }
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.lock()
    }

    /// Attempt a login. `Pending` while the request is in flight; on
    /// success the payload is persisted and the status becomes
    /// `Authenticated`, on any failure it becomes `Failed`. Each attempt
    /// is independent; nothing is retried.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, SessionError> {
        *self.status.lock() = SessionStatus::Pending;

        let payload = match self.api.login(email, password).await {
            Ok(payload) => payload,
            Err(e) => {
                *self.status.lock() = SessionStatus::Failed;
                return Err(match e.status() {
                    Some(404) => SessionError::UserNotFound,
                    Some(400) => SessionError::MalformedCredentials,
                    _ => SessionError::Api(e),
                });
            }
        };

        if let Err(e) = self.keeper.set(&payload).await {
            // The server accepted us but the token cannot be kept; the
            // session is unusable, treat it like a failed attempt.
            *self.status.lock() = SessionStatus::Failed;
            return Err(SessionError::Store(e));
        }

        *self.status.lock() = SessionStatus::Authenticated;
        info!("login succeeded");
        Ok(payload)
    }

    /// Tear the session down. Infallible and idempotent: store failures
    /// are logged, never surfaced, and a second call changes nothing.
    pub async fn logout(&self) {
        if let Err(e) = self.keeper.clear().await {
            warn!(error = %e, "failed to clear persisted session state");
        }

        *self.status.lock() = SessionStatus::Anonymous;
        info!("logged out");
    }

    /// Create an account. Shape problems are caught locally; no request
    /// leaves the client for a bad email, phone, or short password.
    pub async fn register(&self, account: &NewAccount) -> Result<UserProfile, SessionError> {
        if !EMAIL_RE.is_match(&account.email) {
            return Err(SessionError::InvalidEmail);
        }
        if !PHONE_RE.is_match(&account.phone_number) {
            return Err(SessionError::InvalidPhone);
        }
        if account.password.len() < MIN_PASSWORD_LEN {
            return Err(SessionError::PasswordTooShort);
        }

        Ok(self.api.create_account(account).await?)
    }

    /// Change the logged-in user's password. The only local check is
    /// length; the server verifies everything else.
    pub async fn change_password(&self, new_password: &str) -> Result<(), SessionError> {
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(SessionError::PasswordTooShort);
        }

        let profile = match self.keeper.cached_profile().await? {
            Some(profile) => profile,
            None => self.fetch_profile().await?,
        };

        self.api
            .update_password(profile.user_id, new_password)
            .await?;
        Ok(())
    }

    /// Fetch the logged-in user's profile from the server and persist it.
    pub async fn fetch_profile(&self) -> Result<UserProfile, SessionError> {
        let profile = self.api.logged_user().await?;
        self.keeper.set_profile(&profile).await?;
        Ok(profile)
    }

    /// The persisted profile, if any, without a server round-trip.
    pub async fn cached_profile(&self) -> Result<Option<UserProfile>, SessionError> {
        Ok(self.keeper.cached_profile().await?)
    }
}
