use std::fmt;

use thiserror::Error;

use api::error::ApiError;

/// Where the session currently stands. Process-local; the persisted token
/// is the durable authority at startup, this enum only tracks what has
/// happened since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No token, nobody logged in.
    Anonymous,
    /// A login request is in flight.
    Pending,
    /// A token is held; requests will carry it.
    Authenticated,
    /// The last login attempt was rejected. Stays until the next attempt.
    Failed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Anonymous => "Anonymous",
            SessionStatus::Pending => "Pending",
            SessionStatus::Authenticated => "Authenticated",
            SessionStatus::Failed => "Failed",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    /// Login rejected with 404: the service has no account for this email.
    #[error("no account for this email")]
    UserNotFound,

    /// Login rejected with 400: the credentials did not pass server-side
    /// shape checks.
    #[error("malformed credentials")]
    MalformedCredentials,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("phone number must be 10 to 15 digits")]
    InvalidPhone,

    #[error("password must be at least 8 characters")]
    PasswordTooShort,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("state store failure: {0}")]
    Store(#[from] anyhow::Error),
}
