use thiserror::Error;

use api::error::ApiError;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The requested list is not in the local snapshot. An internal signal
    /// for the fallback fetch, not a user-facing failure.
    #[error("list {0} is not in the local snapshot")]
    CacheMiss(i64),

    #[error("state store failure: {0}")]
    Store(#[from] anyhow::Error),
}
