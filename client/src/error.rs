use thiserror::Error;

use api::error::ApiError;
use cache::error::SyncError;
use session::model::SessionError;

/// Everything the facade can fail with, one level for callers to match on.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
