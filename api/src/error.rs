use thiserror::Error;

/// What went wrong with a request, split the way callers branch on it:
/// no usable response at all, the server blaming the request, or the
/// server blaming itself. Status and body are preserved verbatim so the
/// session layer can map specific statuses (404, 400) to its own errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connect, timeout, or body decode failure. No response to show.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("client error {status}: {body}")]
    Client { status: u16, body: String },

    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },
}

impl ApiError {
    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
        }
    }
}
