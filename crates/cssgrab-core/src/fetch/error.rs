//! Error type for a single fetch attempt.

use thiserror::Error;

/// Failure of one GET: transport, HTTP status, or local write.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, bad URL, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the body to disk failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}

impl FetchError {
    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http(code) => Some(*code),
            FetchError::Curl(_) | FetchError::Storage(_) => None,
        }
    }
}
