//! Error types for remote API calls.

use thiserror::Error;

/// Primary error type for daemon API operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL or a joined path could not be parsed.
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure (connect, timeout, body decode).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The daemon answered with a non-success status.
    #[error("request rejected with status {status}: {detail}")]
    Status {
        /// HTTP status code returned by the daemon.
        status: u16,
        /// Problem detail extracted from the response body.
        detail: String,
    },
}

/// Result wrapper for API operations.
pub type ClientResult<T> = Result<T, ClientError>;
