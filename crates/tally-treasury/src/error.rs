//! Treasury error types.

use thiserror::Error;

/// Errors raised by a single budget source or the treasury API client.
///
/// The loader treats every variant except [`TreasuryError::Cancelled`] as
/// "tier unavailable" and moves on to the next source.
#[derive(Debug, Error)]
pub enum TreasuryError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Treasury API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Snapshot file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source has no budget for the requested key.
    #[error("no budget found for {0}")]
    NotFound(String),

    /// The caller cancelled the load.
    #[error("budget load cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for TreasuryError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
