//! Error types for catalog searches

use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Failures talking to the remote catalog
#[derive(Debug, Error)]
pub enum SearchError {
    /// Connection refused, DNS failure, timeout, etc.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("Search service returned HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Body was not the expected JSON shape
    #[error("Malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    /// HTTP status, if the service got far enough to send one
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            SearchError::HttpStatus(status) => Some(*status),
            SearchError::Network(e) => e.status(),
            SearchError::Decode(_) => None,
        }
    }
}
