//! Error types for the remote search widget
//!
//! Configuration problems are fatal at build or mount time. Network, server
//! and extraction failures fail the in-flight search cycle and are reported
//! to the renderer; they are never retried automatically.

use thiserror::Error;

/// Result type alias for remote search operations
pub type RemoteSearchResult<T> = Result<T, RemoteSearchError>;

/// Error types for remote search operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteSearchError {
    /// Missing or invalid selector, url or option
    #[error("Invalid remote search configuration: {0}")]
    Configuration(String),

    /// Transport failure or timeout before a response arrived
    #[error("Search request failed: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status
    #[error("Search endpoint {url} answered with status {status}")]
    Server { status: u16, url: String },

    /// Response body is not JSON, or the items are not where the extractor looks
    #[error("Could not extract items from response: {0}")]
    Extraction(String),

    /// Selection of a row that is not currently rendered
    #[error("No rendered result at index {0}")]
    NoSuchItem(usize),
}

impl From<reqwest::Error> for RemoteSearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return RemoteSearchError::Extraction(error.to_string());
        }
        if let Some(status) = error.status() {
            return RemoteSearchError::Server {
                status: status.as_u16(),
                url: error.url().map(ToString::to_string).unwrap_or_default(),
            };
        }
        RemoteSearchError::Network(error.to_string())
    }
}

impl RemoteSearchError {
    /// Check if the failure is likely to go away if the user searches again
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteSearchError::Network(_) => true,
            RemoteSearchError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status of a server error
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteSearchError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
