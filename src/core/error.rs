//! Error types for fetching search results.

use thiserror::Error;

/// Result type alias for search client operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport failure, timeout or client construction error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The response body was not a valid result page.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured endpoint is not a usable URL.
    #[error("Invalid search endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SearchError {
    /// Creates an API error from a status code and message.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether trying the same request again later could succeed.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            Self::Json(_) | Self::InvalidUrl(_) => false,
        }
    }
}
