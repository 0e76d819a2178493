//! Error types for the catalog clients

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when querying a catalog provider
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed (network error or body decode failure)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Provider credential is not configured; the client refuses to call out
    #[error("Missing {0} API key")]
    MissingCredential(&'static str),

    /// Provider returned a non-success status
    #[error("API error: {0}")]
    Api(String),
}

impl Error {
    /// Create an API error from a message
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Whether this failure happened before any outbound call was made
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }
}
