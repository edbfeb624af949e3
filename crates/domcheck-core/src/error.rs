use thiserror::Error;

/// Result type alias for domcheck operations
pub type Result<T> = std::result::Result<T, DomcheckError>;

/// Errors that can occur while extracting or checking domains
#[derive(Error, Debug)]
pub enum DomcheckError {
    /// Input is not a syntactically valid domain name
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Resolver returned an error response
    #[error("resolver error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the resolver
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl DomcheckError {
    /// Returns true if the error is transient and the lookup could succeed later
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns the HTTP status code if the resolver answered with one
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
