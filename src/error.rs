//! Muninn error types

use std::time::Duration;

/// Muninn error types
#[derive(Debug, thiserror::Error)]
pub enum MuninnError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("attempt timed out after {0:?}")]
    Timeout(Duration),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("empty response from model")]
    EmptyResponse,

    // Caller errors — never retried by the executor.
    #[error("validation error: {0}")]
    Validation(String),

    // Configuration errors
    #[error("no provider registered for tier '{0}'")]
    NoProvider(&'static str),

    #[error("configuration error: {0}")]
    Configuration(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// All retries on the routed tier and the single fallback attempt failed.
    ///
    /// Carries the error from the last attempt plus the total number of
    /// retries performed across both tiers. Callers see this one error,
    /// never the individual attempt failures.
    #[error("execution failed after {retries} retries: {source}")]
    Terminal {
        retries: u32,
        #[source]
        source: Box<MuninnError>,
    },
}

impl MuninnError {
    /// Whether this error is worth retrying on the same tier.
    ///
    /// Rate limits, timeouts, transport errors, and 5xx-equivalent API
    /// errors are transient. Authentication failures and 4xx responses
    /// are permanent; retrying them on the same tier is pointless.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited { .. } | Self::Timeout(_) | Self::EmptyResponse => {
                true
            }
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Provider-supplied retry hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for Muninn operations
pub type Result<T> = std::result::Result<T, MuninnError>;
