use thiserror::Error;

/// Errors returned by the Apify REST API client.
#[derive(Debug, Error)]
pub enum ApifyError {
    /// Transport-level failure (DNS, TLS, connection reset, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the Apify API
    #[error("Apify API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Actor run finished in a terminal non-success state
    #[error("actor run ended with status {0}")]
    RunFailed(String),
}

impl ApifyError {
    /// Token missing, invalid or lacking permission for the actor.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApifyError::Api { status: 401 | 403, .. })
    }

    /// Account or platform rate limit hit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApifyError::Api { status: 429, .. })
    }
}

pub type Result<T> = std::result::Result<T, ApifyError>;
