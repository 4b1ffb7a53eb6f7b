//! Typed errors for the signal engine.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. None of these escape
//! [`SignalEngine::report`](crate::SignalEngine::report): batch-level
//! failures are folded into a degraded report and per-post failures are
//! filtered out before classification.

use thiserror::Error;

/// Batch-level failures of the upstream post source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Credentials missing, invalid or expired
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Platform or account rate limit hit
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Transport failure talking to the source
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Source answered with an unexpected status
    #[error("source API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Fetch exceeded the configured deadline
    #[error("fetch timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Caller cancelled the request
    #[error("fetch cancelled")]
    Cancelled,
}

impl SourceError {
    /// Wrap any transport error.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        SourceError::Network(Box::new(err))
    }

    /// True for the credential class of failures.
    pub fn is_auth(&self) -> bool {
        matches!(self, SourceError::Auth(_))
    }
}

/// Why a single post was dropped before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedPost {
    /// A required field is absent or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The source marked the post NSFW, removed or deleted
    #[error("flagged by source: {0}")]
    Flagged(&'static str),
}

/// Failures loading lexicon configuration.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// Lexicon file could not be read
    #[error("failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),

    /// Lexicon file is not valid JSON for the expected shape
    #[error("failed to parse lexicon: {0}")]
    Parse(#[from] serde_json::Error),

    /// Lexicon parsed but violates a structural rule
    #[error("invalid lexicon: {0}")]
    Invalid(String),
}

/// Result type alias for source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type alias for lexicon loading.
pub type LexiconResult<T> = std::result::Result<T, LexiconError>;
