use anyhow::{Context, Result};
use dotenvy::dotenv;
use secrecy::SecretBox;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// CLI configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    /// Only required for live searches
    pub apify_api_token: Option<SecretBox<str>>,
    pub lexicon_path: Option<PathBuf>,
    pub fetch_timeout: Duration,
    pub post_limit: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            apify_api_token: env::var("APIFY_API_TOKEN")
                .ok()
                .map(|token| SecretBox::new(Box::from(token.as_str()))),
            lexicon_path: env::var("SIGNAL_LEXICON_PATH").ok().map(PathBuf::from),
            fetch_timeout: Duration::from_secs(
                env::var("SIGNAL_FETCH_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .context("SIGNAL_FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            post_limit: env::var("SIGNAL_POST_LIMIT")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .context("SIGNAL_POST_LIMIT must be a valid number")?,
        })
    }
}
