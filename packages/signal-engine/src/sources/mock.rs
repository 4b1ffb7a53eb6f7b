//! Mock post source for testing.
//!
//! Provides a configurable mock implementation of the PostSource trait.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{SourceError, SourceResult};
use crate::traits::source::PostSource;
use crate::types::post::RawPost;
use crate::types::query::SourceQuery;

/// Failure the mock should return instead of posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    Auth(String),
    RateLimited(String),
    Network(String),
    Api { status: u16, message: String },
}

impl From<MockFailure> for SourceError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::Auth(msg) => SourceError::Auth(msg),
            MockFailure::RateLimited(msg) => SourceError::RateLimited(msg),
            MockFailure::Network(msg) => SourceError::network(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                msg,
            )),
            MockFailure::Api { status, message } => SourceError::Api { status, message },
        }
    }
}

/// Mock source for testing.
///
/// Returns canned posts (or a canned failure) and records every query.
///
/// # Example
///
/// ```rust
/// use signal_engine::sources::MockPostSource;
/// use signal_engine::RawPost;
///
/// let mock = MockPostSource::new()
///     .with_post(RawPost::new("1", "Love this idea", "https://reddit.com/r/x/1"));
///
/// // fetch_posts will now return this post for any query
/// ```
#[derive(Default)]
pub struct MockPostSource {
    posts: Arc<RwLock<Vec<RawPost>>>,
    failure: Arc<RwLock<Option<MockFailure>>>,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<SourceQuery>>>,
}

impl MockPostSource {
    /// Create a new empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post that will be returned by fetch_posts.
    pub fn add_post(&self, post: RawPost) {
        self.posts.write().unwrap().push(post);
    }

    /// Add multiple posts.
    pub fn add_posts(&self, posts: Vec<RawPost>) {
        self.posts.write().unwrap().extend(posts);
    }

    /// Builder form of [`add_post`](Self::add_post).
    pub fn with_post(self, post: RawPost) -> Self {
        self.add_post(post);
        self
    }

    /// Builder form of [`add_posts`](Self::add_posts).
    pub fn with_posts(self, posts: Vec<RawPost>) -> Self {
        self.add_posts(posts);
        self
    }

    /// Make every fetch fail.
    pub fn failing(self, failure: MockFailure) -> Self {
        *self.failure.write().unwrap() = Some(failure);
        self
    }

    /// Sleep before answering, to exercise deadlines and cancellation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times fetch_posts was called.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Get the queries that were requested.
    pub fn calls(&self) -> Vec<SourceQuery> {
        self.calls.read().unwrap().clone()
    }

    /// Clear posts, failure and recorded calls.
    pub fn reset(&self) {
        self.posts.write().unwrap().clear();
        *self.failure.write().unwrap() = None;
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockPostSource {
    fn clone(&self) -> Self {
        Self {
            posts: Arc::clone(&self.posts),
            failure: Arc::clone(&self.failure),
            delay: self.delay,
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl PostSource for MockPostSource {
    async fn fetch_posts(&self, query: &SourceQuery) -> SourceResult<Vec<RawPost>> {
        self.calls.write().unwrap().push(query.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failure.read().unwrap().clone();
        if let Some(failure) = failure {
            return Err(failure.into());
        }

        Ok(self.posts.read().unwrap().clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_posts() {
        let mock = MockPostSource::new()
            .with_post(RawPost::new("1", "One", "https://x/1"))
            .with_post(RawPost::new("2", "Two", "https://x/2"));

        let posts = mock.fetch_posts(&SourceQuery::new("anything")).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "1");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockPostSource::new().failing(MockFailure::Auth("token expired".into()));
        let err = mock
            .fetch_posts(&SourceQuery::new("anything"))
            .await
            .unwrap_err();
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "authentication failed: token expired");
    }

    #[test]
    fn test_mock_call_tracking() {
        let mock = MockPostSource::new();
        let shared = mock.clone();

        tokio_test::block_on(async {
            mock.fetch_posts(&SourceQuery::new("first")).await.unwrap();
            mock.fetch_posts(&SourceQuery::new("second")).await.unwrap();
        });

        assert_eq!(shared.call_count(), 2);
        assert_eq!(shared.calls()[1].topic, "second");

        shared.reset();
        assert_eq!(mock.call_count(), 0);
    }
}
