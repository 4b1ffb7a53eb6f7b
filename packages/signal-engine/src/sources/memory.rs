//! In-memory post source.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::SourceResult;
use crate::traits::source::PostSource;
use crate::types::post::RawPost;
use crate::types::query::SourceQuery;

/// Serves a fixed batch of posts regardless of the query.
///
/// Used for offline analysis of exported posts.
#[derive(Debug, Clone, Default)]
pub struct StaticPostSource {
    posts: Vec<RawPost>,
}

impl StaticPostSource {
    pub fn new(posts: Vec<RawPost>) -> Self {
        Self { posts }
    }

    /// Parse a JSON array of posts.
    ///
    /// Rows that do not decode as a post are dropped; only a document that
    /// is not an array at all is an error.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let rows: Vec<Value> = serde_json::from_str(json)?;
        let received = rows.len();

        let posts: Vec<RawPost> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(row, value)| match serde_json::from_value::<RawPost>(value) {
                Ok(post) => Some(post),
                Err(e) => {
                    debug!(row, error = %e, "Skipping malformed post row");
                    None
                }
            })
            .collect();

        if posts.len() < received {
            debug!(received, kept = posts.len(), "Dropped malformed post rows");
        }
        Ok(Self::new(posts))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[async_trait]
impl PostSource for StaticPostSource {
    async fn fetch_posts(&self, _query: &SourceQuery) -> SourceResult<Vec<RawPost>> {
        Ok(self.posts.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
