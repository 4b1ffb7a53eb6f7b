//! Upstream post source.
//!
//! The source owns everything the pipeline does not: authentication,
//! pagination and rate limits on the social platform. The pipeline only
//! sees the resident batch it returns, or the error that replaced it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use signal_engine::{PostSource, SourceQuery};
//!
//! let posts = source.fetch_posts(&SourceQuery::new("meal kits")).await?;
//! ```

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::types::post::RawPost;
use crate::types::query::SourceQuery;

/// Fetches a batch of posts for a query.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch every post the source has for `query`.
    ///
    /// Implementations may drop rows they cannot map to a [`RawPost`];
    /// anything that prevents returning a batch at all is an error.
    async fn fetch_posts(&self, query: &SourceQuery) -> SourceResult<Vec<RawPost>>;

    /// Short label for logs.
    fn name(&self) -> &str {
        "source"
    }
}
