//! Reddit search through the Apify reddit-scraper actor.
//!
//! Requires the `apify` feature to be enabled.

use apify_client::{ApifyClient, ApifyError, RedditPost, RedditSearchInput};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{MalformedPost, SourceError, SourceResult};
use crate::traits::source::PostSource;
use crate::types::post::RawPost;
use crate::types::query::{SourceQuery, TimeWindow};

/// Default number of posts requested per search.
pub const DEFAULT_MAX_ITEMS: u32 = 50;

/// Post source backed by Apify's Reddit scraper.
///
/// # Example
///
/// ```rust,ignore
/// use signal_engine::sources::ApifyRedditSource;
///
/// let token = std::env::var("APIFY_API_TOKEN").unwrap();
/// let source = ApifyRedditSource::new(ApifyClient::new(token)).with_max_items(25);
/// ```
pub struct ApifyRedditSource {
    client: ApifyClient,
    max_items: u32,
}

impl ApifyRedditSource {
    pub fn new(client: ApifyClient) -> Self {
        Self {
            client,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }

    pub fn with_max_items(mut self, max_items: u32) -> Self {
        self.max_items = max_items;
        self
    }

    fn search_input(&self, query: &SourceQuery) -> RedditSearchInput {
        let window = query.window().unwrap_or(TimeWindow::Month);
        RedditSearchInput::new(query.search_terms(), self.max_items)
            .with_time(window.as_reddit_filter())
    }
}

#[async_trait]
impl PostSource for ApifyRedditSource {
    async fn fetch_posts(&self, query: &SourceQuery) -> SourceResult<Vec<RawPost>> {
        let input = self.search_input(query);
        info!(
            search = %query.search_terms(),
            time = %input.time,
            max_items = self.max_items,
            "Searching Reddit via Apify"
        );

        let rows = self
            .client
            .search_reddit_posts(input)
            .await
            .map_err(map_apify_error)?;

        let received = rows.len();
        let posts: Vec<RawPost> = rows
            .into_iter()
            .filter_map(|row| match to_raw_post(row) {
                Ok(post) => Some(post),
                Err(reason) => {
                    debug!(%reason, "Dropping Reddit row");
                    None
                }
            })
            .collect();

        info!(received, kept = posts.len(), "Reddit search complete");
        Ok(posts)
    }

    fn name(&self) -> &str {
        "apify-reddit"
    }
}

fn map_apify_error(err: ApifyError) -> SourceError {
    if err.is_auth() {
        return SourceError::Auth(err.to_string());
    }
    if err.is_rate_limited() {
        return SourceError::RateLimited(err.to_string());
    }
    match err {
        ApifyError::Api { status, message } => SourceError::Api { status, message },
        other => SourceError::network(other),
    }
}

/// Normalize one scraper row into a post the pipeline accepts.
fn to_raw_post(row: RedditPost) -> Result<RawPost, MalformedPost> {
    if row.is_ad.unwrap_or(false) {
        return Err(MalformedPost::Flagged("promoted"));
    }
    let removed = row.is_removed();

    let id = row
        .parsed_id
        .or(row.id)
        .ok_or(MalformedPost::MissingField("id"))?;
    let title = row.title.ok_or(MalformedPost::MissingField("title"))?;
    let permalink = row.url.ok_or(MalformedPost::MissingField("permalink"))?;
    let created_at = row
        .created_at
        .ok_or(MalformedPost::MissingField("created_at"))?;

    let mut post = RawPost::new(id, title, permalink)
        .with_body(row.body.unwrap_or_default())
        .with_source(row.community_name.unwrap_or_default())
        .with_popularity(row.up_votes.unwrap_or(0))
        .with_comments(row.number_of_comments.unwrap_or(0))
        .with_created_at(created_at);
    post.nsfw = row.over_18.unwrap_or(false);
    post.removed = removed;

    post.validate()?;
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row() -> RedditPost {
        RedditPost {
            id: Some("t3_abc".into()),
            parsed_id: Some("abc".into()),
            url: Some("https://www.reddit.com/r/startups/comments/abc".into()),
            title: Some("Launching a meal kit service".into()),
            body: Some("Any feedback welcome".into()),
            community_name: Some("r/startups".into()),
            up_votes: Some(42),
            number_of_comments: Some(7),
            created_at: Some(Utc::now()),
            data_type: Some("post".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_row_conversion() {
        let post = to_raw_post(row()).unwrap();
        assert_eq!(post.id, "abc");
        assert_eq!(post.source, "r/startups");
        assert_eq!(post.popularity_score, 42);
        assert_eq!(post.comment_count, 7);
    }

    #[test]
    fn test_rejected_rows() {
        let no_title = RedditPost { title: None, ..row() };
        assert_eq!(
            to_raw_post(no_title).unwrap_err(),
            MalformedPost::MissingField("title")
        );

        let nsfw = RedditPost { over_18: Some(true), ..row() };
        assert_eq!(to_raw_post(nsfw).unwrap_err(), MalformedPost::Flagged("nsfw"));

        let ad = RedditPost { is_ad: Some(true), ..row() };
        assert_eq!(to_raw_post(ad).unwrap_err(), MalformedPost::Flagged("promoted"));

        let deleted = RedditPost { body: Some("[deleted]".into()), ..row() };
        assert_eq!(
            to_raw_post(deleted).unwrap_err(),
            MalformedPost::Flagged("removed")
        );
    }

    #[test]
    fn test_error_mapping() {
        let auth = map_apify_error(ApifyError::Api { status: 401, message: "bad token".into() });
        assert!(auth.is_auth());

        let limited = map_apify_error(ApifyError::Api { status: 429, message: "slow down".into() });
        assert!(matches!(limited, SourceError::RateLimited(_)));

        let other = map_apify_error(ApifyError::Api { status: 500, message: "boom".into() });
        assert!(matches!(other, SourceError::Api { status: 500, .. }));

        let failed = map_apify_error(ApifyError::RunFailed("ABORTED".into()));
        assert!(matches!(failed, SourceError::Network(_)));
    }

    #[test]
    fn test_search_input_uses_window() {
        let source = ApifyRedditSource::new(ApifyClient::new("token".into())).with_max_items(10);
        let input = source.search_input(&SourceQuery::new("meal kits").with_time_window("year"));
        assert_eq!(input.searches, vec!["meal kits".to_string()]);
        assert_eq!(input.time, "year");
        assert_eq!(input.max_items, 10);

        let default = source.search_input(&SourceQuery::new("x"));
        assert_eq!(default.time, "month");
    }
}
