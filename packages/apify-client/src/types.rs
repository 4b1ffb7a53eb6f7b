use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for the trudax/reddit-scraper-lite actor in search mode.
#[derive(Debug, Clone, Serialize)]
pub struct RedditSearchInput {
    pub searches: Vec<String>,
    #[serde(rename = "searchPosts")]
    pub search_posts: bool,
    #[serde(rename = "searchComments")]
    pub search_comments: bool,
    #[serde(rename = "skipComments")]
    pub skip_comments: bool,
    #[serde(rename = "maxItems")]
    pub max_items: u32,
    pub sort: String,
    /// Reddit time filter: hour, day, week, month, year, all
    pub time: String,
    #[serde(rename = "includeNSFW")]
    pub include_nsfw: bool,
}

impl RedditSearchInput {
    pub fn new(query: impl Into<String>, max_items: u32) -> Self {
        Self {
            searches: vec![query.into()],
            search_posts: true,
            search_comments: false,
            skip_comments: true,
            max_items,
            sort: "relevance".to_string(),
            time: "month".to_string(),
            include_nsfw: false,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }
}

/// A single Reddit post from the Apify dataset.
///
/// Every field is optional because the actor emits partial rows for
/// deleted or quarantined content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditPost {
    pub id: Option<String>,
    #[serde(rename = "parsedId")]
    pub parsed_id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(rename = "communityName")]
    pub community_name: Option<String>,
    #[serde(rename = "upVotes")]
    pub up_votes: Option<i64>,
    #[serde(rename = "numberOfComments")]
    pub number_of_comments: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "over18")]
    pub over_18: Option<bool>,
    #[serde(rename = "isAd")]
    pub is_ad: Option<bool>,
    #[serde(rename = "dataType")]
    pub data_type: Option<String>,
}

impl RedditPost {
    /// Deleted and mod-removed posts keep their row but lose the body.
    pub fn is_removed(&self) -> bool {
        matches!(
            self.body.as_deref().map(str::trim),
            Some("[removed]") | Some("[deleted]")
        )
    }
}

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}
