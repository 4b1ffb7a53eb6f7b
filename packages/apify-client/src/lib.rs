//! Pure Apify REST API client.
//!
//! A minimal client for the Apify platform API. Supports starting actor runs,
//! polling for completion, and fetching dataset results.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::{ApifyClient, RedditSearchInput};
//!
//! let client = ApifyClient::new("your-api-token".into());
//!
//! let posts = client.search_reddit_posts(RedditSearchInput::new("meal kits", 50)).await?;
//! for post in &posts {
//!     println!("{}", post.title.as_deref().unwrap_or("(no title)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{RedditPost, RedditSearchInput, RunData};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for trudax/reddit-scraper-lite.
const REDDIT_SCRAPER: &str = "trudax~reddit-scraper-lite";

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Start an actor run. Returns immediately with run metadata.
    pub async fn start_run<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_id);
        let request = self.client.post(&url).bearer_auth(&self.token).json(input);
        let envelope: ApiResponse<RunData> = self.send(request).await?;
        Ok(envelope.data)
    }

    /// Block until a run reaches a terminal status.
    ///
    /// Each request long-polls for up to 60s server side, so the loop
    /// itself never sleeps.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        let url = format!("{}/actor-runs/{}?waitForFinish=60", self.base_url, run_id);
        loop {
            let request = self.client.get(&url).bearer_auth(&self.token);
            let run = self.send::<ApiResponse<RunData>>(request).await?.data;

            match run.status.as_str() {
                "SUCCEEDED" => return Ok(run),
                "FAILED" | "ABORTED" | "TIMED-OUT" => {
                    return Err(ApifyError::RunFailed(run.status));
                }
                status => tracing::debug!(run_id, status, "Run still in progress"),
            }
        }
    }

    /// Fetch the cleaned items of a dataset.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!(
            "{}/datasets/{}/items?format=json&clean=true",
            self.base_url, dataset_id
        );
        self.send(self.client.get(&url).bearer_auth(&self.token)).await
    }

    /// Send a request and decode a successful JSON body.
    ///
    /// Non-2xx responses become [`ApifyError::Api`] carrying the raw body so
    /// callers can classify auth and rate-limit failures.
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }
        Ok(resp.json().await?)
    }

    /// Search Reddit posts end-to-end: start run, poll, fetch results.
    pub async fn search_reddit_posts(&self, input: RedditSearchInput) -> Result<Vec<RedditPost>> {
        tracing::info!(
            searches = ?input.searches,
            max_items = input.max_items,
            time = %input.time,
            "Starting Reddit search scrape"
        );

        let run = self.start_run(REDDIT_SCRAPER, &input).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed, fetching results"
        );

        let posts: Vec<RedditPost> = self
            .get_dataset_items(&completed.default_dataset_id)
            .await?;

        // The actor interleaves community and user rows with post rows
        let posts: Vec<RedditPost> = posts
            .into_iter()
            .filter(|p| p.data_type.as_deref().map_or(true, |t| t == "post"))
            .collect();
        tracing::info!(count = posts.len(), "Fetched Reddit posts");

        Ok(posts)
    }
}
