//! The SignalEngine - main entry point for report generation.
//!
//! Fetches one batch of posts from a [`PostSource`], fans the per-post work
//! out across blocking tasks and assembles an [`AggregateReport`]. Every
//! outcome is a report: upstream failures, timeouts and cancellation
//! produce the degraded shape with the reason in `warnings`.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::spawn_blocking;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{SourceError, SourceResult};
use crate::lexicon::LexiconProvider;
use crate::pipeline::analyzer::Analyzer;
use crate::traits::source::PostSource;
use crate::types::config::EngineConfig;
use crate::types::post::RawPost;
use crate::types::query::{FilterContext, SourceQuery};
use crate::types::report::AggregateReport;

/// Default deadline for one upstream fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Produces reports for queries against one post source.
///
/// # Example
///
/// ```rust,ignore
/// let engine = SignalEngine::new(source);
///
/// let query = SourceQuery::new("meal kits")
///     .with_geography("Minneapolis")
///     .with_time_window("quarter");
/// let report = engine.report(&query).await;
///
/// if report.is_degraded() {
///     eprintln!("{:?}", report.warnings());
/// }
/// ```
pub struct SignalEngine<S: PostSource> {
    source: S,
    analyzer: Analyzer,
    fetch_timeout: Duration,
}

impl<S: PostSource> SignalEngine<S> {
    /// Create an engine with the built-in lexicon and default config.
    pub fn new(source: S) -> Self {
        Self {
            source,
            analyzer: Analyzer::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Create with a custom lexicon and configuration.
    pub fn with_config(source: S, lexicon: &dyn LexiconProvider, config: EngineConfig) -> Self {
        Self {
            source,
            analyzer: Analyzer::new(lexicon, config),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Set the upstream fetch deadline.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        self.analyzer.config()
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and analyze posts for `query`.
    pub async fn report(&self, query: &SourceQuery) -> AggregateReport {
        self.report_with_cancel(query, CancellationToken::new()).await
    }

    /// Report with cancellation support.
    ///
    /// Cancelling before the fetch completes yields a degraded report.
    pub async fn report_with_cancel(
        &self,
        query: &SourceQuery,
        cancel: CancellationToken,
    ) -> AggregateReport {
        let window_weeks = query.window_weeks(self.config().window_weeks);
        let context = query.filter_context(window_weeks);

        info!(
            source = self.source.name(),
            query = %context.query,
            window_weeks,
            "Generating report"
        );

        match self.fetch(query, &cancel).await {
            Ok(posts) => self.analyze_posts(posts, context).await,
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "Upstream fetch failed");
                self.analyzer.fallback(context, &e.to_string())
            }
        }
    }

    async fn fetch(
        &self,
        query: &SourceQuery,
        cancel: &CancellationToken,
    ) -> SourceResult<Vec<RawPost>> {
        let secs = self.fetch_timeout.as_secs();
        tokio::select! {
            result = tokio::time::timeout(self.fetch_timeout, self.source.fetch_posts(query)) => {
                result.map_err(|_| SourceError::Timeout { secs })?
            }
            _ = cancel.cancelled() => Err(SourceError::Cancelled),
        }
    }

    /// Analyze an already-fetched batch.
    ///
    /// Classification, theme and pain-point extraction run concurrently on
    /// the blocking pool; the batch metrics are computed once all three
    /// are in.
    pub async fn analyze_posts(
        &self,
        posts: Vec<RawPost>,
        context: FilterContext,
    ) -> AggregateReport {
        let posts = Arc::new(Analyzer::filter_valid(posts));

        let classify = {
            let classifier = self.analyzer.classifier().clone();
            let posts = Arc::clone(&posts);
            spawn_blocking(move || classifier.classify_all(&posts))
        };
        let themes = {
            let extractor = self.analyzer.theme_extractor().clone();
            let posts = Arc::clone(&posts);
            spawn_blocking(move || extractor.extract(&posts))
        };
        let pain_points = {
            let extractor = self.analyzer.pain_point_extractor().clone();
            let posts = Arc::clone(&posts);
            spawn_blocking(move || extractor.extract(&posts))
        };

        let (classified, themes, pain_points) = match tokio::join!(classify, themes, pain_points) {
            (Ok(c), Ok(t), Ok(p)) => (c, t, p),
            (c, t, p) => {
                let reason = [c.err(), t.err(), p.err()]
                    .into_iter()
                    .flatten()
                    .map(|e| e.to_string())
                    .next()
                    .unwrap_or_default();
                warn!(error = %reason, "Analysis task failed");
                return self
                    .analyzer
                    .fallback(context, &format!("analysis task failed: {}", reason));
            }
        };

        let window_weeks = context.window_weeks;
        let analysis = self
            .analyzer
            .combine(&posts, classified, themes, pain_points, window_weeks);
        self.analyzer.assemble(context, analysis)
    }
}
