//! Report assembly, including the zero-data and upstream-failure shapes.

use chrono::Utc;
use std::cmp::Reverse;

use crate::pipeline::aggregate::SentimentBreakdown;
use crate::pipeline::analyzer::Analysis;
use crate::pipeline::composite::CompositeScore;
use crate::pipeline::engagement::Engagement;
use crate::types::config::EngineConfig;
use crate::types::post::ClassifiedPost;
use crate::types::query::FilterContext;
use crate::types::report::{AggregateReport, Citation, Metric, TopItem};

pub const SPARSE_WARNING: &str = "Sparse results; signals may be noisy";
pub const FALLBACK_WARNING: &str = "Live data unavailable; showing fallback report";
pub const UPSTREAM_ERROR_PREFIX: &str = "Upstream error: ";

/// Metric names as they appear in the report.
pub mod metric_names {
    pub const POSITIVE_PERCENT: &str = "positive_percent";
    pub const NEUTRAL_PERCENT: &str = "neutral_percent";
    pub const NEGATIVE_PERCENT: &str = "negative_percent";
    pub const ENGAGEMENT_SCORE: &str = "engagement_score";
    pub const COMMUNITY_POSITIVITY_SCORE: &str = "community_positivity_score";
}

const SEARCH_URL_BASE: &str = "https://www.reddit.com/search/?q=";

/// Turns pipeline outputs into an [`AggregateReport`].
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    config: EngineConfig,
}

impl ReportAssembler {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Build the report for a completed analysis.
    ///
    /// An analysis over zero posts yields the neutral baseline.
    pub fn assemble(&self, context: FilterContext, analysis: Analysis) -> AggregateReport {
        let total_posts = analysis.classified.len();
        let confidence = self.config.confidence_for(total_posts);

        let metrics = if total_posts == 0 {
            baseline_metrics(confidence)
        } else {
            build_metrics(
                &analysis.breakdown,
                &analysis.engagement,
                &analysis.composite,
                context.window_weeks,
            )
        };

        let items = self.top_items(&analysis.classified);
        let mut citations = vec![search_citation(&context.query)];
        citations.extend(items.iter().map(|item| {
            let label = if item.source.is_empty() {
                item.title.clone()
            } else {
                format!("{}: {}", item.source, item.title)
            };
            Citation::new(label, item.url.clone())
        }));

        let mut warnings = Vec::new();
        if self.config.is_sparse(total_posts) {
            warnings.push(SPARSE_WARNING.to_string());
        }

        tracing::info!(
            total_posts,
            themes = analysis.themes.len(),
            pain_points = analysis.pain_points.len(),
            items = items.len(),
            "Assembled report"
        );

        AggregateReport::new(
            Utc::now(),
            context,
            metrics,
            analysis.themes,
            analysis.pain_points,
            items,
            citations,
            warnings,
            total_posts,
        )
    }

    /// Degraded report for a failed upstream fetch.
    ///
    /// Structurally identical to a real report; the failure is carried only
    /// in `warnings`.
    pub fn fallback(&self, context: FilterContext, reason: &str) -> AggregateReport {
        tracing::warn!(reason, query = %context.query, "Returning fallback report");

        let mut warnings = vec![
            FALLBACK_WARNING.to_string(),
            format!("{}{}", UPSTREAM_ERROR_PREFIX, reason),
        ];
        if self.config.is_sparse(0) {
            warnings.push(SPARSE_WARNING.to_string());
        }

        let citations = vec![search_citation(&context.query)];
        AggregateReport::new(
            Utc::now(),
            context,
            baseline_metrics(self.config.confidence_for(0)),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            citations,
            warnings,
            0,
        )
    }

    /// Highest-popularity posts, newest first among equals.
    fn top_items(&self, classified: &[ClassifiedPost]) -> Vec<TopItem> {
        let mut ranked: Vec<&ClassifiedPost> = classified.iter().collect();
        ranked.sort_by_key(|c| (Reverse(c.post.popularity_score), Reverse(c.post.created_at)));

        ranked
            .into_iter()
            .take(self.config.max_top_items)
            .map(|c| {
                let post = &c.post;
                let snippet_source = if post.body.trim().is_empty() {
                    &post.title
                } else {
                    &post.body
                };
                TopItem {
                    title: post.title.clone(),
                    snippet: snippet(snippet_source, self.config.snippet_len),
                    url: post.permalink.clone(),
                    published: post.created_at,
                    source: post.source.clone(),
                    evidence: format!(
                        "{} sentiment ({:+.1})",
                        c.sentiment_label, c.sentiment_score
                    ),
                    score: post.popularity_score,
                    num_comments: post.comment_count,
                }
            })
            .collect()
    }
}

fn search_citation(query: &str) -> Citation {
    Citation::new(
        format!("Search: \"{}\"", query),
        format!("{}{}", SEARCH_URL_BASE, urlencoding::encode(query)),
    )
}

fn snippet(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let cut: String = collapsed.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut.trim_end())
    }
}

fn baseline_metrics(confidence: f64) -> Vec<Metric> {
    let breakdown = SentimentBreakdown::baseline();
    let no_data = "No posts available; neutral baseline";
    vec![
        Metric::new(
            metric_names::POSITIVE_PERCENT,
            breakdown.positive_percent as f64,
            "%",
            no_data,
            confidence,
        ),
        Metric::new(
            metric_names::NEUTRAL_PERCENT,
            breakdown.neutral_percent as f64,
            "%",
            no_data,
            confidence,
        ),
        Metric::new(
            metric_names::NEGATIVE_PERCENT,
            breakdown.negative_percent as f64,
            "%",
            no_data,
            confidence,
        ),
        Metric::new(metric_names::ENGAGEMENT_SCORE, 0.0, "score", no_data, confidence),
        Metric::new(
            metric_names::COMMUNITY_POSITIVITY_SCORE,
            0.0,
            "score",
            no_data,
            confidence,
        ),
    ]
}

fn build_metrics(
    breakdown: &SentimentBreakdown,
    engagement: &Engagement,
    composite: &CompositeScore,
    window_weeks: f64,
) -> Vec<Metric> {
    let confidence = composite.confidence;
    let total = breakdown.post_count;
    vec![
        Metric::new(
            metric_names::POSITIVE_PERCENT,
            breakdown.positive_percent as f64,
            "%",
            format!("{} of {} posts scored positive", breakdown.positive_count, total),
            confidence,
        ),
        Metric::new(
            metric_names::NEUTRAL_PERCENT,
            breakdown.neutral_percent as f64,
            "%",
            format!(
                "{} of {} posts scored neutral; share is the remainder after positive and negative",
                breakdown.neutral_count, total
            ),
            confidence,
        ),
        Metric::new(
            metric_names::NEGATIVE_PERCENT,
            breakdown.negative_percent as f64,
            "%",
            format!("{} of {} posts scored negative", breakdown.negative_count, total),
            confidence,
        ),
        Metric::new(
            metric_names::ENGAGEMENT_SCORE,
            engagement.score as f64,
            "score",
            format!(
                "Average popularity {:.1} and {:.1} posts/week over {} weeks",
                engagement.avg_popularity, engagement.posts_per_week, window_weeks
            ),
            confidence,
        ),
        Metric::new(
            metric_names::COMMUNITY_POSITIVITY_SCORE,
            composite.cps as f64,
            "score",
            format!(
                "Sentiment core {} blended with engagement {}",
                composite.sentiment_core, engagement.score
            ),
            confidence,
        ),
    ]
}
