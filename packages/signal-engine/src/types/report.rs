//! Report types - the terminal artifact handed to the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::query::FilterContext;

/// One named, explained number in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub explanation: String,
    /// Always one of the two confidence tiers
    pub confidence: f64,
}

impl Metric {
    pub fn new(
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        explanation: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            explanation: explanation.into(),
            confidence,
        }
    }
}

/// A post surfaced in the report as evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub published: DateTime<Utc>,
    pub source: String,
    pub evidence: String,
    pub score: i64,
    pub num_comments: i64,
}

/// A labelled link backing the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub label: String,
    pub url: String,
}

impl Citation {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Structured, citation-bearing sentiment report.
///
/// Fields are private so a report cannot be altered once assembled;
/// read through the accessors or serialize it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    #[serde(rename = "generatedAt")]
    generated_at: DateTime<Utc>,
    #[serde(rename = "filterContext")]
    filter_context: FilterContext,
    metrics: Vec<Metric>,
    themes: Vec<String>,
    pain_points: Vec<String>,
    items: Vec<TopItem>,
    citations: Vec<Citation>,
    warnings: Vec<String>,
    #[serde(rename = "totalPosts")]
    total_posts: usize,
}

impl AggregateReport {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        generated_at: DateTime<Utc>,
        filter_context: FilterContext,
        metrics: Vec<Metric>,
        themes: Vec<String>,
        pain_points: Vec<String>,
        items: Vec<TopItem>,
        citations: Vec<Citation>,
        warnings: Vec<String>,
        total_posts: usize,
    ) -> Self {
        Self {
            generated_at,
            filter_context,
            metrics,
            themes,
            pain_points,
            items,
            citations,
            warnings,
            total_posts,
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn filter_context(&self) -> &FilterContext {
        &self.filter_context
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Look up a metric by name.
    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }

    /// Value of a metric by name, if present.
    pub fn metric_value(&self, name: &str) -> Option<f64> {
        self.metric(name).map(|m| m.value)
    }

    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    pub fn pain_points(&self) -> &[String] {
        &self.pain_points
    }

    pub fn items(&self) -> &[TopItem] {
        &self.items
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn total_posts(&self) -> usize {
        self.total_posts
    }

    /// `totalPosts == 0` together with a fetch-failure warning.
    ///
    /// Distinguishes "no usable data" from a genuine zero-result query.
    pub fn is_degraded(&self) -> bool {
        self.total_posts == 0
            && self
                .warnings
                .iter()
                .any(|w| w.starts_with(crate::pipeline::report::UPSTREAM_ERROR_PREFIX))
    }

    /// Serialize for the UI layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
