//! Query types - the inbound request and the filter context echoed in reports.

use serde::{Deserialize, Serialize};

/// Default lookback when no time window is given: one "month".
pub const DEFAULT_WINDOW_WEEKS: f64 = 4.0;

/// Lookback window label as sent by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeWindow {
    /// Parse a UI label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "week" | "past week" | "7d" => Some(TimeWindow::Week),
            "month" | "past month" | "30d" => Some(TimeWindow::Month),
            "quarter" | "past quarter" | "90d" => Some(TimeWindow::Quarter),
            "year" | "past year" | "365d" => Some(TimeWindow::Year),
            _ => None,
        }
    }

    /// Window length used for posting velocity.
    pub fn weeks(&self) -> f64 {
        match self {
            TimeWindow::Week => 1.0,
            TimeWindow::Month => DEFAULT_WINDOW_WEEKS,
            TimeWindow::Quarter => 13.0,
            TimeWindow::Year => 52.0,
        }
    }

    /// Reddit search time filter for this window.
    pub fn as_reddit_filter(&self) -> &'static str {
        match self {
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            // Reddit has no quarter filter; over-fetch and let the window weigh velocity
            TimeWindow::Quarter => "year",
            TimeWindow::Year => "year",
        }
    }
}

/// Inbound request describing what to search for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceQuery {
    pub topic: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub geography: Option<String>,
    #[serde(default)]
    pub time_window: Option<String>,
}

impl SourceQuery {
    /// Create a query for a topic.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }

    /// Narrow by industry.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Narrow by geography.
    pub fn with_geography(mut self, geography: impl Into<String>) -> Self {
        self.geography = Some(geography.into());
        self
    }

    /// Set the time window label.
    pub fn with_time_window(mut self, label: impl Into<String>) -> Self {
        self.time_window = Some(label.into());
        self
    }

    /// Search string sent to the source: topic, industry, geography.
    pub fn search_terms(&self) -> String {
        [
            Some(self.topic.as_str()),
            self.industry.as_deref(),
            self.geography.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Parsed time window, if the label is recognised.
    pub fn window(&self) -> Option<TimeWindow> {
        self.time_window.as_deref().and_then(TimeWindow::parse)
    }

    /// Window length in weeks, falling back to `default_weeks`.
    pub fn window_weeks(&self, default_weeks: f64) -> f64 {
        self.window().map_or(default_weeks, |w| w.weeks())
    }

    /// Context echoed back in the report.
    pub fn filter_context(&self, window_weeks: f64) -> FilterContext {
        FilterContext {
            query: self.search_terms(),
            topic: self.topic.clone(),
            industry: self.industry.clone(),
            geography: self.geography.clone(),
            time_window: self.time_window.clone(),
            window_weeks,
        }
    }
}

/// What the report was computed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterContext {
    pub query: String,
    pub topic: String,
    pub industry: Option<String>,
    pub geography: Option<String>,
    pub time_window: Option<String>,
    pub window_weeks: f64,
}

impl FilterContext {
    /// Context for posts supplied directly rather than fetched.
    pub fn for_batch(label: impl Into<String>, window_weeks: f64) -> Self {
        let label = label.into();
        Self {
            query: label.clone(),
            topic: label,
            industry: None,
            geography: None,
            time_window: None,
            window_weeks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_terms_skip_blanks() {
        let query = SourceQuery::new("meal kits")
            .with_industry("  ")
            .with_geography("Minneapolis");
        assert_eq!(query.search_terms(), "meal kits Minneapolis");
    }

    #[test]
    fn test_window_weeks_fallback() {
        let query = SourceQuery::new("x").with_time_window("Quarter");
        assert_eq!(query.window_weeks(4.0), 13.0);

        let unknown = SourceQuery::new("x").with_time_window("fortnight");
        assert_eq!(unknown.window_weeks(4.0), 4.0);

        assert_eq!(SourceQuery::new("x").window_weeks(2.0), 2.0);
    }

    #[test]
    fn test_time_window_labels() {
        assert_eq!(TimeWindow::parse("past week"), Some(TimeWindow::Week));
        assert_eq!(TimeWindow::parse("MONTH"), Some(TimeWindow::Month));
        assert_eq!(TimeWindow::Quarter.as_reddit_filter(), "year");
    }
}
