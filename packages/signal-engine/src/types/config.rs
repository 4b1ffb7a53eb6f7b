//! Configuration types for scoring and report assembly.
//!
//! The numeric defaults have no statistical derivation. They are product
//! tunables kept exactly as shipped so reports stay comparable across
//! releases; change them through config, not by editing the formulas.

use serde::{Deserialize, Serialize};

use crate::types::query::DEFAULT_WINDOW_WEEKS;

/// Configuration for the scoring pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Score at or above which a post is Positive.
    ///
    /// Default: 2.0.
    pub positive_threshold: f64,

    /// Score at or below which a post is Negative.
    ///
    /// Default: -2.0.
    pub negative_threshold: f64,

    /// Lookback window in weeks used for posting velocity.
    ///
    /// Default: 4 (a "month").
    pub window_weeks: f64,

    /// Average popularity at which the popularity signal saturates.
    ///
    /// Default: 50.
    pub popularity_cap: f64,

    /// Posts per week at which the velocity signal saturates.
    ///
    /// Default: 10.
    pub velocity_cap: f64,

    /// Weight of the popularity signal in engagement. Default: 0.6.
    pub popularity_weight: f64,

    /// Weight of the velocity signal in engagement. Default: 0.4.
    pub velocity_weight: f64,

    /// Weight of positive share in the sentiment core. Default: 0.7.
    pub positive_share_weight: f64,

    /// Weight of the non-negative share in the sentiment core. Default: 0.3.
    pub non_negative_share_weight: f64,

    /// Weight of the sentiment core in CPS. Default: 0.8.
    pub sentiment_weight: f64,

    /// Weight of engagement in CPS. Default: 0.2.
    pub engagement_weight: f64,

    /// Batches smaller than this get the low confidence tier and a sparse warning.
    ///
    /// Default: 20.
    pub confidence_cutoff: usize,

    /// Confidence for batches below the cutoff. Default: 0.5.
    pub low_confidence: f64,

    /// Confidence for batches at or above the cutoff. Default: 0.7.
    pub high_confidence: f64,

    /// Maximum themes in a report. Default: 6.
    pub max_themes: usize,

    /// Theme tokens must be longer than this many characters. Default: 3.
    pub min_theme_token_len: usize,

    /// Maximum pain-point excerpts in a report. Default: 6.
    pub max_pain_points: usize,

    /// Candidate sentences must be strictly longer than this. Default: 10.
    pub min_excerpt_len: usize,

    /// Candidate sentences must be strictly shorter than this. Default: 100.
    pub max_excerpt_len: usize,

    /// Excerpts are truncated to this many characters. Default: 80.
    pub excerpt_truncate: usize,

    /// Maximum top items in a report. Default: 10.
    pub max_top_items: usize,

    /// Snippet length for top items. Default: 200.
    pub snippet_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 2.0,
            negative_threshold: -2.0,
            window_weeks: DEFAULT_WINDOW_WEEKS,
            popularity_cap: 50.0,
            velocity_cap: 10.0,
            popularity_weight: 0.6,
            velocity_weight: 0.4,
            positive_share_weight: 0.7,
            non_negative_share_weight: 0.3,
            sentiment_weight: 0.8,
            engagement_weight: 0.2,
            confidence_cutoff: 20,
            low_confidence: 0.5,
            high_confidence: 0.7,
            max_themes: 6,
            min_theme_token_len: 3,
            max_pain_points: 6,
            min_excerpt_len: 10,
            max_excerpt_len: 100,
            excerpt_truncate: 80,
            max_top_items: 10,
            snippet_len: 200,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the velocity window.
    pub fn with_window_weeks(mut self, weeks: f64) -> Self {
        self.window_weeks = weeks;
        self
    }

    /// Set the sentiment thresholds.
    pub fn with_thresholds(mut self, positive: f64, negative: f64) -> Self {
        self.positive_threshold = positive;
        self.negative_threshold = negative;
        self
    }

    /// Set the confidence cutoff.
    pub fn with_confidence_cutoff(mut self, cutoff: usize) -> Self {
        self.confidence_cutoff = cutoff;
        self
    }

    /// Set the top item cap.
    pub fn with_max_top_items(mut self, max: usize) -> Self {
        self.max_top_items = max;
        self
    }

    /// Confidence tier for a batch of `total_posts`.
    pub fn confidence_for(&self, total_posts: usize) -> f64 {
        if total_posts < self.confidence_cutoff {
            self.low_confidence
        } else {
            self.high_confidence
        }
    }

    /// Whether a batch of `total_posts` is too small to trust.
    pub fn is_sparse(&self, total_posts: usize) -> bool {
        total_posts < self.confidence_cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_tier_boundary() {
        let config = EngineConfig::default();
        assert_eq!(config.confidence_for(0), 0.5);
        assert_eq!(config.confidence_for(19), 0.5);
        assert_eq!(config.confidence_for(20), 0.7);
        assert_eq!(config.confidence_for(500), 0.7);
    }

    #[test]
    fn test_partial_config_json_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"window_weeks": 1.0}"#).unwrap();
        assert_eq!(config.window_weeks, 1.0);
        assert_eq!(config.max_themes, 6);
        assert_eq!(config.positive_threshold, 2.0);
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = EngineConfig::new()
            .with_confidence_cutoff(5)
            .with_max_top_items(3);
        assert_eq!(config.confidence_for(4), 0.5);
        assert_eq!(config.confidence_for(5), 0.7);
        assert!(!config.is_sparse(5));
        assert_eq!(config.max_top_items, 3);
    }
}
