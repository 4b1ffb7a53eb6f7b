//! Community Positivity Score (CPS).
//!
//! Blends the sentiment distribution with engagement into one 0-100 figure
//! and attaches a two-tier confidence. The tier cutoff is a tunable product
//! constant, not a statistically derived sample size.

use serde::{Deserialize, Serialize};

use crate::pipeline::aggregate::SentimentBreakdown;
use crate::types::config::EngineConfig;

/// Composite score with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub sentiment_core: u32,
    pub cps: u32,
    pub confidence: f64,
}

#[derive(Debug, Clone)]
pub struct CompositeScorer {
    config: EngineConfig,
}

impl CompositeScorer {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Rewards positive share directly and low negativity indirectly.
    pub fn sentiment_core(&self, positive_percent: u32, negative_percent: u32) -> u32 {
        let positive = positive_percent.min(100) as f64;
        let not_negative = 100.0 - negative_percent.min(100) as f64;
        (self.config.positive_share_weight * positive
            + self.config.non_negative_share_weight * not_negative)
            .round() as u32
    }

    pub fn cps(&self, sentiment_core: u32, engagement_score: u32) -> u32 {
        let core = sentiment_core.min(100) as f64;
        let engagement = engagement_score.min(100) as f64;
        (self.config.sentiment_weight * core + self.config.engagement_weight * engagement).round()
            as u32
    }

    pub fn score(&self, breakdown: &SentimentBreakdown, engagement_score: u32) -> CompositeScore {
        let sentiment_core =
            self.sentiment_core(breakdown.positive_percent, breakdown.negative_percent);
        CompositeScore {
            sentiment_core,
            cps: self.cps(sentiment_core, engagement_score),
            confidence: self.config.confidence_for(breakdown.post_count),
        }
    }
}

impl Default for CompositeScorer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
