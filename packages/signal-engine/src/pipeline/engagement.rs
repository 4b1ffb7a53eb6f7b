//! Engagement score from popularity and posting velocity.

use serde::{Deserialize, Serialize};

use crate::types::config::EngineConfig;
use crate::types::post::RawPost;

/// Engagement inputs and the resulting 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub avg_popularity: f64,
    pub posts_per_week: f64,
    pub score: u32,
}

impl Engagement {
    pub fn zero() -> Self {
        Self {
            avg_popularity: 0.0,
            posts_per_week: 0.0,
            score: 0,
        }
    }
}

/// Scores how much attention a batch is getting.
///
/// Each sub-signal saturates at 1.0 so a single viral post cannot dominate.
/// Popularity outweighs volume: a few high-signal posts say more than many
/// ignored ones.
#[derive(Debug, Clone)]
pub struct EngagementScorer {
    window_weeks: f64,
    popularity_cap: f64,
    velocity_cap: f64,
    popularity_weight: f64,
    velocity_weight: f64,
}

impl EngagementScorer {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            window_weeks: config.window_weeks,
            popularity_cap: config.popularity_cap,
            velocity_cap: config.velocity_cap,
            popularity_weight: config.popularity_weight,
            velocity_weight: config.velocity_weight,
        }
    }

    /// Override the lookback window.
    pub fn with_window_weeks(mut self, weeks: f64) -> Self {
        self.window_weeks = weeks;
        self
    }

    pub fn score(&self, posts: &[RawPost]) -> Engagement {
        if posts.is_empty() {
            return Engagement::zero();
        }

        let total = posts.len() as f64;
        let avg_popularity =
            posts.iter().map(|p| p.popularity_score as f64).sum::<f64>() / total;
        let posts_per_week = if self.window_weeks > 0.0 {
            total / self.window_weeks
        } else {
            0.0
        };

        let popularity_signal = (avg_popularity / self.popularity_cap).clamp(0.0, 1.0);
        let velocity_signal = (posts_per_week / self.velocity_cap).clamp(0.0, 1.0);
        let raw =
            self.popularity_weight * popularity_signal + self.velocity_weight * velocity_signal;

        Engagement {
            avg_popularity,
            posts_per_week,
            score: (100.0 * raw).round() as u32,
        }
    }
}

impl Default for EngagementScorer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts_with_popularity(scores: &[i64]) -> Vec<RawPost> {
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| RawPost::new(i.to_string(), "t", "https://x").with_popularity(*s))
            .collect()
    }

    #[test]
    fn test_empty_batch_scores_zero() {
        assert_eq!(EngagementScorer::default().score(&[]).score, 0);
    }

    #[test]
    fn test_formula() {
        // avg 25 -> 0.5 * 0.6 = 0.30; 20 posts / 4 weeks = 5 -> 0.5 * 0.4 = 0.20
        let posts = posts_with_popularity(&[25; 20]);
        let e = EngagementScorer::default().score(&posts);
        assert_eq!(e.avg_popularity, 25.0);
        assert_eq!(e.posts_per_week, 5.0);
        assert_eq!(e.score, 50);
    }

    #[test]
    fn test_viral_post_is_capped() {
        // avg 5000 caps at 1.0 -> 60; 1 post / 4 weeks = 0.25 -> 0.025 * 0.4 = 1
        let posts = posts_with_popularity(&[5000]);
        assert_eq!(EngagementScorer::default().score(&posts).score, 61);
    }

    #[test]
    fn test_saturated_batch_is_100() {
        let posts = posts_with_popularity(&[80; 60]);
        assert_eq!(EngagementScorer::default().score(&posts).score, 100);
    }

    #[test]
    fn test_negative_popularity_floors_at_zero() {
        let posts = posts_with_popularity(&[-40]);
        // popularity signal clamps to 0; velocity 0.25 / 10 * 0.4 = 0.01 -> 1
        assert_eq!(EngagementScorer::default().score(&posts).score, 1);
    }

    #[test]
    fn test_shorter_window_raises_velocity() {
        let posts = posts_with_popularity(&[0; 10]);
        let month = EngagementScorer::default().score(&posts);
        let week = EngagementScorer::default().with_window_weeks(1.0).score(&posts);
        assert_eq!(month.score, 10);
        assert_eq!(week.score, 40);
    }
}
