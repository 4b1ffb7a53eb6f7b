//! Sentiment distribution across a batch.

use serde::{Deserialize, Serialize};

use crate::types::post::{ClassifiedPost, SentimentLabel};

/// Label counts and whole-number percentages for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive_count: usize,
    pub neutral_count: usize,
    pub negative_count: usize,

    /// Number of posts actually classified
    pub post_count: usize,

    pub positive_percent: u32,
    pub neutral_percent: u32,
    pub negative_percent: u32,
}

impl SentimentBreakdown {
    /// The neutral baseline used when there is no data.
    pub fn baseline() -> Self {
        Self::from_counts(0, 0, 0)
    }

    /// Build a breakdown from label counts.
    ///
    /// Positive and negative shares are rounded independently; neutral is
    /// the remainder so the three always sum to exactly 100. The neutral
    /// count is carried for display but does not drive the neutral share.
    pub fn from_counts(positive: usize, neutral: usize, negative: usize) -> Self {
        let post_count = positive + neutral + negative;
        let denominator = post_count.max(1) as f64;

        let positive_percent = (positive as f64 / denominator * 100.0).round() as u32;
        let negative_percent = (negative as f64 / denominator * 100.0).round() as u32;
        // Both shares can round half up (5/8 and 3/8 give 63 + 38), so trim
        // the negative share until the remainder is non-negative.
        let negative_percent = negative_percent.min(100 - positive_percent);
        let neutral_percent = 100 - positive_percent - negative_percent;

        Self {
            positive_count: positive,
            neutral_count: neutral,
            negative_count: negative,
            post_count,
            positive_percent,
            neutral_percent,
            negative_percent,
        }
    }

    pub fn total_percent(&self) -> u32 {
        self.positive_percent + self.neutral_percent + self.negative_percent
    }
}

/// Count labels across classified posts.
pub fn aggregate(posts: &[ClassifiedPost]) -> SentimentBreakdown {
    let (mut positive, mut neutral, mut negative) = (0, 0, 0);
    for post in posts {
        match post.sentiment_label {
            SentimentLabel::Positive => positive += 1,
            SentimentLabel::Neutral => neutral += 1,
            SentimentLabel::Negative => negative += 1,
        }
    }
    SentimentBreakdown::from_counts(positive, neutral, negative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifteen_five_five() {
        let b = SentimentBreakdown::from_counts(15, 5, 5);
        assert_eq!(b.positive_percent, 60);
        assert_eq!(b.negative_percent, 20);
        assert_eq!(b.neutral_percent, 20);
        assert_eq!(b.post_count, 25);
    }

    #[test]
    fn test_empty_batch_is_all_neutral() {
        let b = SentimentBreakdown::baseline();
        assert_eq!(b.positive_percent, 0);
        assert_eq!(b.negative_percent, 0);
        assert_eq!(b.neutral_percent, 100);
        assert_eq!(b.post_count, 0);
    }

    #[test]
    fn test_neutral_absorbs_rounding() {
        // 1/3 each: 33 + 33 and neutral takes 34
        let b = SentimentBreakdown::from_counts(1, 1, 1);
        assert_eq!(b.positive_percent, 33);
        assert_eq!(b.negative_percent, 33);
        assert_eq!(b.neutral_percent, 34);
        assert_eq!(b.total_percent(), 100);
    }

    #[test]
    fn test_half_and_half_with_no_neutral() {
        // 0.5 rounds away from zero: 50 + 50, neutral 0
        let b = SentimentBreakdown::from_counts(1, 0, 1);
        assert_eq!(b.positive_percent, 50);
        assert_eq!(b.negative_percent, 50);
        assert_eq!(b.neutral_percent, 0);
    }

    #[test]
    fn test_overshoot_is_clamped() {
        // 5/8 = 62.5 -> 63, 3/8 = 37.5 -> 38; sum 101 before clamping
        let b = SentimentBreakdown::from_counts(5, 0, 3);
        assert_eq!(b.positive_percent, 63);
        assert_eq!(b.negative_percent, 37);
        assert_eq!(b.neutral_percent, 0);
        assert_eq!(b.total_percent(), 100);
    }
}
