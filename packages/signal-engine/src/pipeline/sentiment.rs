//! Lexicon sentiment classifier.
//!
//! Scores one post's text with word hits, punctuation and intensifier
//! heuristics, then emoji. The steps run in a fixed order because the
//! intensifier and negation steps multiply whatever has accumulated so far.

use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

use crate::lexicon::Lexicon;
use crate::types::config::EngineConfig;
use crate::types::post::{ClassifiedPost, RawPost, Sentiment, SentimentLabel};

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W+").unwrap();
}

const EXCLAMATION_BONUS: f64 = 0.5;
const QUESTION_PENALTY: f64 = 0.2;
const INTENSIFIER_FACTOR: f64 = 1.5;
const NEGATION_FACTOR: f64 = -0.8;

/// Split on non-word runs and lowercase. Empty fragments are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    NON_WORD
        .split(text)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Pure, deterministic text scorer.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    lexicon: Arc<Lexicon>,
    positive_threshold: f64,
    negative_threshold: f64,
}

impl SentimentClassifier {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self::from_config(lexicon, &EngineConfig::default())
    }

    pub fn from_config(lexicon: Arc<Lexicon>, config: &EngineConfig) -> Self {
        Self {
            lexicon,
            positive_threshold: config.positive_threshold,
            negative_threshold: config.negative_threshold,
        }
    }

    /// Raw accumulated score for `text`.
    pub fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let has_token = |word: &str| tokens.iter().any(|t| t == word);

        let mut score = 0.0;
        for token in &tokens {
            if self.lexicon.is_positive(token) {
                score += 1.0;
            } else if self.lexicon.is_negative(token) {
                score -= 1.0;
            }
        }

        if text.contains('!') {
            score += EXCLAMATION_BONUS;
        }
        if text.contains('?') {
            score -= QUESTION_PENALTY;
        }
        if has_token(&self.lexicon.intensifier) {
            score *= INTENSIFIER_FACTOR;
        }
        if has_token(&self.lexicon.negation) {
            score *= NEGATION_FACTOR;
        }

        for (emoji, value) in &self.lexicon.emoji_scores {
            if text.contains(emoji.as_str()) {
                score += value;
            }
        }

        score
    }

    /// Threshold a score into a label.
    pub fn label_for(&self, score: f64) -> SentimentLabel {
        if score >= self.positive_threshold {
            SentimentLabel::Positive
        } else if score <= self.negative_threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        let score = self.score(text);
        Sentiment {
            label: self.label_for(score),
            score,
        }
    }

    /// Classify title and body together.
    pub fn classify_post(&self, post: RawPost) -> ClassifiedPost {
        let sentiment = self.classify(&post.text());
        ClassifiedPost::new(post, sentiment)
    }

    pub fn classify_all(&self, posts: &[RawPost]) -> Vec<ClassifiedPost> {
        posts
            .iter()
            .cloned()
            .map(|p| self.classify_post(p))
            .collect()
    }
}
