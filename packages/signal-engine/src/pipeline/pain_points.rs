//! Keyword-triggered complaint excerpts.

use indexmap::IndexSet;
use std::sync::Arc;

use crate::lexicon::Lexicon;
use crate::types::config::EngineConfig;
use crate::types::post::RawPost;

#[derive(Debug, Clone)]
pub struct PainPointExtractor {
    lexicon: Arc<Lexicon>,
    max_pain_points: usize,
    min_len: usize,
    max_len: usize,
    truncate: usize,
}

impl PainPointExtractor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self::from_config(lexicon, &EngineConfig::default())
    }

    pub fn from_config(lexicon: Arc<Lexicon>, config: &EngineConfig) -> Self {
        Self {
            lexicon,
            max_pain_points: config.max_pain_points,
            min_len: config.min_excerpt_len,
            max_len: config.max_excerpt_len,
            truncate: config.excerpt_truncate,
        }
    }

    /// Collect at most one excerpt per post, deduplicated in first-seen order.
    pub fn extract(&self, posts: &[RawPost]) -> Vec<String> {
        let mut excerpts: IndexSet<String> = IndexSet::new();

        for post in posts {
            let text = post.text().to_lowercase();

            // Priority order matters: only the first keyword present is tried
            let Some(keyword) = self
                .lexicon
                .pain_keywords
                .iter()
                .find(|k| text.contains(k.as_str()))
            else {
                continue;
            };

            if let Some(excerpt) = self.excerpt_for(&text, keyword) {
                excerpts.insert(excerpt);
            }
        }

        excerpts.into_iter().take(self.max_pain_points).collect()
    }

    /// First sentence mentioning `keyword` that fits the length window.
    fn excerpt_for(&self, text: &str, keyword: &str) -> Option<String> {
        text.split(|c: char| matches!(c, '.' | '!' | '?'))
            .map(str::trim)
            .filter(|sentence| {
                let len = sentence.chars().count();
                len > self.min_len && len < self.max_len
            })
            .filter(|sentence| sentence.contains(keyword))
            .map(|sentence| truncate_chars(sentence, self.truncate))
            // keyword cut off: fall through to a later sentence so excerpts keep it
            .find(|excerpt| excerpt.contains(keyword))
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PainPointExtractor {
        PainPointExtractor::new(Lexicon::default_shared())
    }

    fn post(id: &str, title: &str, body: &str) -> RawPost {
        RawPost::new(id, title, "https://x").with_body(body)
    }

    #[test]
    fn test_extracts_keyword_sentence() {
        let posts = vec![post(
            "1",
            "Looking for feedback",
            "Great idea overall. The biggest problem is onboarding speed. Thanks!",
        )];
        assert_eq!(
            extractor().extract(&posts),
            vec!["the biggest problem is onboarding speed".to_string()]
        );
    }

    #[test]
    fn test_first_keyword_in_priority_order_wins() {
        // "need" appears first in the text but "problem" has higher priority
        let posts = vec![post(
            "1",
            "We need help",
            "I need a better planner app. My main problem is syncing calendars.",
        )];
        assert_eq!(
            extractor().extract(&posts),
            vec!["my main problem is syncing calendars".to_string()]
        );
    }

    #[test]
    fn test_no_fallback_to_lower_priority_keyword() {
        // "problem" is present but only in a too-short sentence, so nothing is recorded
        // even though a long "wish" sentence exists
        let posts = vec![post(
            "1",
            "No problem.",
            "I really wish there was a simpler budgeting tool for freelancers.",
        )];
        assert!(extractor().extract(&posts).is_empty());
    }

    #[test]
    fn test_sentence_length_bounds_are_strict() {
        // exactly 10 chars: "need it no" - rejected
        let short = vec![post("1", "need it no", "")];
        assert!(extractor().extract(&short).is_empty());

        // 11 chars - accepted
        let ok = vec![post("1", "need it now", "")];
        assert_eq!(extractor().extract(&ok), vec!["need it now".to_string()]);

        // 100+ chars - rejected
        let long_sentence = format!("need {}", "x".repeat(95));
        let long = vec![post("1", &long_sentence, "")];
        assert!(extractor().extract(&long).is_empty());
    }

    #[test]
    fn test_truncates_to_80_chars() {
        let sentence = format!("the issue {}", "a".repeat(85));
        let posts = vec![post("1", &sentence, "")];
        let excerpts = extractor().extract(&posts);
        assert_eq!(excerpts.len(), 1);
        assert_eq!(excerpts[0].chars().count(), 80);
        assert!(excerpts[0].starts_with("the issue"));
    }

    #[test]
    fn test_keyword_beyond_cut_is_skipped() {
        let sentence = format!("{} issue.", "a".repeat(85));
        let posts = vec![post("1", &sentence, "This issue is a real drag")];
        assert_eq!(
            extractor().extract(&posts),
            vec!["this issue is a real drag".to_string()]
        );
    }

    #[test]
    fn test_dedup_and_cap() {
        let mut posts = Vec::new();
        for i in 0..3 {
            posts.push(post(&i.to_string(), "Shipping is a problem for us", ""));
        }
        for i in 0..10 {
            posts.push(post(
                &format!("u{}", i),
                &format!("Unique problem number {}", i),
                "",
            ));
        }
        let excerpts = extractor().extract(&posts);
        assert_eq!(excerpts.len(), 6);
        assert_eq!(excerpts[0], "shipping is a problem for us");
        assert_eq!(excerpts[1], "unique problem number 0");
    }
}
