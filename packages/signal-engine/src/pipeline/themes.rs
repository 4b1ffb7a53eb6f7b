//! Frequent-keyword themes from post titles.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::lexicon::Lexicon;
use crate::pipeline::sentiment::tokenize;
use crate::types::config::EngineConfig;
use crate::types::post::RawPost;

#[derive(Debug, Clone)]
pub struct ThemeExtractor {
    lexicon: Arc<Lexicon>,
    max_themes: usize,
    min_token_len: usize,
}

impl ThemeExtractor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self::from_config(lexicon, &EngineConfig::default())
    }

    pub fn from_config(lexicon: Arc<Lexicon>, config: &EngineConfig) -> Self {
        Self {
            lexicon,
            max_themes: config.max_themes,
            min_token_len: config.min_theme_token_len,
        }
    }

    /// Most frequent title tokens, most frequent first.
    ///
    /// Ties keep first-seen order so output is reproducible.
    pub fn extract(&self, posts: &[RawPost]) -> Vec<String> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for post in posts {
            for token in tokenize(&post.title) {
                if token.chars().count() <= self.min_token_len || self.lexicon.is_stop_word(&token)
                {
                    continue;
                }
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        // sort_by is stable: equal counts stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(self.max_themes)
            .map(|(token, _)| token)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(titles: &[&str]) -> Vec<RawPost> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| RawPost::new(i.to_string(), *t, "https://x"))
            .collect()
    }

    fn extractor() -> ThemeExtractor {
        ThemeExtractor::new(Lexicon::default_shared())
    }

    #[test]
    fn test_ranks_by_frequency() {
        let posts = titled(&[
            "Pricing feedback for meal kits",
            "Meal kits delivery pricing",
            "Why meal kits fail",
        ]);
        let themes = extractor().extract(&posts);
        assert_eq!(themes[0], "meal");
        assert_eq!(themes[1], "kits");
        assert_eq!(themes[2], "pricing");
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let posts = titled(&["zebra apple mango", "mango apple zebra"]);
        assert_eq!(extractor().extract(&posts), vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_drops_short_tokens_and_stop_words() {
        let posts = titled(&["This app is the best with your team"]);
        let themes = extractor().extract(&posts);
        assert_eq!(themes, vec!["best", "team"]);
    }

    #[test]
    fn test_ignores_bodies() {
        let posts = vec![RawPost::new("1", "Title words here", "https://x")
            .with_body("subscription subscription subscription")];
        let themes = extractor().extract(&posts);
        assert!(!themes.contains(&"subscription".to_string()));
    }

    #[test]
    fn test_caps_at_six() {
        let posts = titled(&["alpha bravo charlie delta echoes foxtrot golfer hotel"]);
        let themes = extractor().extract(&posts);
        assert_eq!(themes.len(), 6);
        assert_eq!(themes[5], "foxtrot");
    }

    #[test]
    fn test_empty_batch() {
        assert!(extractor().extract(&[]).is_empty());
    }
}
