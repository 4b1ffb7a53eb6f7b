//! Word lists and emoji scores driving the heuristics.
//!
//! The lexicon is configuration data, not code: a default is embedded in the
//! crate and parsed once per process, and deployments can load a tuned copy
//! from disk. Scorers receive it through a [`LexiconProvider`].

use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{LexiconError, LexiconResult};

const DEFAULT_LEXICON_JSON: &str = include_str!("../data/default_lexicon.json");

lazy_static! {
    static ref DEFAULT_LEXICON: Arc<Lexicon> = Arc::new(
        Lexicon::from_json(DEFAULT_LEXICON_JSON).expect("embedded default lexicon is valid")
    );
}

/// Fixed word lists and emoji table used by the scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub positive_words: HashSet<String>,
    pub negative_words: HashSet<String>,
    pub stop_words: HashSet<String>,

    /// Scanned in order; the first keyword found in a post wins.
    pub pain_keywords: Vec<String>,

    /// Emoji to score, in declaration order.
    pub emoji_scores: IndexMap<String, f64>,

    /// Word whose presence multiplies the score by 1.5
    #[serde(default = "default_intensifier")]
    pub intensifier: String,

    /// Word whose presence multiplies the score by -0.8
    #[serde(default = "default_negation")]
    pub negation: String,
}

fn default_intensifier() -> String {
    "very".to_string()
}

fn default_negation() -> String {
    "not".to_string()
}

impl Lexicon {
    /// Parse and validate a lexicon from JSON.
    ///
    /// Words and keywords are lowercased so matching against lowercased
    /// text stays consistent.
    pub fn from_json(json: &str) -> LexiconResult<Self> {
        let lexicon: Lexicon = serde_json::from_str(json)?;
        lexicon.normalized().validated()
    }

    /// Load a lexicon file.
    pub fn from_path(path: impl AsRef<Path>) -> LexiconResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The embedded default lexicon, shared across the process.
    pub fn default_shared() -> Arc<Lexicon> {
        Arc::clone(&DEFAULT_LEXICON)
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive_words.contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative_words.contains(token)
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    fn normalized(self) -> Self {
        let lower_set = |set: HashSet<String>| -> HashSet<String> {
            set.into_iter().map(|w| w.trim().to_lowercase()).collect()
        };
        Self {
            positive_words: lower_set(self.positive_words),
            negative_words: lower_set(self.negative_words),
            stop_words: lower_set(self.stop_words),
            pain_keywords: self
                .pain_keywords
                .into_iter()
                .map(|k| k.trim().to_lowercase())
                .collect(),
            emoji_scores: self.emoji_scores,
            intensifier: self.intensifier.trim().to_lowercase(),
            negation: self.negation.trim().to_lowercase(),
        }
    }

    fn validated(self) -> LexiconResult<Self> {
        if let Some(word) = self.positive_words.intersection(&self.negative_words).next() {
            return Err(LexiconError::Invalid(format!(
                "'{}' is both positive and negative",
                word
            )));
        }

        if self.pain_keywords.is_empty() {
            return Err(LexiconError::Invalid("pain_keywords is empty".into()));
        }

        let mut seen = HashSet::new();
        for keyword in &self.pain_keywords {
            if keyword.is_empty() {
                return Err(LexiconError::Invalid("blank pain keyword".into()));
            }
            if !seen.insert(keyword.as_str()) {
                return Err(LexiconError::Invalid(format!(
                    "duplicate pain keyword '{}'",
                    keyword
                )));
            }
        }

        if self.emoji_scores.keys().any(|e| e.is_empty()) {
            return Err(LexiconError::Invalid("blank emoji key".into()));
        }

        if self.intensifier.is_empty() || self.negation.is_empty() {
            return Err(LexiconError::Invalid(
                "intensifier and negation must be set".into(),
            ));
        }

        Ok(self)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon::clone(&DEFAULT_LEXICON)
    }
}

/// Supplies the lexicon to the scorers.
pub trait LexiconProvider: Send + Sync {
    fn lexicon(&self) -> Arc<Lexicon>;
}

/// Provider backed by the embedded default lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLexicon;

impl LexiconProvider for DefaultLexicon {
    fn lexicon(&self) -> Arc<Lexicon> {
        Lexicon::default_shared()
    }
}

/// Provider backed by a lexicon file, read once at construction.
#[derive(Debug, Clone)]
pub struct FileLexicon {
    path: PathBuf,
    lexicon: Arc<Lexicon>,
}

impl FileLexicon {
    pub fn load(path: impl Into<PathBuf>) -> LexiconResult<Self> {
        let path = path.into();
        let lexicon = Lexicon::from_path(&path)?;
        tracing::info!(
            path = %path.display(),
            positive = lexicon.positive_words.len(),
            negative = lexicon.negative_words.len(),
            pain_keywords = lexicon.pain_keywords.len(),
            "Loaded lexicon"
        );
        Ok(Self {
            path,
            lexicon: Arc::new(lexicon),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LexiconProvider for FileLexicon {
    fn lexicon(&self) -> Arc<Lexicon> {
        Arc::clone(&self.lexicon)
    }
}

impl LexiconProvider for Arc<Lexicon> {
    fn lexicon(&self) -> Arc<Lexicon> {
        Arc::clone(self)
    }
}
