//! Post types - raw posts from the source and their classified form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MalformedPost;

/// A social post as delivered by the upstream source.
///
/// Immutable once received; the pipeline only ever borrows or clones it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    /// Source-assigned identifier
    pub id: String,

    /// Post title (required)
    pub title: String,

    /// Self-text body, may be empty for link posts
    #[serde(default)]
    pub body: String,

    /// Community label, e.g. "r/startups"
    #[serde(default)]
    pub source: String,

    /// Upvote-like popularity count
    #[serde(default)]
    pub popularity_score: i64,

    /// Number of comments
    #[serde(default)]
    pub comment_count: i64,

    /// When the post was published
    pub created_at: DateTime<Utc>,

    /// Canonical link to the post
    pub permalink: String,

    /// Marked not-safe-for-work by the source
    #[serde(default)]
    pub nsfw: bool,

    /// Removed or deleted at the source
    #[serde(default)]
    pub removed: bool,
}

impl RawPost {
    /// Create a post with the required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        permalink: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: String::new(),
            source: String::new(),
            popularity_score: 0,
            comment_count: 0,
            created_at: Utc::now(),
            permalink: permalink.into(),
            nsfw: false,
            removed: false,
        }
    }

    /// Set the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the community label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the popularity score.
    pub fn with_popularity(mut self, score: i64) -> Self {
        self.popularity_score = score;
        self
    }

    /// Set the comment count.
    pub fn with_comments(mut self, count: i64) -> Self {
        self.comment_count = count;
        self
    }

    /// Set the publish time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Mark the post NSFW.
    pub fn flagged_nsfw(mut self) -> Self {
        self.nsfw = true;
        self
    }

    /// Mark the post removed.
    pub fn flagged_removed(mut self) -> Self {
        self.removed = true;
        self
    }

    /// Title and body joined with a space.
    pub fn text(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.body)
        }
    }

    /// Check the post is usable by the pipeline.
    pub fn validate(&self) -> Result<(), MalformedPost> {
        if self.id.trim().is_empty() {
            return Err(MalformedPost::MissingField("id"));
        }
        if self.title.trim().is_empty() {
            return Err(MalformedPost::MissingField("title"));
        }
        if self.permalink.trim().is_empty() {
            return Err(MalformedPost::MissingField("permalink"));
        }
        if self.nsfw {
            return Err(MalformedPost::Flagged("nsfw"));
        }
        if self.removed {
            return Err(MalformedPost::Flagged("removed"));
        }
        Ok(())
    }
}

/// Three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

/// Output of classifying one post's text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

/// A raw post with its sentiment attached. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedPost {
    #[serde(flatten)]
    pub post: RawPost,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
}

impl ClassifiedPost {
    pub fn new(post: RawPost, sentiment: Sentiment) -> Self {
        Self {
            post,
            sentiment_label: sentiment.label,
            sentiment_score: sentiment.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_title_and_body() {
        let post = RawPost::new("1", "Title here", "https://x").with_body("Body text");
        assert_eq!(post.text(), "Title here Body text");

        let link_only = RawPost::new("2", "Just a link", "https://x");
        assert_eq!(link_only.text(), "Just a link");
    }

    #[test]
    fn test_validate_rejects_missing_and_flagged() {
        assert!(RawPost::new("1", "ok", "https://x").validate().is_ok());
        assert_eq!(
            RawPost::new("", "ok", "https://x").validate(),
            Err(MalformedPost::MissingField("id"))
        );
        assert_eq!(
            RawPost::new("1", "  ", "https://x").validate(),
            Err(MalformedPost::MissingField("title"))
        );
        assert_eq!(
            RawPost::new("1", "ok", "").validate(),
            Err(MalformedPost::MissingField("permalink"))
        );
        assert_eq!(
            RawPost::new("1", "ok", "https://x").flagged_nsfw().validate(),
            Err(MalformedPost::Flagged("nsfw"))
        );
        assert_eq!(
            RawPost::new("1", "ok", "https://x").flagged_removed().validate(),
            Err(MalformedPost::Flagged("removed"))
        );
    }

    #[test]
    fn test_raw_post_json_defaults() {
        let json = r#"{
            "id": "abc",
            "title": "Hello",
            "createdAt": "2024-05-01T12:00:00Z",
            "permalink": "https://reddit.com/r/x/abc"
        }"#;
        let post: RawPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.popularity_score, 0);
        assert!(post.body.is_empty());
        assert!(!post.nsfw);
    }
}
