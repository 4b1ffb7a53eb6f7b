//! Testing utilities including fixture builders and the mock source.
//!
//! These are useful for testing applications that use the signal engine
//! without making real network calls.

use chrono::{Duration, Utc};

use crate::types::post::RawPost;

pub use crate::sources::{MockFailure, MockPostSource};

/// Text that scores +3 with the default lexicon.
pub const POSITIVE_TEXT: &str = "Love it, amazing and great";

/// Text that scores 0 with the default lexicon.
pub const NEUTRAL_TEXT: &str = "Shipping update for the week";

/// Text that scores -3 with the default lexicon.
pub const NEGATIVE_TEXT: &str = "Terrible, awful and broken";

/// A valid post with the given title and popularity, published an hour ago.
pub fn post(id: &str, title: &str, popularity: i64) -> RawPost {
    RawPost::new(id, title, format!("https://www.reddit.com/r/test/comments/{}", id))
        .with_source("r/test")
        .with_popularity(popularity)
        .with_created_at(Utc::now() - Duration::hours(1))
}

/// A batch with the given number of positive, neutral and negative posts.
///
/// Posts are numbered in that order and each has popularity 5.
pub fn batch(positive: usize, neutral: usize, negative: usize) -> Vec<RawPost> {
    let texts = std::iter::repeat(POSITIVE_TEXT)
        .take(positive)
        .chain(std::iter::repeat(NEUTRAL_TEXT).take(neutral))
        .chain(std::iter::repeat(NEGATIVE_TEXT).take(negative));

    texts
        .enumerate()
        .map(|(i, text)| post(&format!("p{}", i), text, 5))
        .collect()
}
