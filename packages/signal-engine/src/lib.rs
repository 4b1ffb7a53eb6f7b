//! Social Signal Aggregation Library
//!
//! Turns a batch of social posts about a topic into a deterministic
//! aggregate report: sentiment shares, an engagement score, a composite
//! community positivity score, recurring themes, complaint excerpts, top
//! items and citations.
//!
//! # Design Philosophy
//!
//! - Pure lexicon heuristics, no models: the same batch always yields the
//!   same numbers
//! - Upstream trouble never becomes an error for the caller; it becomes a
//!   degraded report with the reason in `warnings`
//! - Fetching is behind the [`PostSource`] trait so tests and offline runs
//!   never touch the network
//!
//! # Usage
//!
//! ```rust,ignore
//! use signal_engine::{SignalEngine, SourceQuery};
//! use signal_engine::testing::{batch, MockPostSource};
//!
//! let source = MockPostSource::new().with_posts(batch(15, 5, 5));
//! let engine = SignalEngine::new(source);
//!
//! let report = engine.report(&SourceQuery::new("meal kits")).await;
//! println!("{}", report.to_json()?);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The `PostSource` abstraction
//! - [`types`] - Posts, queries, configuration and report types
//! - [`lexicon`] - Word lists, emoji weights and lexicon providers
//! - [`pipeline`] - Classification, scoring, extraction and assembly
//! - [`sources`] - Source implementations (static, Apify Reddit, mock)
//! - [`testing`] - Fixture builders and mock implementations

pub mod error;
pub mod lexicon;
pub mod pipeline;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{LexiconError, MalformedPost, SourceError, SourceResult};
pub use lexicon::{DefaultLexicon, FileLexicon, Lexicon, LexiconProvider};
pub use traits::source::PostSource;
pub use types::{
    config::EngineConfig,
    post::{ClassifiedPost, RawPost, Sentiment, SentimentLabel},
    query::{FilterContext, SourceQuery, TimeWindow, DEFAULT_WINDOW_WEEKS},
    report::{AggregateReport, Citation, Metric, TopItem},
};

// Re-export the engine from pipeline
pub use pipeline::SignalEngine;

// Re-export pipeline components
pub use pipeline::{
    // Stages
    aggregate, tokenize, Analyzer, CompositeScorer, EngagementScorer, PainPointExtractor,
    ReportAssembler, SentimentClassifier, ThemeExtractor,
    // Stage outputs
    Analysis, CompositeScore, Engagement, SentimentBreakdown,
    // Report vocabulary
    metric_names, FALLBACK_WARNING, SPARSE_WARNING,
};

// Re-export sources
pub use sources::StaticPostSource;

#[cfg(feature = "apify")]
pub use sources::ApifyRedditSource;

// Re-export testing utilities
pub use testing::MockPostSource;
