//! Signal pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Per-post lexicon sentiment classification
//! - Batch aggregation into sentiment shares
//! - Engagement and community positivity scoring
//! - Theme and pain-point extraction
//! - Report assembly, including the degraded shape for upstream failures

pub mod aggregate;
pub mod analyzer;
pub mod composite;
pub mod engagement;
pub mod engine;
pub mod pain_points;
pub mod report;
pub mod sentiment;
pub mod themes;

pub use aggregate::{aggregate, SentimentBreakdown};
pub use analyzer::{Analysis, Analyzer};
pub use composite::{CompositeScore, CompositeScorer};
pub use engagement::{Engagement, EngagementScorer};
pub use engine::{SignalEngine, DEFAULT_FETCH_TIMEOUT};
pub use pain_points::PainPointExtractor;
pub use report::{
    metric_names, ReportAssembler, FALLBACK_WARNING, SPARSE_WARNING, UPSTREAM_ERROR_PREFIX,
};
pub use sentiment::{tokenize, SentimentClassifier};
pub use themes::ThemeExtractor;
