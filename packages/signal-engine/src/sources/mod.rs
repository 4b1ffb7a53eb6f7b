//! Post source implementations.
//!
//! Concrete implementations of the `PostSource` trait.
//!
//! # Available Sources
//!
//! - `StaticPostSource` - Posts already in memory (files, fixtures)
//! - `ApifyRedditSource` - Reddit search via Apify (requires `apify` feature)
//! - `MockPostSource` - For testing
//!
//! # Example
//!
//! ```rust,ignore
//! use signal_engine::sources::ApifyRedditSource;
//! use signal_engine::{SignalEngine, SourceQuery};
//!
//! let source = ApifyRedditSource::new(apify_client::ApifyClient::new(token));
//! let engine = SignalEngine::new(source);
//! let report = engine.report(&SourceQuery::new("meal kits")).await;
//! ```

mod memory;
mod mock;

#[cfg(feature = "apify")]
mod apify;

pub use memory::StaticPostSource;
pub use mock::{MockFailure, MockPostSource};

#[cfg(feature = "apify")]
pub use apify::ApifyRedditSource;

// Re-export from traits for convenience
pub use crate::traits::source::PostSource;
