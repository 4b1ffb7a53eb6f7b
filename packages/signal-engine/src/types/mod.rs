//! Data types for posts, queries, configuration and reports.

pub mod config;
pub mod post;
pub mod query;
pub mod report;
