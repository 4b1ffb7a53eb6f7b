//! Trait seams for the collaborators around the pipeline.

pub mod source;
