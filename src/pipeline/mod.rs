//! Coding pipeline: decompose a task, generate code, review and revise it.
//!
//! The pipeline only produces markdown. Writing it to disk is the job of
//! [`crate::project::ProjectWriter`].

mod coding;

pub use coding::{CodingPipeline, PipelineConfig, PipelineOutput};
