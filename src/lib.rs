//! Scaffoldr - Turn LLM-generated markdown into a project on disk
//!
//! An LLM decomposes a task, writes code as fenced markdown blocks, and
//! reviews it. Scaffoldr extracts those blocks, names the files, writes them
//! into a fresh project directory, and renders the result as a tree with
//! run instructions.

pub mod artifact;
pub mod error;
pub mod id;
pub mod llm;
pub mod pipeline;
pub mod project;
pub mod prompt;

pub use error::{Result, ScaffoldrError};
