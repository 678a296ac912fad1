//! Artifact Extraction Module
//!
//! This module turns LLM markdown output into file artifacts: fenced blocks
//! are extracted, assigned extensions, and given relative paths.

mod extension;
mod parser;
mod path;

pub use extension::*;
pub use parser::*;
pub use path::*;
