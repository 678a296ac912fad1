//! Project materialization
//!
//! Writes extracted artifacts into a fresh project directory, then renders
//! what ended up on disk as a tree and a short list of run steps.

mod instructions;
mod tree;
mod writer;

pub use instructions::{GENERIC_INSTRUCTION, run_instructions};
pub use tree::render_tree;
pub use writer::{DEFAULT_FOLDER_NAME, MAX_FOLDER_NAME_LEN, ProjectHandle, ProjectWriter, sanitize_folder_name};
