//! Prompt System - Template loading and rendering
//!
//! This module provides the built-in prompts for each pipeline step, optional
//! on-disk overrides, and rendering with Handlebars.

mod loader;
mod render;
pub mod templates;

pub use loader::PromptLoader;
pub use render::PromptRenderer;
