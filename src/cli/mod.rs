//! CLI module for scaffoldr - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for generating projects
//! with an LLM, materializing existing markdown, and inspecting results.

pub mod commands;

pub use commands::Cli;
