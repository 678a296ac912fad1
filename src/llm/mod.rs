//! LLM Client Layer - Anthropic API integration
//!
//! This module provides:
//! - Message types for LLM communication
//! - LlmClient trait for API abstraction
//! - AnthropicClient implementation
//! - MockLlmClient for offline runs and tests

pub mod anthropic;
pub mod client;
pub mod types;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use client::{LlmClient, MockLlmClient};
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, Usage};
