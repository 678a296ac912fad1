//! LLM client trait and a scripted mock

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, ScaffoldrError};
use crate::llm::types::{CompletionRequest, CompletionResponse};

/// Stateless LLM client - each call is independent (fresh context)
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Model used when the request does not name one
    fn model(&self) -> &str;

    /// Whether the client can make requests
    fn is_ready(&self) -> bool;
}

/// Client that replays queued responses in order and records requests.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    /// Create a mock with no queued responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers with `responses` in order
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another response
    pub fn push_response(&self, response: impl Into<String>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response.into());
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .map_err(|e| ScaffoldrError::InvalidState(format!("Mock lock poisoned: {}", e)))?
            .push(request);

        let next = self
            .responses
            .lock()
            .map_err(|e| ScaffoldrError::InvalidState(format!("Mock lock poisoned: {}", e)))?
            .pop_front();

        next.map(CompletionResponse::text)
            .ok_or_else(|| ScaffoldrError::Llm("No mock response queued".to_string()))
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn is_ready(&self) -> bool {
        true
    }
}
