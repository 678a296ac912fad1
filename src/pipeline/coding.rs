//! CodingPipeline drives the LLM through each step of a coding task.

use log::{info, warn};
use serde_json::json;

use crate::artifact::extract_artifacts;
use crate::error::{Result, ScaffoldrError};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::PromptRenderer;
use crate::prompt::templates::{DECOMPOSE, GENERATE, MODIFY, REVIEW, SYSTEM_PROMPT};

/// Which optional steps run, and the response budget per call.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Ask for a plan before generating code.
    pub decompose: bool,
    /// Review the generated code and revise it with the findings.
    pub review: bool,
    /// Maximum tokens for each LLM response.
    pub max_tokens: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            decompose: true,
            review: true,
            max_tokens: 8192,
        }
    }
}

/// Everything the pipeline produced for one task.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Plan from the decompose step, if it ran.
    pub plan: Option<String>,
    /// Final markdown code, revised when a review ran.
    pub code: String,
    /// Review notes, if the review step ran.
    pub review: Option<String>,
}

/// Runs decompose, generate, review and modify against an LLM client.
pub struct CodingPipeline<C: LlmClient> {
    client: C,
    renderer: PromptRenderer,
    config: PipelineConfig,
}

impl<C: LlmClient> CodingPipeline<C> {
    /// Create a pipeline with the built-in prompts.
    pub fn new(client: C, config: PipelineConfig) -> Self {
        Self::with_renderer(client, PromptRenderer::new(), config)
    }

    /// Create a pipeline with a custom prompt renderer.
    pub fn with_renderer(client: C, renderer: PromptRenderer, config: PipelineConfig) -> Self {
        Self {
            client,
            renderer,
            config,
        }
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Break a task into an implementation plan.
    pub async fn decompose(&self, task: &str) -> Result<String> {
        info!("Decomposing task");
        self.ask(DECOMPOSE, &json!({ "task": task })).await
    }

    /// Generate markdown code for a task, optionally guided by a plan.
    pub async fn generate(&self, task: &str, plan: Option<&str>) -> Result<String> {
        info!("Generating code");
        self.ask(GENERATE, &json!({ "task": task, "plan": plan })).await
    }

    /// Review generated code for the task.
    pub async fn review(&self, task: &str, code: &str) -> Result<String> {
        info!("Reviewing code");
        self.ask(REVIEW, &json!({ "task": task, "code": code })).await
    }

    /// Apply a change request to existing code and return the full revised code.
    pub async fn modify(&self, code: &str, request: &str) -> Result<String> {
        info!("Modifying code");
        self.ask(MODIFY, &json!({ "code": code, "request": request })).await
    }

    /// Run the configured steps for `task`.
    ///
    /// A revision that contains no extractable files is discarded in favour
    /// of the code it was meant to revise.
    pub async fn run(&self, task: &str) -> Result<PipelineOutput> {
        let plan = if self.config.decompose {
            Some(self.decompose(task).await?)
        } else {
            None
        };

        let mut code = self.generate(task, plan.as_deref()).await?;

        let review = if self.config.review {
            Some(self.review(task, &code).await?)
        } else {
            None
        };

        if let Some(notes) = review.as_deref().filter(|n| !n.trim().is_empty()) {
            let revised = self.modify(&code, notes).await?;
            if extract_artifacts(&revised).is_empty() {
                warn!("Revision contained no files, keeping generated code");
            } else {
                code = revised;
            }
        }

        Ok(PipelineOutput { plan, code, review })
    }

    async fn ask(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let prompt = self.renderer.render(template, context)?;
        let request = CompletionRequest::new(SYSTEM_PROMPT)
            .with_user_message(prompt)
            .with_max_tokens(self.config.max_tokens);

        let response = self.client.complete(request).await?;
        if response.content.trim().is_empty() {
            return Err(ScaffoldrError::Llm(format!("Empty response for {} step", template)));
        }
        Ok(response.content)
    }
}
