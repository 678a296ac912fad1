//! Prompt Renderer - Render templates with context variables using Handlebars
//!
//! The renderer starts with every built-in template registered; a
//! [`PromptLoader`] can replace any of them from disk.

use handlebars::Handlebars;
use serde::Serialize;

use super::loader::PromptLoader;
use super::templates::{TEMPLATE_NAMES, builtin};
use crate::error::{Result, ScaffoldrError};

/// Renders prompt templates using Handlebars templating
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRenderer {
    /// Create a renderer with the built-in templates registered
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // Prompts carry code; never HTML-escape it
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut renderer = Self { handlebars };
        for name in TEMPLATE_NAMES {
            if let Some(source) = builtin(name)
                && let Err(e) = renderer.register_template(name, source)
            {
                log::error!("Built-in template '{}' failed to register: {}", name, e);
            }
        }
        renderer
    }

    /// Create a renderer whose templates may be overridden from `loader`
    pub fn with_overrides(loader: &PromptLoader) -> Result<Self> {
        let mut renderer = Self::new();
        for name in TEMPLATE_NAMES {
            if loader.exists(name) {
                let source = loader.load(name)?;
                renderer.register_template(name, &source)?;
                log::info!("Using prompt override for '{}' from {}", name, loader.templates_dir().display());
            }
        }
        Ok(renderer)
    }

    /// Register a named template for later use
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| ScaffoldrError::Template(format!("Failed to register template '{}': {}", name, e)))
    }

    /// Render a previously registered template with any serializable context
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(name, context)
            .map_err(|e| ScaffoldrError::Template(format!("Failed to render template '{}': {}", name, e)))
    }

    /// Check if a named template is registered
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.get_template(name).is_some()
    }
}
