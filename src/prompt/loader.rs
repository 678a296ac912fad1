//! Prompt Loader - Load and cache prompt overrides from files
//!
//! A prompts directory may hold `<name>.md` files that replace the built-in
//! templates of the same name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{Result, ScaffoldrError};

/// Loads and caches prompt templates from a directory
pub struct PromptLoader {
    /// Base directory containing prompt template files
    templates_dir: PathBuf,
    /// In-memory cache of loaded templates
    cache: RwLock<HashMap<String, String>>,
}

impl PromptLoader {
    /// Create a new PromptLoader with the given templates directory
    pub fn new(templates_dir: impl AsRef<Path>) -> Self {
        Self {
            templates_dir: templates_dir.as_ref().to_path_buf(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Load a template from disk and cache it
    pub fn load(&self, name: &str) -> Result<String> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|e| ScaffoldrError::InvalidState(format!("Failed to acquire read lock: {}", e)))?;
            if let Some(content) = cache.get(name) {
                return Ok(content.clone());
            }
        }

        let path = self.template_path(name);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ScaffoldrError::Template(format!("Failed to load template '{}' from {}: {}", name, path.display(), e))
        })?;

        {
            let mut cache = self
                .cache
                .write()
                .map_err(|e| ScaffoldrError::InvalidState(format!("Failed to acquire write lock: {}", e)))?;
            cache.insert(name.to_string(), content.clone());
        }

        Ok(content)
    }

    /// Check if a template exists on disk
    pub fn exists(&self, name: &str) -> bool {
        self.template_path(name).exists()
    }

    /// Get the templates directory path
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    fn template_path(&self, name: &str) -> PathBuf {
        self.templates_dir.join(format!("{}.md", name))
    }
}
