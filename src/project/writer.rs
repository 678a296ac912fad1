//! ProjectWriter turns markdown into a project directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, info};

use crate::artifact::{FileArtifact, extract_artifacts};
use crate::error::{Result, ScaffoldrError};
use crate::id::disambiguate;

use super::instructions::run_instructions;
use super::tree::render_tree;

/// Folder name used when the task sanitizes to nothing
pub const DEFAULT_FOLDER_NAME: &str = "coding_task";

/// Maximum length of a sanitized folder name
pub const MAX_FOLDER_NAME_LEN: usize = 50;

/// A materialized project on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHandle {
    /// Absolute path of the project root
    pub root: PathBuf,
    /// Final folder name, including any disambiguation suffix
    pub folder_name: String,
    /// Relative paths in write order
    pub created_files: Vec<String>,
}

impl ProjectHandle {
    /// Render the current on-disk tree of the project.
    pub fn tree(&self) -> String {
        render_tree(&self.root)
    }

    /// Suggested commands for running the project.
    pub fn run_instructions(&self) -> Vec<String> {
        run_instructions(&self.root)
    }
}

/// Writes projects under a base directory.
///
/// The existence check and directory creation are not atomic: two writers
/// racing on the same task name within one millisecond can land in the same
/// folder.
#[derive(Debug, Clone)]
pub struct ProjectWriter {
    /// Directory where project folders are created
    base_dir: PathBuf,
}

impl ProjectWriter {
    /// Create a writer rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Base directory for new projects.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Extract files from `markdown` and write them as a project named after `task`.
    ///
    /// Fails with [`ScaffoldrError::ExtractionEmpty`] before touching the
    /// filesystem when the markdown yields no files.
    pub fn materialize(&self, task: &str, markdown: &str) -> Result<ProjectHandle> {
        let artifacts = extract_artifacts(markdown);
        self.write_project(task, &artifacts)
    }

    /// Write already-resolved artifacts as a project named after `task`.
    ///
    /// A failed write aborts the remaining writes; files already written stay
    /// on disk.
    pub fn write_project(&self, task: &str, artifacts: &[FileArtifact]) -> Result<ProjectHandle> {
        if artifacts.is_empty() {
            return Err(ScaffoldrError::ExtractionEmpty);
        }

        let (folder_name, root) = self.allocate(task)?;
        fs::create_dir_all(&root).map_err(|source| ScaffoldrError::DirectoryCreateFailed {
            path: root.clone(),
            source,
        })?;
        info!("Writing {} files to {}", artifacts.len(), root.display());

        let mut created_files: Vec<String> = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            write_artifact(&root, artifact)?;
            if !created_files.contains(&artifact.relative_path) {
                created_files.push(artifact.relative_path.clone());
            }
        }

        Ok(ProjectHandle {
            root,
            folder_name,
            created_files,
        })
    }

    /// Pick the folder name and absolute root for `task`.
    ///
    /// An existing folder of the same name gets a `_<epoch_ms>` suffix.
    pub fn allocate(&self, task: &str) -> Result<(String, PathBuf)> {
        let base = std::path::absolute(&self.base_dir).map_err(|source| ScaffoldrError::DirectoryCreateFailed {
            path: self.base_dir.clone(),
            source,
        })?;

        let mut folder_name = sanitize_folder_name(task);
        if base.join(&folder_name).exists() {
            let unique = disambiguate(&folder_name);
            debug!("{} already exists, using {}", folder_name, unique);
            folder_name = unique;
        }

        let root = base.join(&folder_name);
        Ok((folder_name, root))
    }
}

/// Derive a folder name from a task description.
///
/// Keeps `[A-Za-z0-9 _-]`, trims, joins whitespace runs with `_` and caps the
/// length. Sanitizing an already sanitized name is a no-op.
pub fn sanitize_folder_name(task: &str) -> String {
    let kept: String = task
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();

    let name: String = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_FOLDER_NAME_LEN)
        .collect();

    if name.is_empty() {
        DEFAULT_FOLDER_NAME.to_string()
    } else {
        name
    }
}

fn write_artifact(root: &Path, artifact: &FileArtifact) -> Result<()> {
    let relative = Path::new(&artifact.relative_path);
    let escapes = relative
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(ScaffoldrError::PathEscapesProject(artifact.relative_path.clone()));
    }

    let full_path = root.join(relative);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).map_err(|source| ScaffoldrError::DirectoryCreateFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&full_path, &artifact.content).map_err(|source| ScaffoldrError::FileWriteFailed {
        path: artifact.relative_path.clone(),
        source,
    })?;

    debug!("Wrote {} bytes to {}", artifact.content.len(), artifact.relative_path);
    Ok(())
}
