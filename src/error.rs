//! Error types for Scaffoldr
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur in Scaffoldr
#[derive(Debug, Error)]
pub enum ScaffoldrError {
    /// The markdown produced no files at all
    #[error("No files found in generated output")]
    ExtractionEmpty,

    /// Project or parent directory could not be created
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a single file failed; remaining writes were aborted
    #[error("Failed to write {path}: {source}")]
    FileWriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Resolved path would land outside the project root
    #[error("Path escapes project directory: {0}")]
    PathEscapesProject(String),

    /// A directory could not be listed while rendering a tree
    #[error("Failed to read directory {}: {message}", path.display())]
    TreeReadFailed { path: PathBuf, message: String },

    /// Invalid state transition or operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Prompt template error
    #[error("Template error: {0}")]
    Template(String),

    /// LLM API error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Scaffoldr operations
pub type Result<T> = std::result::Result<T, ScaffoldrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_empty_error() {
        let err = ScaffoldrError::ExtractionEmpty;
        assert_eq!(err.to_string(), "No files found in generated output");
    }

    #[test]
    fn test_directory_create_failed_names_path() {
        let err = ScaffoldrError::DirectoryCreateFailed {
            path: PathBuf::from("/tmp/out/app"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to create directory /tmp/out/app: denied");
    }

    #[test]
    fn test_file_write_failed_names_relative_path() {
        let err = ScaffoldrError::FileWriteFailed {
            path: "src/app.js".to_string(),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(err.to_string(), "Failed to write src/app.js: disk full");
    }

    #[test]
    fn test_path_escapes_project_error() {
        let err = ScaffoldrError::PathEscapesProject("../etc/passwd".to_string());
        assert_eq!(err.to_string(), "Path escapes project directory: ../etc/passwd");
    }

    #[test]
    fn test_llm_error() {
        let err = ScaffoldrError::Llm("rate limited".to_string());
        assert_eq!(err.to_string(), "LLM error: rate limited");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ScaffoldrError = io_err.into();
        assert!(matches!(err, ScaffoldrError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ScaffoldrError = json_err.into();
        assert!(matches!(err, ScaffoldrError::Json(_)));
    }
}
