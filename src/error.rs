//! Error types for the export pipeline
//!
//! Most of these never reach the caller of the public entry points: the resolver,
//! the cross-collection expander and the scope repairer recover from them locally
//! and only log. They exist so the internals can propagate with `?`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// An alias chain revisited a variable that is already being resolved
    #[error("Circular alias detected at variable '{id}'")]
    CycleDetected { id: String },

    /// An alias points at a variable id that is not part of the known set
    #[error("Variable '{id}' not found")]
    VariableNotFound { id: String },

    /// A variable refers to a collection that is not part of the known set
    #[error("Collection '{id}' not found")]
    CollectionNotFound { id: String },

    /// The generated stylesheet could not be parsed
    #[error("CSS parse error: {message}")]
    CssParse { message: String },

    /// A custom property declaration could not be constructed
    #[error("Invalid declaration '{property}': {message}")]
    InvalidDeclaration { property: String, message: String },

    /// Tree-sitter language setup errors
    #[error("Failed to set up tree-sitter language: {message}")]
    TreeSitterLanguage { message: String },

    /// IO errors (reading the export document, writing artifacts)
    #[error("IO error on {path:?}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing/serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Helper trait for converting IO errors with the path that caused them
pub trait IoContext<T> {
    fn with_path(self, path: impl Into<PathBuf>, message: &str) -> ExportResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>, message: &str) -> ExportResult<T> {
        self.map_err(|e| ExportError::Io {
            path: path.into(),
            message: message.to_string(),
            source: e,
        })
    }
}

/// Helper trait for converting JSON errors with context
pub trait JsonContext<T> {
    fn with_json_context(self, message: &str) -> ExportResult<T>;
}

impl<T> JsonContext<T> for Result<T, serde_json::Error> {
    fn with_json_context(self, message: &str) -> ExportResult<T> {
        self.map_err(|e| ExportError::Json {
            message: message.to_string(),
            source: e,
        })
    }
}
