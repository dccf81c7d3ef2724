//! Error types for definition loading.

use thiserror::Error;

/// Errors that can occur when loading enemy or boss definitions.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Directory or file could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A definition the caller requires is not in the registry.
    #[error("Unknown definition '{0}'")]
    UnknownDefinition(String),
}
