//! Error types for the code generator front end.

use std::path::PathBuf;

use oxide_codegen_core::{ConfigError, GenerateError};

/// Errors that can occur while loading metadata or writing output.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// Database error during introspection.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (reading schema files, writing output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A schema file could not be parsed.
    #[error("Failed to parse schema file '{path}': {source}")]
    SchemaFile {
        /// Path to the schema file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The engine/language pair or the metadata is misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Code generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// The database URL names a driver this tool cannot introspect.
    #[error("Unsupported database URL '{0}': only postgres:// and postgresql:// are supported")]
    UnsupportedUrl(String),

    /// A table named on the command line does not exist.
    #[error("Table not found: {0}")]
    TableNotFound(String),
}

/// Result type for code generator operations.
pub type Result<T> = std::result::Result<T, CodegenError>;
