//! Error types for pipeline configuration and generation.
//!
//! Configuration problems are fatal and surface before any table is
//! processed. Tables without a primary key and unknown column types are
//! not errors: the first is reported as a [`Diagnostic`](crate::emitter::Diagnostic),
//! the second falls back to the target language's text type.

use crate::schema::DatabaseEngine;
use crate::weaver::{FragmentKind, TargetLanguage};

/// Errors raised while selecting the strategies for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No query generator exists for the database engine.
    #[error("Database engine '{0}' is not supported for query generation")]
    UnsupportedEngine(DatabaseEngine),

    /// A weaver could not resolve one of its fragments.
    #[error("{language} weaver for '{engine}' does not provide a {kind} fragment")]
    MissingFragment {
        /// Target language of the weaver.
        language: TargetLanguage,
        /// Database engine of the weaver.
        engine: DatabaseEngine,
        /// The fragment kind that could not be resolved.
        kind: FragmentKind,
    },

    /// A table was described for a different engine than the run's.
    #[error("Table '{table}' belongs to engine '{found}', but the run targets '{expected}'")]
    EngineMismatch {
        /// Name of the offending table.
        table: String,
        /// Engine selected for the run.
        expected: DatabaseEngine,
        /// Engine recorded on the table.
        found: DatabaseEngine,
    },

    /// A dialect name could not be parsed.
    #[error("Unknown database engine: '{0}'")]
    UnknownEngine(String),

    /// A target language name could not be parsed.
    #[error("Unknown target language: '{0}'")]
    UnknownLanguage(String),
}

/// Errors raised by [`Pipeline::generate`](crate::pipeline::Pipeline::generate).
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The run is misconfigured for the supplied metadata.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The metadata provider failed to list tables.
    #[error("Metadata provider failed: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;
