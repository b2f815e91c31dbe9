//! Where table metadata comes from.

use std::path::PathBuf;

use tracing::info;

use oxide_codegen_core::schema::StaticMetadata;

use crate::error::Result;
use crate::fixture;
use crate::introspect::PostgresIntrospector;

/// A schema file or a live database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// A JSON schema file.
    File(PathBuf),
    /// A PostgreSQL database.
    Database {
        /// Connection URL.
        url: String,
        /// Schema to introspect.
        schema: String,
    },
}

impl MetadataSource {
    /// Picks the schema file when one is given, the database otherwise.
    pub fn new(file: Option<PathBuf>, url: &str, schema: &str) -> Self {
        match file {
            Some(path) => Self::File(path),
            None => Self::Database {
                url: url.to_string(),
                schema: schema.to_string(),
            },
        }
    }

    /// Loads every table into memory.
    ///
    /// # Errors
    ///
    /// Returns schema-file, connection or introspection errors.
    pub async fn load(&self) -> Result<StaticMetadata> {
        match self {
            Self::File(path) => {
                info!("Loading schema from {}", path.display());
                fixture::load(path)
            }
            Self::Database { url, schema } => {
                info!("Introspecting schema '{schema}'");
                PostgresIntrospector::connect(url, schema.as_str())
                    .await?
                    .snapshot()
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodegenError;

    #[test]
    fn test_file_takes_precedence() {
        let source = MetadataSource::new(
            Some(PathBuf::from("schema.json")),
            "postgres://localhost/app",
            "public",
        );
        assert_eq!(source, MetadataSource::File(PathBuf::from("schema.json")));
    }

    #[tokio::test]
    async fn test_load_rejects_non_postgres_url() {
        let source = MetadataSource::new(None, "sqlite:db.sqlite3", "public");
        assert!(matches!(
            source.load().await,
            Err(CodegenError::UnsupportedUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let source = MetadataSource::File(PathBuf::from("/nonexistent/schema.json"));
        assert!(matches!(source.load().await, Err(CodegenError::Io(_))));
    }
}
