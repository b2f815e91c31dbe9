//! JSON schema files.
//!
//! A schema file describes tables without a database connection:
//!
//! ```json
//! {
//!   "engine": "postgres",
//!   "tables": [
//!     {
//!       "name": "users",
//!       "columns": [
//!         { "name": "id", "data_type": "integer" },
//!         { "name": "email", "data_type": "text" }
//!       ],
//!       "primary_key": ["id"]
//!     }
//!   ]
//! }
//! ```
//!
//! `engine` defaults to `postgres` and `primary_key` to an empty list.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use oxide_codegen_core::schema::{Column, DatabaseEngine, StaticMetadata, TableMetadata};

use crate::error::{CodegenError, Result};

/// A column entry in a schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFile {
    /// Column name.
    pub name: String,
    /// Dialect-native type name.
    pub data_type: String,
}

/// A table entry in a schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFile {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnFile>,
    /// Primary-key column names in key order.
    #[serde(default)]
    pub primary_key: Vec<String>,
}

/// Top-level schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Engine name, parsed with [`DatabaseEngine`]'s `FromStr`.
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Tables in emission order.
    pub tables: Vec<TableFile>,
}

fn default_engine() -> String {
    DatabaseEngine::Postgres.name().to_string()
}

impl SchemaFile {
    /// Parses a schema file from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a schema file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`CodegenError::SchemaFile`] if it is not a valid schema file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|source| CodegenError::SchemaFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Converts the file into table metadata.
    ///
    /// Primary-key names that match no column are kept and logged.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `engine` is not a known engine.
    pub fn into_tables(self) -> Result<Vec<TableMetadata>> {
        let engine: DatabaseEngine = self.engine.parse()?;
        let tables = self
            .tables
            .into_iter()
            .map(|table| {
                let columns = table
                    .columns
                    .into_iter()
                    .map(|c| Column::new(c.name, c.data_type))
                    .collect();
                TableMetadata::new(engine, table.name, columns, table.primary_key)
            })
            .collect::<Vec<_>>();

        for table in &tables {
            for missing in table.missing_key_columns() {
                warn!(
                    table = table.name(),
                    column = missing,
                    "Primary-key column not found among columns"
                );
            }
        }

        Ok(tables)
    }
}

/// Loads `path` into an in-memory metadata provider.
///
/// # Errors
///
/// See [`SchemaFile::load`] and [`SchemaFile::into_tables`].
pub fn load(path: &Path) -> Result<StaticMetadata> {
    Ok(StaticMetadata::new(SchemaFile::load(path)?.into_tables()?))
}
