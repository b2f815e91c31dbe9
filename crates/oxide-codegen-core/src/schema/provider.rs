//! Metadata provider trait.
//!
//! Driver crates implement [`MetadataProvider`] to list the tables of a
//! live database. The core crate only defines the trait and an in-memory
//! implementation so it stays driver-agnostic.

use std::convert::Infallible;

use super::TableMetadata;

/// Lists the tables a generation run works from.
pub trait MetadataProvider {
    /// Error type for listing failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns every table, in the order code should be emitted.
    fn list_tables(&self) -> Result<Vec<TableMetadata>, Self::Error>;
}

/// A provider over tables that are already in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticMetadata {
    tables: Vec<TableMetadata>,
}

impl StaticMetadata {
    /// Creates a provider that yields `tables` in the given order.
    #[must_use]
    pub fn new(tables: Vec<TableMetadata>) -> Self {
        Self { tables }
    }

    /// Returns the wrapped tables.
    #[must_use]
    pub fn tables(&self) -> &[TableMetadata] {
        &self.tables
    }
}

impl From<Vec<TableMetadata>> for StaticMetadata {
    fn from(tables: Vec<TableMetadata>) -> Self {
        Self::new(tables)
    }
}

impl MetadataProvider for StaticMetadata {
    type Error = Infallible;

    fn list_tables(&self) -> Result<Vec<TableMetadata>, Self::Error> {
        Ok(self.tables.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, DatabaseEngine};

    #[test]
    fn test_static_metadata_preserves_order() {
        let provider = StaticMetadata::new(vec![
            TableMetadata::new(DatabaseEngine::Postgres, "b", vec![Column::new("id", "int")], vec![]),
            TableMetadata::new(DatabaseEngine::Postgres, "a", vec![Column::new("id", "int")], vec![]),
        ]);
        let tables = provider.list_tables().unwrap();
        let names: Vec<&str> = tables.iter().map(TableMetadata::name).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
