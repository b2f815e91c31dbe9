//! Table and column metadata.
//!
//! These types describe the tables a generation run works from. They are
//! built once by a [`MetadataProvider`] and never mutated afterwards; every
//! other component reads them through shared references.

mod provider;

pub use provider::{MetadataProvider, StaticMetadata};

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Database engines a schema can be described for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseEngine {
    /// PostgreSQL.
    Postgres,
    /// MySQL.
    MySql,
    /// MariaDB.
    MariaDb,
    /// Apache Cassandra.
    Cassandra,
    /// Microsoft SQL Server.
    SqlServer,
    /// Oracle Database.
    Oracle,
    /// SQLite.
    Sqlite,
}

impl DatabaseEngine {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::Cassandra => "cassandra",
            Self::SqlServer => "sqlserver",
            Self::Oracle => "oracle",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatabaseEngine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" => Ok(Self::MySql),
            "mariadb" | "maria" => Ok(Self::MariaDb),
            "cassandra" => Ok(Self::Cassandra),
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "oracle" => Ok(Self::Oracle),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(ConfigError::UnknownEngine(s.to_string())),
        }
    }
}

/// A column and its dialect-native type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
    data_type: String,
}

impl Column {
    /// Creates a column. `data_type` is kept exactly as the dialect reports it.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    /// Column name as it appears in the database.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dialect-native type name, untranslated.
    #[must_use]
    pub fn data_type(&self) -> &str {
        &self.data_type
    }
}

/// Metadata for one table.
///
/// `primary_key` keeps the order the provider reported it in. Statements
/// that compare key columns for equality follow that order; column lists
/// and range predicates follow [`columns`](Self::columns) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMetadata {
    engine: DatabaseEngine,
    name: String,
    columns: Vec<Column>,
    primary_key: Vec<String>,
}

impl TableMetadata {
    /// Creates table metadata. Repeated primary-key names are dropped,
    /// keeping the first occurrence.
    ///
    /// Every primary-key name is expected to exist in `columns`; this is not
    /// checked here (see [`missing_key_columns`](Self::missing_key_columns)).
    #[must_use]
    pub fn new(
        engine: DatabaseEngine,
        name: impl Into<String>,
        columns: Vec<Column>,
        primary_key: Vec<String>,
    ) -> Self {
        let mut unique_key: Vec<String> = Vec::with_capacity(primary_key.len());
        for key in primary_key {
            if !unique_key.contains(&key) {
                unique_key.push(key);
            }
        }
        Self {
            engine,
            name: name.into(),
            columns,
            primary_key: unique_key,
        }
    }

    /// Engine the table was read from.
    #[must_use]
    pub const fn engine(&self) -> DatabaseEngine {
        self.engine
    }

    /// Raw table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Primary-key column names in provider order.
    #[must_use]
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    /// Returns whether the table has at least one primary-key column.
    #[must_use]
    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }

    /// Returns whether `column` is part of the primary key.
    #[must_use]
    pub fn is_key_column(&self, column: &str) -> bool {
        self.primary_key.iter().any(|k| k == column)
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary-key columns, in `columns` order.
    #[must_use]
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| self.is_key_column(&c.name))
            .collect()
    }

    /// Columns outside the primary key, in `columns` order.
    #[must_use]
    pub fn non_key_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| !self.is_key_column(&c.name))
            .collect()
    }

    /// Primary-key names that do not match any column.
    #[must_use]
    pub fn missing_key_columns(&self) -> Vec<&str> {
        self.primary_key
            .iter()
            .filter(|k| self.column(k).is_none())
            .map(String::as_str)
            .collect()
    }
}
