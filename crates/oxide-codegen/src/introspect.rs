//! PostgreSQL schema introspection.
//!
//! Reads table names, columns and primary keys from `information_schema` and
//! the `pg_index` catalog. Column types are kept exactly as PostgreSQL
//! reports them (`integer`, `character varying`, ...); translating them is
//! the type mapper's job.

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Column as _, Executor, Statement, TypeInfo};
use tracing::{debug, warn};

use oxide_codegen_core::schema::{Column, DatabaseEngine, StaticMetadata, TableMetadata};

use crate::error::{CodegenError, Result};

/// Schema searched when none is given.
pub const DEFAULT_SCHEMA: &str = "public";

const LIST_TABLES_SQL: &str = "\
SELECT table_name::text
FROM information_schema.tables
WHERE table_schema = $1 AND table_type = 'BASE TABLE'
ORDER BY table_name";

const LIST_COLUMNS_SQL: &str = "\
SELECT column_name::text, data_type::text
FROM information_schema.columns
WHERE table_schema = $1 AND table_name = $2
ORDER BY ordinal_position";

const PRIMARY_KEY_SQL: &str = "\
SELECT a.attname::text
FROM pg_index i
JOIN pg_attribute a ON a.attrelid = i.indrelid AND a.attnum = ANY(i.indkey)
WHERE i.indrelid = (quote_ident($1) || '.' || quote_ident($2))::regclass
  AND i.indisprimary
ORDER BY array_position(i.indkey::int2[], a.attnum)";

/// Returns an error unless `url` is a PostgreSQL connection string.
///
/// # Errors
///
/// Returns [`CodegenError::UnsupportedUrl`] for any other scheme.
pub fn check_url(url: &str) -> Result<()> {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(())
    } else {
        Err(CodegenError::UnsupportedUrl(url.to_string()))
    }
}

/// Reads table metadata from a live PostgreSQL database.
pub struct PostgresIntrospector {
    pool: PgPool,
    schema: String,
}

impl PostgresIntrospector {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    /// Connects to `url` and introspects `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::UnsupportedUrl`] for non-PostgreSQL URLs, or
    /// a database error if the connection fails.
    pub async fn connect(url: &str, schema: impl Into<String>) -> Result<Self> {
        check_url(url)?;
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        Ok(Self::new(pool, schema))
    }

    /// Schema being introspected.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Returns the base tables of the schema, ordered by name.
    pub async fn list_table_names(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(LIST_TABLES_SQL)
            .bind(&self.schema)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Returns the columns of `table` in declaration order.
    pub async fn columns(&self, table: &str) -> Result<Vec<Column>> {
        let rows: Vec<(String, String)> = sqlx::query_as(LIST_COLUMNS_SQL)
            .bind(&self.schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(name, data_type)| Column::new(name, data_type))
            .collect())
    }

    /// Returns the primary-key columns of `table` in key order.
    pub async fn primary_key(&self, table: &str) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(PRIMARY_KEY_SQL)
            .bind(&self.schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Loads one table.
    pub async fn load_table(&self, table: &str) -> Result<TableMetadata> {
        let columns = self.columns(table).await?;
        let primary_key = self.primary_key(table).await?;
        debug!(
            table,
            columns = columns.len(),
            key = ?primary_key,
            "Introspected table"
        );
        let metadata = TableMetadata::new(DatabaseEngine::Postgres, table, columns, primary_key);
        for missing in metadata.missing_key_columns() {
            warn!(table, column = %missing, "Primary-key column not found among columns");
        }
        Ok(metadata)
    }

    /// Loads every table of the schema, ordered by name.
    pub async fn load_tables(&self) -> Result<Vec<TableMetadata>> {
        let names = self.list_table_names().await?;
        let mut tables = Vec::with_capacity(names.len());
        for name in &names {
            tables.push(self.load_table(name).await?);
        }
        Ok(tables)
    }

    /// Loads every table into an in-memory provider.
    pub async fn snapshot(&self) -> Result<StaticMetadata> {
        Ok(StaticMetadata::new(self.load_tables().await?))
    }

    /// Describes the result columns of `sql` without executing it.
    ///
    /// The statement is prepared on the server, so it must be valid for the
    /// current schema.
    pub async fn describe_query(&self, sql: &str) -> Result<Vec<Column>> {
        let statement = (&self.pool).prepare(sql).await?;
        Ok(statement
            .columns()
            .iter()
            .map(|c| Column::new(c.name(), c.type_info().name()))
            .collect())
    }
}
