//! Dialect-specific query templates.
//!
//! A [`QueryGenerator`] turns one table into the SQL text for each of the
//! eleven [`QueryOperation`]s. Statements are templates: every value is a
//! named `@placeholder` and binding them is left to the emitted code.

mod postgres;

pub use postgres::PostgresQueryGenerator;

use std::fmt;

use crate::schema::{DatabaseEngine, TableMetadata};

/// The data-access operations generated for every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOperation {
    /// Insert one row and return it.
    Insert,
    /// Insert one row, or update the non-key columns on key conflict.
    Upsert,
    /// Update the non-key columns of the row matching the key.
    Update,
    /// Delete the rows matching the key.
    Delete,
    /// Select every row.
    SelectAll,
    /// Select the row matching the key.
    SelectById,
    /// Select rows whose key columns fall within inclusive ranges.
    SelectByIdRange,
    /// Select rows whose key columns appear in an id list.
    SelectByIdList,
    /// Case-insensitive pattern search across every column.
    Search,
    /// Page through rows with `OFFSET`/`LIMIT`.
    PagedOffsetLimit,
    /// Page through rows with a `ROW_NUMBER()` window ordered by the key.
    PagedWindowed,
}

impl QueryOperation {
    /// All operations, in emission order.
    pub const ALL: [Self; 11] = [
        Self::Insert,
        Self::Upsert,
        Self::Update,
        Self::Delete,
        Self::SelectAll,
        Self::SelectById,
        Self::SelectByIdRange,
        Self::SelectByIdList,
        Self::Search,
        Self::PagedOffsetLimit,
        Self::PagedWindowed,
    ];

    /// Returns the operation name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Upsert => "upsert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::SelectAll => "select_all",
            Self::SelectById => "select_by_id",
            Self::SelectByIdRange => "select_by_id_range",
            Self::SelectByIdList => "select_by_id_list",
            Self::Search => "search",
            Self::PagedOffsetLimit => "paged_offset_limit",
            Self::PagedWindowed => "paged_windowed",
        }
    }

    /// Returns whether the generated accessor yields at most one record.
    #[must_use]
    pub const fn is_single_result(self) -> bool {
        matches!(
            self,
            Self::Insert | Self::Upsert | Self::Update | Self::SelectById
        )
    }
}

impl fmt::Display for QueryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Produces SQL templates for one database dialect.
///
/// Callers only pass tables with a non-empty primary key; implementations
/// may assume it.
pub trait QueryGenerator {
    /// Returns the generator name.
    fn name(&self) -> &'static str;

    /// Returns the engine whose syntax this generator emits.
    fn engine(&self) -> DatabaseEngine;

    /// Generates SQL for an operation.
    fn generate(&self, operation: QueryOperation, table: &TableMetadata) -> String {
        match operation {
            QueryOperation::Insert => self.insert(table),
            QueryOperation::Upsert => self.upsert(table),
            QueryOperation::Update => self.update(table),
            QueryOperation::Delete => self.delete(table),
            QueryOperation::SelectAll => self.select_all(table),
            QueryOperation::SelectById => self.select_by_id(table),
            QueryOperation::SelectByIdRange => self.select_by_id_range(table),
            QueryOperation::SelectByIdList => self.select_by_id_list(table),
            QueryOperation::Search => self.search(table),
            QueryOperation::PagedOffsetLimit => self.paged_offset_limit(table),
            QueryOperation::PagedWindowed => self.paged_windowed(table),
        }
    }

    /// Generates SQL for INSERT ... RETURNING.
    fn insert(&self, table: &TableMetadata) -> String;

    /// Generates SQL for an insert-or-update.
    fn upsert(&self, table: &TableMetadata) -> String;

    /// Generates SQL for UPDATE by key.
    fn update(&self, table: &TableMetadata) -> String;

    /// Generates SQL for DELETE by key.
    fn delete(&self, table: &TableMetadata) -> String;

    /// Generates SQL selecting every row.
    fn select_all(&self, table: &TableMetadata) -> String;

    /// Generates SQL selecting by key.
    fn select_by_id(&self, table: &TableMetadata) -> String;

    /// Generates SQL selecting a key range.
    fn select_by_id_range(&self, table: &TableMetadata) -> String;

    /// Generates SQL selecting a list of keys.
    fn select_by_id_list(&self, table: &TableMetadata) -> String;

    /// Generates SQL searching every column.
    fn search(&self, table: &TableMetadata) -> String;

    /// Generates SQL for offset/limit paging.
    fn paged_offset_limit(&self, table: &TableMetadata) -> String;

    /// Generates SQL for window-function paging.
    fn paged_windowed(&self, table: &TableMetadata) -> String;
}

/// Comma-joined column names in declaration order.
pub(crate) fn column_list(table: &TableMetadata) -> String {
    table
        .columns()
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-joined `@name` placeholders in declaration order.
pub(crate) fn placeholder_list(table: &TableMetadata) -> String {
    table
        .columns()
        .iter()
        .map(|c| format!("@{}", c.name()))
        .collect::<Vec<_>>()
        .join(", ")
}
