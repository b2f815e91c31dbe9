//! PostgreSQL query templates.

use super::{QueryGenerator, column_list, placeholder_list};
use crate::schema::{DatabaseEngine, TableMetadata};

/// PostgreSQL query generator.
///
/// Uses `RETURNING`, `ON CONFLICT ... DO UPDATE`, `ILIKE` and `= ANY(...)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresQueryGenerator;

impl PostgresQueryGenerator {
    /// Creates a new PostgreSQL query generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// `k = @k` for each key name, in primary-key order.
    fn key_equality(table: &TableMetadata) -> String {
        table
            .primary_key()
            .iter()
            .map(|k| format!("{k} = @{k}"))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// `SET` assignments for non-key columns. A table made only of key
    /// columns assigns the keys to themselves.
    fn set_list(table: &TableMetadata) -> String {
        let non_key = table.non_key_columns();
        let targets = if non_key.is_empty() {
            table.primary_key_columns()
        } else {
            non_key
        };
        targets
            .iter()
            .map(|c| format!("{0} = @{0}", c.name()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn select_prefix(table: &TableMetadata) -> String {
        format!("SELECT {} FROM {}", column_list(table), table.name())
    }

    fn insert_prefix(table: &TableMetadata) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name(),
            column_list(table),
            placeholder_list(table)
        )
    }
}

impl QueryGenerator for PostgresQueryGenerator {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn engine(&self) -> DatabaseEngine {
        DatabaseEngine::Postgres
    }

    fn insert(&self, table: &TableMetadata) -> String {
        format!(
            "{} RETURNING {}",
            Self::insert_prefix(table),
            column_list(table)
        )
    }

    fn upsert(&self, table: &TableMetadata) -> String {
        let conflict_target = table.primary_key().join(", ");
        let non_key = table.non_key_columns();
        let action = if non_key.is_empty() {
            "DO NOTHING".to_string()
        } else {
            let assignments: Vec<String> = non_key
                .iter()
                .map(|c| format!("{0} = EXCLUDED.{0}", c.name()))
                .collect();
            format!("DO UPDATE SET {}", assignments.join(", "))
        };
        format!(
            "{} ON CONFLICT ({conflict_target}) {action} RETURNING {}",
            Self::insert_prefix(table),
            column_list(table)
        )
    }

    fn update(&self, table: &TableMetadata) -> String {
        format!(
            "UPDATE {} SET {} WHERE {} RETURNING {}",
            table.name(),
            Self::set_list(table),
            Self::key_equality(table),
            column_list(table)
        )
    }

    fn delete(&self, table: &TableMetadata) -> String {
        format!(
            "DELETE FROM {} WHERE {} RETURNING {}",
            table.name(),
            Self::key_equality(table),
            column_list(table)
        )
    }

    fn select_all(&self, table: &TableMetadata) -> String {
        Self::select_prefix(table)
    }

    fn select_by_id(&self, table: &TableMetadata) -> String {
        format!(
            "{} WHERE {}",
            Self::select_prefix(table),
            Self::key_equality(table)
        )
    }

    fn select_by_id_range(&self, table: &TableMetadata) -> String {
        let ranges: Vec<String> = table
            .primary_key_columns()
            .iter()
            .map(|c| format!("{0} BETWEEN @start_{0} AND @end_{0}", c.name()))
            .collect();
        format!("{} WHERE {}", Self::select_prefix(table), ranges.join(" AND "))
    }

    fn select_by_id_list(&self, table: &TableMetadata) -> String {
        let lists: Vec<String> = table
            .primary_key_columns()
            .iter()
            .map(|c| format!("{} = ANY(@ids)", c.name()))
            .collect();
        format!("{} WHERE {}", Self::select_prefix(table), lists.join(" AND "))
    }

    fn search(&self, table: &TableMetadata) -> String {
        let patterns: Vec<String> = table
            .columns()
            .iter()
            .map(|c| format!("{0} ILIKE @{0}", c.name()))
            .collect();
        format!("{} WHERE {}", Self::select_prefix(table), patterns.join(" OR "))
    }

    fn paged_offset_limit(&self, table: &TableMetadata) -> String {
        format!("{} OFFSET @offset LIMIT @limit", Self::select_prefix(table))
    }

    fn paged_windowed(&self, table: &TableMetadata) -> String {
        let name = table.name();
        let columns = column_list(table);
        format!(
            "WITH paginated_query_{name} AS (SELECT {columns}, ROW_NUMBER() OVER (ORDER BY {}) AS row_number FROM {name}) \
             SELECT {columns} FROM paginated_query_{name} WHERE row_number BETWEEN @offset AND @offset + @limit",
            table.primary_key().join(", ")
        )
    }
}
