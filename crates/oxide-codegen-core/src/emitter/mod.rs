//! Data-access code emission.
//!
//! A [`CodeEmitter`] combines the query templates, the weaver fragments and
//! the type mapping into source text. For every table with a primary key it
//! writes one record type and one accessor per [`QueryOperation`], in
//! [`QueryOperation::ALL`] order. Tables without a primary key are skipped
//! and reported as a [`Diagnostic`].
//!
//! Emission is a pure, order-preserving fold over the input tables: the same
//! tables always produce the same text.
//!
//! [`QueryOperation`]: crate::query::QueryOperation
//! [`QueryOperation::ALL`]: crate::query::QueryOperation::ALL

mod csharp;

pub use csharp::CSharpEmitter;

use std::fmt;

use crate::query::QueryGenerator;
use crate::schema::TableMetadata;
use crate::typemap::TypeMapper;
use crate::weaver::{TargetLanguage, Weaver};

/// Why a table produced no code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The table has no primary-key column.
    MissingPrimaryKey,
}

/// A per-table note raised during emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Raw name of the table.
    pub table: String,
    /// What happened.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Diagnostic for a table skipped because it has no primary key.
    #[must_use]
    pub fn missing_primary_key(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            kind: DiagnosticKind::MissingPrimaryKey,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::MissingPrimaryKey => write!(
                f,
                "table '{}' has no primary key; code not generated",
                self.table
            ),
        }
    }
}

/// Receives progress callbacks during emission.
///
/// Both methods default to doing nothing. `()` is the no-op observer.
pub trait EmitObserver {
    /// Called for every table, before it is emitted or skipped.
    fn on_table(&mut self, _table: &TableMetadata) {}

    /// Called when a table is skipped.
    fn on_skip(&mut self, _diagnostic: &Diagnostic) {}
}

impl EmitObserver for () {}

/// The strategies selected for one run.
#[derive(Clone, Copy)]
pub struct EmitContext<'a> {
    /// SQL template generator.
    pub queries: &'a dyn QueryGenerator,
    /// Target-language fragments.
    pub weaver: &'a dyn Weaver,
    /// Column type translation.
    pub types: &'a dyn TypeMapper,
}

impl fmt::Debug for EmitContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitContext")
            .field("queries", &self.queries.name())
            .field("language", &self.weaver.language())
            .field("engine", &self.weaver.engine())
            .finish()
    }
}

/// Output of one emission run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    /// The generated source text.
    pub code: String,
    /// One entry per skipped table, in input order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of tables that produced code.
    pub tables_emitted: usize,
}

/// Writes data-access code in one target language.
pub trait CodeEmitter {
    /// Language this emitter writes.
    fn language(&self) -> TargetLanguage;

    /// Emits the record type and accessors for one table, without a trailing
    /// newline. `table` always has a non-empty primary key.
    fn emit_table(&self, table: &TableMetadata, ctx: &EmitContext<'_>) -> String;

    /// Emits every table in order, skipping tables without a primary key.
    ///
    /// Table outputs are separated by one blank line; the text ends with a
    /// newline unless it is empty.
    fn emit(
        &self,
        tables: &[TableMetadata],
        ctx: &EmitContext<'_>,
        observer: &mut dyn EmitObserver,
    ) -> Generated {
        let mut chunks = Vec::with_capacity(tables.len());
        let mut diagnostics = Vec::new();

        for table in tables {
            observer.on_table(table);
            if !table.has_primary_key() {
                let diagnostic = Diagnostic::missing_primary_key(table.name());
                observer.on_skip(&diagnostic);
                diagnostics.push(diagnostic);
                continue;
            }
            chunks.push(self.emit_table(table, ctx));
        }

        let tables_emitted = chunks.len();
        let mut code = chunks.join("\n\n");
        if !code.is_empty() {
            code.push('\n');
        }

        Generated {
            code,
            diagnostics,
            tables_emitted,
        }
    }
}
