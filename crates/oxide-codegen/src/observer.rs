//! Progress logging for generation runs.

use tracing::{info, warn};

use oxide_codegen_core::emitter::{Diagnostic, EmitObserver};
use oxide_codegen_core::schema::TableMetadata;

/// Logs every table and skip through `tracing`, and counts them.
#[derive(Debug, Default)]
pub struct TracingObserver {
    tables: usize,
    skipped: usize,
}

impl TracingObserver {
    /// Creates an observer with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables seen.
    pub const fn tables(&self) -> usize {
        self.tables
    }

    /// Number of tables skipped.
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

impl EmitObserver for TracingObserver {
    fn on_table(&mut self, table: &TableMetadata) {
        self.tables += 1;
        info!(
            table = table.name(),
            columns = table.columns().len(),
            "Generating code for table"
        );
    }

    fn on_skip(&mut self, diagnostic: &Diagnostic) {
        self.skipped += 1;
        warn!(table = %diagnostic.table, "{diagnostic}");
    }
}
