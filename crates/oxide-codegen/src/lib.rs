//! Generate data-access code from a PostgreSQL schema.
//!
//! `oxide-codegen` connects the [`oxide_codegen_core`] pipeline to the
//! outside world:
//!
//! - **Introspect** - reads tables, columns and primary keys from a live
//!   PostgreSQL database with `sqlx`
//! - **Fixture** - reads the same metadata from a JSON schema file
//! - **Observer** - logs per-table progress through `tracing`
//! - **Output** - writes the generated code to a file or stdout
//!
//! # CLI Usage
//!
//! ```bash
//! # Generate C# for every table of the public schema
//! oxide-codegen --database postgres://localhost/app generate --output Dal.cs
//!
//! # Generate from a schema file, no database needed
//! oxide-codegen generate --from-json schema.json
//!
//! # Print the SQL templates for one table
//! oxide-codegen sql --from-json schema.json --table users
//!
//! # List tables and whether code will be generated for them
//! oxide-codegen tables
//!
//! # Show the result columns of a query
//! oxide-codegen describe-query "SELECT id, email FROM users"
//! ```

pub mod error;
pub mod fixture;
pub mod introspect;
pub mod observer;
pub mod output;
pub mod source;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CodegenError, Result};
    pub use crate::fixture::SchemaFile;
    pub use crate::introspect::{PostgresIntrospector, DEFAULT_SCHEMA};
    pub use crate::observer::TracingObserver;
    pub use crate::output::write_output;
    pub use crate::source::MetadataSource;
    pub use oxide_codegen_core::prelude::*;
}
