//! # oxide-codegen-core
//!
//! Data-access code generation from relational schema metadata.
//!
//! Given the tables of a database, this crate writes one record type and a
//! fixed set of eleven accessors per table (insert, upsert, update, delete,
//! the select variants, search and two pagination styles) in a target
//! language. It does no I/O: metadata comes in through a
//! [`MetadataProvider`](schema::MetadataProvider) and source text comes out.
//!
//! # Architecture
//!
//! - **Schema** - [`TableMetadata`](schema::TableMetadata) and
//!   [`Column`](schema::Column), read-only after construction
//! - **Query** - one SQL template per operation, per dialect
//! - **Weaver** - typed target-language fragments, validated up front
//! - **Typemap** - dialect type names to target-language type names
//! - **Emitter** - combines the above into source text
//! - **Pipeline** - selects the strategies for an engine/language pair
//!
//! # Example
//!
//! ```rust
//! use oxide_codegen_core::prelude::*;
//!
//! let pipeline = Pipeline::resolve(DatabaseEngine::Postgres, TargetLanguage::CSharp)?;
//! let provider = StaticMetadata::new(vec![TableMetadata::new(
//!     DatabaseEngine::Postgres,
//!     "users",
//!     vec![Column::new("id", "integer"), Column::new("email", "text")],
//!     vec!["id".to_string()],
//! )]);
//!
//! let generated = pipeline.generate(&provider, &mut ())?;
//! assert!(generated.code.contains("public class Users"));
//! assert!(generated.code.contains("InsertUsers(Users entity)"));
//! # Ok::<(), oxide_codegen_core::error::GenerateError>(())
//! ```

pub mod emitter;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod query;
pub mod schema;
pub mod typemap;
pub mod weaver;

pub use error::{ConfigError, GenerateError};
pub use pipeline::Pipeline;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::emitter::{
        CSharpEmitter, CodeEmitter, Diagnostic, DiagnosticKind, EmitContext, EmitObserver,
        Generated,
    };
    pub use crate::error::{ConfigError, GenerateError};
    pub use crate::pipeline::Pipeline;
    pub use crate::query::{PostgresQueryGenerator, QueryGenerator, QueryOperation};
    pub use crate::schema::{Column, DatabaseEngine, MetadataProvider, StaticMetadata, TableMetadata};
    pub use crate::typemap::{CSharpTypeMapper, TypeMapper};
    pub use crate::weaver::{
        CSharpWeaver, Fragment, FragmentKind, FragmentSet, NamingRule, TargetLanguage, Weaver,
    };
}
