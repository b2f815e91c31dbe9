//! Strategy resolution and the generation run.
//!
//! A [`Pipeline`] holds the query generator, weaver, type mapper and emitter
//! for one engine/language pair. All four are chosen in
//! [`Pipeline::resolve`], so an unsupported pair fails before any metadata
//! is read.

use std::fmt;

use crate::emitter::{CSharpEmitter, CodeEmitter, EmitContext, EmitObserver, Generated};
use crate::error::{ConfigError, GenerateError};
use crate::query::{PostgresQueryGenerator, QueryGenerator, QueryOperation};
use crate::schema::{DatabaseEngine, MetadataProvider, TableMetadata};
use crate::typemap::{CSharpTypeMapper, TypeMapper};
use crate::weaver::{CSharpWeaver, TargetLanguage, Weaver};

/// The strategies for one engine/language pair.
pub struct Pipeline {
    engine: DatabaseEngine,
    language: TargetLanguage,
    queries: Box<dyn QueryGenerator>,
    weaver: Box<dyn Weaver>,
    types: Box<dyn TypeMapper>,
    emitter: Box<dyn CodeEmitter>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("engine", &self.engine)
            .field("language", &self.language)
            .field("queries", &self.queries.name())
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Selects every strategy for `engine` and `language`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedEngine`] when no query generator
    /// exists for `engine`, or a weaver error when `language` has no
    /// fragments for it.
    pub fn resolve(engine: DatabaseEngine, language: TargetLanguage) -> Result<Self, ConfigError> {
        let queries: Box<dyn QueryGenerator> = match engine {
            DatabaseEngine::Postgres => Box::new(PostgresQueryGenerator::new()),
            other => return Err(ConfigError::UnsupportedEngine(other)),
        };

        let (weaver, types, emitter): (Box<dyn Weaver>, Box<dyn TypeMapper>, Box<dyn CodeEmitter>) =
            match language {
                TargetLanguage::CSharp => (
                    Box::new(CSharpWeaver::new(engine)?),
                    Box::new(CSharpTypeMapper::new()),
                    Box::new(CSharpEmitter::new()),
                ),
            };

        Ok(Self {
            engine,
            language,
            queries,
            weaver,
            types,
            emitter,
        })
    }

    /// Engine this pipeline targets.
    #[must_use]
    pub const fn engine(&self) -> DatabaseEngine {
        self.engine
    }

    /// Language this pipeline writes.
    #[must_use]
    pub const fn language(&self) -> TargetLanguage {
        self.language
    }

    /// The selected query generator.
    #[must_use]
    pub fn queries(&self) -> &dyn QueryGenerator {
        self.queries.as_ref()
    }

    /// The selected weaver.
    #[must_use]
    pub fn weaver(&self) -> &dyn Weaver {
        self.weaver.as_ref()
    }

    /// The selected type mapper.
    #[must_use]
    pub fn types(&self) -> &dyn TypeMapper {
        self.types.as_ref()
    }

    fn context(&self) -> EmitContext<'_> {
        EmitContext {
            queries: self.queries.as_ref(),
            weaver: self.weaver.as_ref(),
            types: self.types.as_ref(),
        }
    }

    /// Checks that every table was described for this pipeline's engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EngineMismatch`] for the first offending table.
    pub fn check_engines(&self, tables: &[TableMetadata]) -> Result<(), ConfigError> {
        match tables.iter().find(|t| t.engine() != self.engine) {
            Some(table) => Err(ConfigError::EngineMismatch {
                table: table.name().to_string(),
                expected: self.engine,
                found: table.engine(),
            }),
            None => Ok(()),
        }
    }

    /// Emits code for already-loaded tables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EngineMismatch`] if any table belongs to
    /// another engine. Nothing is emitted in that case.
    pub fn emit(
        &self,
        tables: &[TableMetadata],
        observer: &mut dyn EmitObserver,
    ) -> Result<Generated, ConfigError> {
        self.check_engines(tables)?;
        Ok(self.emitter.emit(tables, &self.context(), observer))
    }

    /// Lists tables from `provider` and emits code for them.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Provider`] if listing fails, or
    /// [`GenerateError::Config`] on an engine mismatch.
    pub fn generate<P: MetadataProvider>(
        &self,
        provider: &P,
        observer: &mut dyn EmitObserver,
    ) -> Result<Generated, GenerateError> {
        let tables = provider
            .list_tables()
            .map_err(|e| GenerateError::Provider(Box::new(e)))?;
        Ok(self.emit(&tables, observer)?)
    }

    /// Renders every statement for `table`, in [`QueryOperation::ALL`] order.
    #[must_use]
    pub fn render_sql(&self, table: &TableMetadata) -> Vec<(QueryOperation, String)> {
        QueryOperation::ALL
            .into_iter()
            .map(|op| (op, self.queries.generate(op, table)))
            .collect()
    }
}
