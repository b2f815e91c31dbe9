//! C# fragments.

use super::{Fragment, FragmentKind, FragmentSet, NamingRule, TargetLanguage, Weaver};
use crate::error::ConfigError;
use crate::schema::DatabaseEngine;

/// C# weaver. PostgreSQL access goes through Npgsql.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSharpWeaver {
    engine: DatabaseEngine,
    fragments: FragmentSet,
}

impl CSharpWeaver {
    /// Builds the weaver for `engine`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFragment`] when `engine` has no C#
    /// fragments.
    pub fn new(engine: DatabaseEngine) -> Result<Self, ConfigError> {
        let fragments =
            FragmentSet::assemble(TargetLanguage::CSharp, engine, |kind| fragment(engine, kind))?;
        Ok(Self { engine, fragments })
    }
}

fn fragment(engine: DatabaseEngine, kind: FragmentKind) -> Option<Fragment> {
    match (engine, kind) {
        (DatabaseEngine::Postgres, FragmentKind::ConnectionAcquisition) => Some(
            Fragment::ConnectionAcquisition(
                "using var conn = await _dbConnectionFactory.CreateConnection();",
            ),
        ),
        (DatabaseEngine::Postgres, FragmentKind::CommandConstruction) => Some(
            Fragment::CommandConstruction("using var command = new NpgsqlCommand(query, conn);"),
        ),
        (DatabaseEngine::Postgres, FragmentKind::NamingRule) => {
            Some(Fragment::NamingRule(NamingRule::UpperCamel))
        }
        (DatabaseEngine::Postgres, FragmentKind::ExceptionType) => {
            Some(Fragment::ExceptionType("NpgsqlException"))
        }
        _ => None,
    }
}

impl Weaver for CSharpWeaver {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::CSharp
    }

    fn engine(&self) -> DatabaseEngine {
        self.engine
    }

    fn fragments(&self) -> &FragmentSet {
        &self.fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, TableMetadata};

    fn weaver() -> CSharpWeaver {
        CSharpWeaver::new(DatabaseEngine::Postgres).unwrap()
    }

    #[test]
    fn test_postgres_fragments() {
        let w = weaver();
        assert_eq!(
            w.connection_fragment(),
            "using var conn = await _dbConnectionFactory.CreateConnection();"
        );
        assert_eq!(
            w.command_fragment(),
            "using var command = new NpgsqlCommand(query, conn);"
        );
        assert_eq!(w.exception_type_name(), "NpgsqlException");
        assert_eq!(w.language(), TargetLanguage::CSharp);
        assert_eq!(w.engine(), DatabaseEngine::Postgres);
    }

    #[test]
    fn test_class_and_member_names() {
        let table = TableMetadata::new(
            DatabaseEngine::Postgres,
            "order_item",
            vec![Column::new("created_at", "timestamp")],
            vec![],
        );
        let w = weaver();
        assert_eq!(w.class_name(&table), "OrderItem");
        assert_eq!(w.member_name("created_at"), "CreatedAt");
        assert_eq!(w.member_name(&w.member_name("created_at")), "CreatedAt");
    }

    #[test]
    fn test_unsupported_engine_fails_fast() {
        let err = CSharpWeaver::new(DatabaseEngine::Cassandra).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingFragment {
                language: TargetLanguage::CSharp,
                engine: DatabaseEngine::Cassandra,
                kind: FragmentKind::ConnectionAcquisition,
            }
        );
    }
}
