//! Target-language syntax fragments.
//!
//! A [`Weaver`] supplies the pieces of generated code that depend on both the
//! database engine and the target language: how names are cased, how a
//! connection and a command are obtained, and which exception type carries
//! driver errors. Fragments are typed and resolved once, when the weaver is
//! built, so an incomplete engine/language pair fails before any table is
//! processed.

mod csharp;

pub use csharp::CSharpWeaver;

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::naming::{snake_to_camel, snake_to_pascal};
use crate::schema::{DatabaseEngine, TableMetadata};

/// Languages code can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    /// C# with ADO.NET-style data access.
    CSharp,
}

impl TargetLanguage {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CSharp => "csharp",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetLanguage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csharp" | "c#" | "cs" => Ok(Self::CSharp),
            _ => Err(ConfigError::UnknownLanguage(s.to_string())),
        }
    }
}

/// The kinds of fragment every weaver must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// Statement that acquires a connection.
    ConnectionAcquisition,
    /// Statement that builds a command from `query` and the connection.
    CommandConstruction,
    /// Casing rule for type and member identifiers.
    NamingRule,
    /// Exception type raised by the database driver.
    ExceptionType,
}

impl FragmentKind {
    /// Every fragment kind.
    pub const ALL: [Self; 4] = [
        Self::ConnectionAcquisition,
        Self::CommandConstruction,
        Self::NamingRule,
        Self::ExceptionType,
    ];
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ConnectionAcquisition => "connection-acquisition",
            Self::CommandConstruction => "command-construction",
            Self::NamingRule => "naming-rule",
            Self::ExceptionType => "exception-type",
        })
    }
}

/// Identifier casing applied to raw table and column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingRule {
    /// `snake_case` to `UpperCamelCase`.
    UpperCamel,
    /// `snake_case` to `lowerCamelCase`.
    LowerCamel,
    /// Names are used as-is.
    Verbatim,
}

impl NamingRule {
    /// Applies the rule. Every rule is idempotent.
    #[must_use]
    pub fn apply(self, raw: &str) -> String {
        match self {
            Self::UpperCamel => snake_to_pascal(raw),
            Self::LowerCamel => snake_to_camel(raw),
            Self::Verbatim => raw.to_string(),
        }
    }
}

/// A single fragment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// See [`FragmentKind::ConnectionAcquisition`].
    ConnectionAcquisition(&'static str),
    /// See [`FragmentKind::CommandConstruction`].
    CommandConstruction(&'static str),
    /// See [`FragmentKind::NamingRule`].
    NamingRule(NamingRule),
    /// See [`FragmentKind::ExceptionType`].
    ExceptionType(&'static str),
}

impl Fragment {
    /// Returns the kind of this fragment.
    #[must_use]
    pub const fn kind(&self) -> FragmentKind {
        match self {
            Self::ConnectionAcquisition(_) => FragmentKind::ConnectionAcquisition,
            Self::CommandConstruction(_) => FragmentKind::CommandConstruction,
            Self::NamingRule(_) => FragmentKind::NamingRule,
            Self::ExceptionType(_) => FragmentKind::ExceptionType,
        }
    }
}

/// A complete, validated set of fragments for one engine/language pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSet {
    connection: &'static str,
    command: &'static str,
    naming: NamingRule,
    exception_type: &'static str,
}

impl FragmentSet {
    /// Resolves every [`FragmentKind`] through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFragment`] for the first kind that
    /// `lookup` does not resolve, or resolves to a fragment of another kind.
    pub fn assemble<F>(
        language: TargetLanguage,
        engine: DatabaseEngine,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(FragmentKind) -> Option<Fragment>,
    {
        let missing = |kind| ConfigError::MissingFragment {
            language,
            engine,
            kind,
        };

        let Some(Fragment::ConnectionAcquisition(connection)) =
            lookup(FragmentKind::ConnectionAcquisition)
        else {
            return Err(missing(FragmentKind::ConnectionAcquisition));
        };
        let Some(Fragment::CommandConstruction(command)) = lookup(FragmentKind::CommandConstruction)
        else {
            return Err(missing(FragmentKind::CommandConstruction));
        };
        let Some(Fragment::NamingRule(naming)) = lookup(FragmentKind::NamingRule) else {
            return Err(missing(FragmentKind::NamingRule));
        };
        let Some(Fragment::ExceptionType(exception_type)) = lookup(FragmentKind::ExceptionType)
        else {
            return Err(missing(FragmentKind::ExceptionType));
        };

        Ok(Self {
            connection,
            command,
            naming,
            exception_type,
        })
    }

    /// Connection-acquisition statement.
    #[must_use]
    pub const fn connection(&self) -> &'static str {
        self.connection
    }

    /// Command-construction statement.
    #[must_use]
    pub const fn command(&self) -> &'static str {
        self.command
    }

    /// Identifier casing rule.
    #[must_use]
    pub const fn naming(&self) -> NamingRule {
        self.naming
    }

    /// Driver exception type name.
    #[must_use]
    pub const fn exception_type(&self) -> &'static str {
        self.exception_type
    }
}

/// Supplies target-language fragments for one database engine.
pub trait Weaver {
    /// Language the fragments are written in.
    fn language(&self) -> TargetLanguage;

    /// Engine the fragments target.
    fn engine(&self) -> DatabaseEngine;

    /// The validated fragment set.
    fn fragments(&self) -> &FragmentSet;

    /// Type identifier for a table.
    fn class_name(&self, table: &TableMetadata) -> String {
        self.fragments().naming().apply(table.name())
    }

    /// Field identifier for a column.
    fn member_name(&self, column: &str) -> String {
        self.fragments().naming().apply(column)
    }

    /// Statement that acquires a connection.
    fn connection_fragment(&self) -> &str {
        self.fragments().connection()
    }

    /// Statement that builds a command.
    fn command_fragment(&self) -> &str {
        self.fragments().command()
    }

    /// Exception type to catch and rethrow.
    fn exception_type_name(&self) -> &str {
        self.fragments().exception_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(kind: FragmentKind) -> Option<Fragment> {
        Some(match kind {
            FragmentKind::ConnectionAcquisition => Fragment::ConnectionAcquisition("conn"),
            FragmentKind::CommandConstruction => Fragment::CommandConstruction("cmd"),
            FragmentKind::NamingRule => Fragment::NamingRule(NamingRule::Verbatim),
            FragmentKind::ExceptionType => Fragment::ExceptionType("Error"),
        })
    }

    #[test]
    fn test_assemble_complete_set() {
        let set =
            FragmentSet::assemble(TargetLanguage::CSharp, DatabaseEngine::Postgres, complete)
                .unwrap();
        assert_eq!(set.connection(), "conn");
        assert_eq!(set.command(), "cmd");
        assert_eq!(set.naming(), NamingRule::Verbatim);
        assert_eq!(set.exception_type(), "Error");
    }

    #[test]
    fn test_assemble_reports_missing_kind() {
        let err = FragmentSet::assemble(TargetLanguage::CSharp, DatabaseEngine::Oracle, |kind| {
            if kind == FragmentKind::ExceptionType {
                None
            } else {
                complete(kind)
            }
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingFragment {
                language: TargetLanguage::CSharp,
                engine: DatabaseEngine::Oracle,
                kind: FragmentKind::ExceptionType,
            }
        );
    }

    #[test]
    fn test_assemble_rejects_mistyped_fragment() {
        let err = FragmentSet::assemble(TargetLanguage::CSharp, DatabaseEngine::Postgres, |kind| {
            if kind == FragmentKind::CommandConstruction {
                Some(Fragment::ConnectionAcquisition("conn"))
            } else {
                complete(kind)
            }
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingFragment {
                kind: FragmentKind::CommandConstruction,
                ..
            }
        ));
    }

    #[test]
    fn test_naming_rules_idempotent() {
        for rule in [NamingRule::UpperCamel, NamingRule::LowerCamel, NamingRule::Verbatim] {
            let once = rule.apply("order_item");
            assert_eq!(rule.apply(&once), once);
        }
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("C#".parse::<TargetLanguage>(), Ok(TargetLanguage::CSharp));
        assert_eq!("csharp".parse::<TargetLanguage>(), Ok(TargetLanguage::CSharp));
        assert!(matches!(
            "cobol".parse::<TargetLanguage>(),
            Err(ConfigError::UnknownLanguage(_))
        ));
    }
}
