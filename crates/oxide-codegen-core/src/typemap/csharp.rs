//! C# type mapping.

use super::{TypeMapper, normalize};

/// Maps SQL type names to C# type names.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpTypeMapper;

impl CSharpTypeMapper {
    /// Creates a new C# type mapper.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TypeMapper for CSharpTypeMapper {
    fn map_type(&self, dialect_type: &str) -> &'static str {
        match normalize(dialect_type).as_str() {
            "integer" | "int" | "int4" | "serial" => "int",
            "smallint" | "int2" => "short",
            "bigint" | "int8" | "bigserial" => "long",
            "decimal" | "numeric" => "decimal",
            "real" | "float4" => "float",
            "double precision" | "float8" => "double",
            "boolean" | "bool" => "bool",
            "text" | "varchar" | "character varying" | "char" | "character" => "string",
            "date" | "timestamp" | "timestamp without time zone" => "DateTime",
            "timestamp with time zone" | "timestamptz" => "DateTimeOffset",
            "uuid" => "Guid",
            _ => self.fallback_type(),
        }
    }

    fn fallback_type(&self) -> &'static str {
        "string"
    }

    fn is_value_type(&self, target_type: &str) -> bool {
        !matches!(target_type, "string" | "object" | "byte[]")
    }
}
