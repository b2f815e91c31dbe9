//! Column type translation.
//!
//! Maps dialect-native type names, as reported by the database, to type
//! names in the target language. Lookup is total: unknown names resolve to
//! the language's text type so unseen types never stop a run.

mod csharp;

pub use csharp::CSharpTypeMapper;

/// Translates dialect type names into target-language type names.
pub trait TypeMapper {
    /// Returns the target type for `dialect_type`. Never fails; unknown
    /// names yield [`fallback_type`](Self::fallback_type).
    fn map_type(&self, dialect_type: &str) -> &'static str;

    /// Type used for unrecognized names.
    fn fallback_type(&self) -> &'static str;

    /// Returns whether a mapped target type is a value type, as opposed to
    /// a reference type that already admits null.
    fn is_value_type(&self, target_type: &str) -> bool;
}

/// Normalizes a dialect type name for lookup.
///
/// Parenthesized modifiers are dropped, so `numeric(10,2)` and
/// `timestamp(3) with time zone` look up as `numeric` and
/// `timestamp with time zone`.
pub(crate) fn normalize(dialect_type: &str) -> String {
    let mut stripped = String::with_capacity(dialect_type.len());
    let mut depth = 0usize;
    for ch in dialect_type.chars() {
        match ch {
            '(' => {
                depth += 1;
                stripped.push(' ');
            }
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => stripped.push(ch),
            _ => {}
        }
    }
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
