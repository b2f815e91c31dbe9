#![allow(dead_code)]

use oxide_codegen_core::prelude::*;

pub fn table(name: &str, columns: &[(&str, &str)], primary_key: &[&str]) -> TableMetadata {
    TableMetadata::new(
        DatabaseEngine::Postgres,
        name,
        columns.iter().map(|(n, t)| Column::new(*n, *t)).collect(),
        primary_key.iter().map(|k| (*k).to_string()).collect(),
    )
}

pub fn users() -> TableMetadata {
    table("users", &[("id", "integer"), ("email", "text")], &["id"])
}

pub fn order_items() -> TableMetadata {
    table(
        "order_items",
        &[
            ("order_id", "integer"),
            ("item_id", "integer"),
            ("quantity", "integer"),
        ],
        &["order_id", "item_id"],
    )
}

pub fn logs() -> TableMetadata {
    table("logs", &[("message", "text"), ("logged_at", "timestamptz")], &[])
}

pub fn pipeline() -> Pipeline {
    Pipeline::resolve(DatabaseEngine::Postgres, TargetLanguage::CSharp)
        .unwrap_or_else(|e| panic!("Failed to resolve pipeline: {e}"))
}

pub fn generate(tables: Vec<TableMetadata>) -> Generated {
    pipeline()
        .generate(&StaticMetadata::new(tables), &mut ())
        .unwrap_or_else(|e| panic!("Generation failed: {e}"))
}

/// Returns the method signature lines of generated C# code.
pub fn signatures(code: &str) -> Vec<&str> {
    code.lines()
        .filter(|l| l.starts_with("public async Task<"))
        .collect()
}

/// Returns the SQL text of every `const string query` line.
pub fn queries(code: &str) -> Vec<String> {
    code.lines()
        .filter_map(|l| {
            l.trim()
                .strip_prefix("const string query = @\"")
                .and_then(|rest| rest.strip_suffix("\";"))
        })
        .map(|sql| sql.replace("\"\"", "\""))
        .collect()
}
