//! Example: C# data access for a small shop schema
//!
//! Builds table metadata in memory, runs the PostgreSQL/C# pipeline and
//! prints the generated code. No database is needed.
//!
//! Run with: cargo run --example shop_schema -p oxide-codegen

use oxide_codegen::prelude::*;

fn table(name: &str, columns: &[(&str, &str)], key: &[&str]) -> TableMetadata {
    TableMetadata::new(
        DatabaseEngine::Postgres,
        name,
        columns.iter().map(|(n, t)| Column::new(*n, *t)).collect(),
        key.iter().map(|k| (*k).to_string()).collect(),
    )
}

fn main() -> anyhow::Result<()> {
    let provider = StaticMetadata::new(vec![
        table(
            "customers",
            &[
                ("id", "uuid"),
                ("name", "text"),
                ("created_at", "timestamptz"),
            ],
            &["id"],
        ),
        table(
            "orders",
            &[
                ("id", "bigserial"),
                ("customer_id", "uuid"),
                ("total", "numeric"),
            ],
            &["id"],
        ),
        table("events", &[("kind", "text"), ("payload", "jsonb")], &[]),
    ]);

    let pipeline = Pipeline::resolve(DatabaseEngine::Postgres, TargetLanguage::CSharp)?;
    let generated = pipeline.generate(&provider, &mut ())?;

    for diagnostic in &generated.diagnostics {
        eprintln!("warning: {diagnostic}");
    }
    print!("{}", generated.code);

    Ok(())
}
