#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

pub const SHOP_SCHEMA: &str = r#"{
  "engine": "postgres",
  "tables": [
    {
      "name": "users",
      "columns": [
        { "name": "id", "data_type": "integer" },
        { "name": "email", "data_type": "character varying" },
        { "name": "created_at", "data_type": "timestamp with time zone" }
      ],
      "primary_key": ["id"]
    },
    {
      "name": "audit_log",
      "columns": [
        { "name": "message", "data_type": "text" },
        { "name": "payload", "data_type": "jsonb" }
      ]
    },
    {
      "name": "order_items",
      "columns": [
        { "name": "order_id", "data_type": "bigint" },
        { "name": "item_id", "data_type": "bigint" },
        { "name": "quantity", "data_type": "smallint" }
      ],
      "primary_key": ["order_id", "item_id"]
    }
  ]
}"#;

/// Writes `json` to `schema.json` in a fresh temporary directory.
pub fn write_schema(json: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("Failed to create temp dir: {e}"));
    let path = dir.path().join("schema.json");
    std::fs::write(&path, json).unwrap_or_else(|e| panic!("Failed to write schema: {e}"));
    (dir, path)
}
