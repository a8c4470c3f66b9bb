//! Shared fixtures for integration tests.

use std::collections::HashMap;

use record_core::schema::SchemaFile;
use record_core::TableSchema;

pub const SCHEMA_JSON: &str = r#"{
    "version": 1,
    "tables": {
        "accounts": {
            "columns": [
                { "name": "id", "type": "bigint", "key": true },
                { "name": "owner", "type": "varchar(32)" },
                { "name": "balance", "type": "numeric(12,2)" },
                { "name": "active", "type": "boolean" },
                { "name": "opened", "type": "date" }
            ]
        }
    }
}"#;

pub fn accounts_schema() -> TableSchema {
    SchemaFile::from_json(SCHEMA_JSON)
        .unwrap()
        .table("accounts")
        .unwrap()
}

pub fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
