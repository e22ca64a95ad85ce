//! Shared fixtures for integration tests
//!
//! The `main` table holds records `{id, foo, int}` where `foo = i % 7` and
//! `int = 8` for the upper half of the ids.

#![allow(dead_code)]

use memdb::{DbSchema, IndexField, IndexSchema, MemDb, Record, TableSchema, ID_INDEX};
use serde_json::{json, Value};

pub const TABLE: &str = "main";

pub fn schema() -> DbSchema {
    DbSchema::new().with_table(
        TableSchema::new(TABLE)
            .with_index(IndexSchema::unique(ID_INDEX, vec![IndexField::string("id")]))
            .with_index(IndexSchema::new("foo", vec![IndexField::string("foo")]))
            .with_index(IndexSchema::new("int", vec![IndexField::int("int")]).allow_missing()),
    )
}

pub fn record(i: usize, total: usize) -> Value {
    let int = if i >= total / 2 { 8 } else { 0 };
    json!({
        "id": i.to_string(),
        "foo": (i % 7).to_string(),
        "int": int,
    })
}

/// Open a database holding `total` committed records
pub fn populated_db(total: usize) -> MemDb {
    let db = MemDb::with_schema(schema()).unwrap();
    let mut txn = db.txn(true).unwrap();
    for i in 0..total {
        txn.insert(TABLE, record(i, total)).unwrap();
    }
    txn.commit().unwrap();
    db
}

/// Excludes every record outside the upper half
pub fn exclude_lower_half(record: &Value) -> bool {
    record["int"] != 8
}

pub fn ids(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}
