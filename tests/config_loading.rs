//! Configuration Loading Tests
//!
//! - Config and schema load from JSON files
//! - Invalid files are rejected before a database opens

mod common;

use std::fs;

use memdb::observability::Severity;
use memdb::{DbConfig, DbError, DbSchema, GetOptions, MemDb, MAX_PAGE_SIZE};
use serde_json::json;
use tempfile::TempDir;

const SCHEMA_JSON: &str = r#"{
    "tables": {
        "main": {
            "name": "main",
            "indexes": {
                "id": {"name": "id", "fields": [{"name": "id", "type": "string"}], "unique": true},
                "foo": {"name": "foo", "fields": [{"name": "foo", "type": "string"}]}
            }
        }
    }
}"#;

/// A config file overrides the defaults it names.
#[test]
fn test_load_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memdb.json");
    fs::write(&path, r#"{"max_page_size": 25, "log_level": "error"}"#).unwrap();

    let config = DbConfig::load(&path).unwrap();
    assert_eq!(config.max_page_size, 25);
    assert_eq!(config.log_level, Severity::Error);
}

/// An empty object yields the defaults.
#[test]
fn test_load_default_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memdb.json");
    fs::write(&path, "{}").unwrap();

    let config = DbConfig::load(&path).unwrap();
    assert_eq!(config, DbConfig::default());
    assert_eq!(config.max_page_size, MAX_PAGE_SIZE);
}

/// Missing files, malformed JSON, and a zero page size are config errors.
#[test]
fn test_load_invalid_config() {
    let dir = TempDir::new().unwrap();

    let missing = DbConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, DbError::InvalidConfig(_)));

    let path = dir.path().join("broken.json");
    fs::write(&path, "{max_page_size").unwrap();
    assert!(matches!(DbConfig::load(&path), Err(DbError::InvalidConfig(_))));

    fs::write(&path, r#"{"max_page_size": 0}"#).unwrap();
    assert!(matches!(DbConfig::load(&path), Err(DbError::InvalidConfig(_))));
}

/// A page size above 200 is rejected, so no config can lift the ceiling.
#[test]
fn test_page_size_ceiling_enforced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memdb.json");

    for size in [201, 1_000] {
        fs::write(&path, format!(r#"{{"max_page_size": {}}}"#, size)).unwrap();
        assert!(matches!(DbConfig::load(&path), Err(DbError::InvalidConfig(_))));
    }

    let config = DbConfig {
        max_page_size: 1_000,
        ..DbConfig::default()
    };
    assert!(matches!(
        MemDb::new(common::schema(), config),
        Err(DbError::InvalidConfig(_))
    ));

    fs::write(&path, r#"{"max_page_size": 200}"#).unwrap();
    assert_eq!(DbConfig::load(&path).unwrap().max_page_size, MAX_PAGE_SIZE);
}

/// A database opened from files honors the loaded page size.
#[test]
fn test_open_from_files() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("memdb.json");
    let schema_path = dir.path().join("schema.json");
    fs::write(&config_path, r#"{"max_page_size": 5, "log_level": "error"}"#).unwrap();
    fs::write(&schema_path, SCHEMA_JSON).unwrap();

    let config = DbConfig::load(&config_path).unwrap();
    let schema = DbSchema::from_json(&fs::read_to_string(&schema_path).unwrap()).unwrap();
    let db = MemDb::new(schema, config).unwrap();

    let mut txn = db.txn(true).unwrap();
    for i in 0..12 {
        txn.insert("main", json!({"id": i.to_string(), "foo": "a"})).unwrap();
    }
    txn.commit().unwrap();

    let reader = db.txn(false).unwrap();
    let page = reader
        .get_option("main", "foo", &GetOptions::new().with_limit(50))
        .unwrap();
    assert_eq!(page.len(), 5);
    assert_eq!(reader.count("main").unwrap(), 12);
}

/// A schema without a unique id index cannot open a database.
#[test]
fn test_schema_without_id_rejected() {
    let schema = DbSchema::from_json(
        r#"{"tables": {"main": {"name": "main", "indexes": {
            "foo": {"name": "foo", "fields": [{"name": "foo", "type": "string"}]}
        }}}}"#,
    );
    let err = match schema {
        Err(err) => err,
        Ok(schema) => MemDb::with_schema(schema).unwrap_err(),
    };
    assert!(matches!(err, DbError::InvalidSchema(_)));
}

/// The fixture schema round-trips through JSON.
#[test]
fn test_schema_json_round_trip() {
    let schema = common::schema();
    let json = serde_json::to_string(&schema).unwrap();
    assert_eq!(DbSchema::from_json(&json).unwrap(), schema);
}
