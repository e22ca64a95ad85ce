//! Counting Tests
//!
//! - Table count equals the primary index size
//! - Prefix counts cover exactly the matching entries
//! - Filters exclude when they return true

mod common;

use common::{exclude_lower_half, populated_db, TABLE};
use memdb::{CountOptions, DbError, IndexKey, MemDb};

// =============================================================================
// Table Count
// =============================================================================

/// Count returns every record in the table.
#[test]
fn test_count_table() {
    let db = populated_db(100);
    let reader = db.txn(false).unwrap();
    assert_eq!(reader.count(TABLE).unwrap(), 100);
}

/// Empty table counts zero.
#[test]
fn test_count_empty_table() {
    let db = MemDb::with_schema(common::schema()).unwrap();
    let reader = db.txn(false).unwrap();
    assert_eq!(reader.count(TABLE).unwrap(), 0);
}

/// Unknown table is the only failure.
#[test]
fn test_count_unknown_table() {
    let db = populated_db(10);
    let reader = db.txn(false).unwrap();
    assert_eq!(
        reader.count("missing").unwrap_err(),
        DbError::UnknownTable("missing".into())
    );
}

// =============================================================================
// Prefix Count
// =============================================================================

/// No prefix and no filter counts the whole index.
#[test]
fn test_count_by_whole_index() {
    let db = populated_db(100);
    let reader = db.txn(false).unwrap();
    let cnt = reader.count_by(TABLE, "foo", &CountOptions::new()).unwrap();
    assert_eq!(cnt, 100);
    assert_eq!(cnt, reader.count(TABLE).unwrap());
}

/// foo == "5" matches i = 5, 12, ..., 96.
#[test]
fn test_count_by_prefix() {
    let db = populated_db(100);
    let reader = db.txn(false).unwrap();
    let opt = CountOptions::new().with_index_value(["5"]);
    assert_eq!(reader.count_by(TABLE, "foo", &opt).unwrap(), 14);
}

/// Filter returning true excludes the record.
#[test]
fn test_count_by_prefix_with_filter() {
    let db = populated_db(100);
    let reader = db.txn(false).unwrap();
    let opt = CountOptions::new()
        .with_index_value(["5"])
        .with_filter(exclude_lower_half);
    assert_eq!(reader.count_by(TABLE, "foo", &opt).unwrap(), 7);
}

/// Integer index prefix.
#[test]
fn test_count_by_int_index() {
    let db = populated_db(100);
    let reader = db.txn(false).unwrap();
    let opt = CountOptions::new().with_index_value([8i64]);
    assert_eq!(reader.count_by(TABLE, "int", &opt).unwrap(), 50);

    // Plain integer literals need no suffix
    let opt = CountOptions::new().with_index_value([0]);
    assert_eq!(reader.count_by(TABLE, "int", &opt).unwrap(), 50);
}

/// A prefix matching nothing counts zero without error.
#[test]
fn test_count_by_no_match() {
    let db = populated_db(100);
    let reader = db.txn(false).unwrap();
    let opt = CountOptions::new().with_index_value(["nope"]);
    assert_eq!(reader.count_by(TABLE, "foo", &opt).unwrap(), 0);
}

// =============================================================================
// Resolution Errors
// =============================================================================

/// Unknown index.
#[test]
fn test_count_by_unknown_index() {
    let db = populated_db(10);
    let reader = db.txn(false).unwrap();
    let err = reader.count_by(TABLE, "bar", &CountOptions::new()).unwrap_err();
    assert!(matches!(err, DbError::UnknownIndex { .. }));
    assert!(err.is_query_error());
}

/// Wrong type and wrong arity are encoding errors.
#[test]
fn test_count_by_encoding_errors() {
    let db = populated_db(10);
    let reader = db.txn(false).unwrap();

    let opt = CountOptions::new().with_index_value([5i64]);
    assert!(matches!(
        reader.count_by(TABLE, "foo", &opt),
        Err(DbError::Encoding { .. })
    ));

    let opt = CountOptions::new().with_index_value(vec![IndexKey::from("5"), IndexKey::from("6")]);
    assert!(matches!(
        reader.count_by(TABLE, "foo", &opt),
        Err(DbError::Encoding { .. })
    ));
}

/// Rejected queries are counted, served queries are counted.
#[test]
fn test_count_metrics() {
    let db = populated_db(10);
    let reader = db.txn(false).unwrap();
    reader.count(TABLE).unwrap();
    reader.count_by(TABLE, "foo", &CountOptions::new()).unwrap();
    let _ = reader.count_by(TABLE, "bar", &CountOptions::new());

    let metrics = db.metrics();
    assert_eq!(metrics.queries_executed, 2);
    assert_eq!(metrics.queries_rejected, 1);
    assert_eq!(metrics.entries_scanned, 10);
}
