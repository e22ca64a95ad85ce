//! Write path: insert and delete inside a write transaction
//!
//! Every index entry of a record is computed before the snapshot is touched,
//! so a failed write leaves the transaction unchanged.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::{DbError, DbResult};
use crate::index::{IndexKey, IndexTree, Record};
use crate::mvcc::Snapshot;
use crate::observability::{Event, Severity};
use crate::schema::{TableSchema, ID_INDEX};

use super::Txn;

impl Txn {
    /// Insert `record` into `table`, replacing any record with the same id
    pub fn insert(&mut self, table: &str, record: Value) -> DbResult<()> {
        self.ensure_writable()?;
        let schema = self.db.schema.table(table)?;
        let primary = primary_key(schema, &record)?;

        let mut entries = Vec::with_capacity(schema.indexes.len());
        for index in schema.indexes.values() {
            if let Some(key) = index.record_key(&record, Some(&primary))? {
                entries.push((index, key));
            }
        }

        for (index, key) in &entries {
            if !index.unique || index.name == ID_INDEX {
                continue;
            }
            if let Some(existing) = self.snapshot.index(table, &index.name).and_then(|t| t.get(key)) {
                if primary_key(schema, existing)? != primary {
                    return Err(DbError::UniqueViolation {
                        table: table.to_string(),
                        index: index.name.clone(),
                    });
                }
            }
        }

        let previous = self
            .snapshot
            .index(table, ID_INDEX)
            .and_then(|tree| tree.get(&primary))
            .cloned();

        let record: Record = Arc::new(record);
        let snapshot = Arc::make_mut(&mut self.snapshot);
        if let Some(previous) = previous {
            remove_entries(snapshot, schema, &previous, &primary)?;
        }
        for (index, key) in entries {
            tree_mut(snapshot, table, &index.name)?.insert(key, Arc::clone(&record));
        }

        self.db.log(Severity::Trace, Event::RecordInsert, &[("table", table)]);
        Ok(())
    }

    /// Delete the record with primary id `id` from `table`, returning it
    pub fn delete(&mut self, table: &str, id: impl Into<IndexKey>) -> DbResult<Record> {
        self.ensure_writable()?;
        let schema = self.db.schema.table(table)?;
        let id = id.into();
        let primary = schema.id_index()?.encode_values(std::slice::from_ref(&id))?;

        let existing = self
            .snapshot
            .index(table, ID_INDEX)
            .and_then(|tree| tree.get(&primary))
            .cloned()
            .ok_or_else(|| DbError::NotFound {
                table: table.to_string(),
                id: id.to_string(),
            })?;

        let snapshot = Arc::make_mut(&mut self.snapshot);
        remove_entries(snapshot, schema, &existing, &primary)?;

        self.db.log(Severity::Trace, Event::RecordDelete, &[("table", table)]);
        Ok(existing)
    }
}

/// Encoded primary id of `record`
fn primary_key(table: &TableSchema, record: &Value) -> DbResult<Vec<u8>> {
    match table.id_index()?.record_key(record, None) {
        Ok(Some(key)) => Ok(key),
        Ok(None) | Err(DbError::MissingIndexField { .. }) => Err(DbError::MissingId(table.name.clone())),
        Err(err) => Err(err),
    }
}

fn remove_entries(
    snapshot: &mut Snapshot,
    table: &TableSchema,
    record: &Value,
    primary: &[u8],
) -> DbResult<()> {
    for index in table.indexes.values() {
        if let Some(key) = index.record_key(record, Some(primary))? {
            tree_mut(snapshot, &table.name, &index.name)?.remove(&key);
        }
    }
    Ok(())
}

fn tree_mut<'a>(snapshot: &'a mut Snapshot, table: &str, index: &str) -> DbResult<&'a mut IndexTree> {
    snapshot
        .index_mut(table, index)
        .ok_or_else(|| DbError::Internal(format!("no tree for {}.{}", table, index)))
}
