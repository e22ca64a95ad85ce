//! Index resolution and snapshot access
//!
//! `index_value` turns (table, index, values) into the index declaration and
//! the encoded lookup prefix. It is the only place query errors come from.
//! `readable_index` hands out the tree captured by this transaction's
//! snapshot.

use crate::errors::{DbError, DbResult};
use crate::index::{IndexKey, IndexTree};
use crate::observability::{Event, Severity};
use crate::schema::IndexSchema;

use super::Txn;

impl Txn {
    /// Resolve `table`.`index` and encode `values` into a lookup prefix
    pub(crate) fn index_value(
        &self,
        table: &str,
        index: &str,
        values: &[IndexKey],
    ) -> DbResult<(&IndexSchema, Vec<u8>)> {
        let index_schema = self.db.schema.table(table)?.index(index)?;
        let prefix = index_schema.encode_values(values)?;
        Ok((index_schema, prefix))
    }

    /// `index_value` for a query: failures are counted and logged
    pub(crate) fn resolve(
        &self,
        query: Event,
        table: &str,
        index: &str,
        values: &[IndexKey],
    ) -> DbResult<(&IndexSchema, Vec<u8>)> {
        self.index_value(table, index, values).map_err(|err| {
            self.db.metrics.increment_queries_rejected();
            let reason = err.to_string();
            self.db.log(
                Severity::Warn,
                Event::QueryRejected,
                &[
                    ("code", err.code()),
                    ("index", index),
                    ("query", query.as_str()),
                    ("reason", &reason),
                    ("table", table),
                ],
            );
            err
        })
    }

    /// The tree backing `table`.`index` in this transaction's snapshot
    pub(crate) fn readable_index(&self, table: &str, index: &IndexSchema) -> DbResult<&IndexTree> {
        self.snapshot.index(table, &index.name).ok_or_else(|| {
            DbError::Internal(format!(
                "snapshot {} has no tree for {}.{}",
                self.snapshot.version().value(),
                table,
                index.name
            ))
        })
    }
}
