//! Counting engine
//!
//! `count` reads the size of the primary index. `count_by` visits the whole
//! prefix range; it never stops early, since every entry can change the
//! result.

use serde_json::Value;

use crate::errors::DbResult;
use crate::index::IndexTree;
use crate::observability::Event;
use crate::schema::ID_INDEX;
use crate::txn::Txn;

use super::options::CountOptions;
use super::trace_query;

impl Txn {
    /// Number of records in `table`
    pub fn count(&self, table: &str) -> DbResult<usize> {
        let (index, _) = self.resolve(Event::QueryCount, table, ID_INDEX, &[])?;
        let tree = self.readable_index(table, index)?;
        let total = tree.len();

        self.db.metrics.record_query(0, 0);
        trace_query(&self.db, Event::QueryCount, table, ID_INDEX, 0, total);
        Ok(total)
    }

    /// Number of entries of `table`.`index` under `opt.index_value` that the
    /// filter does not exclude
    pub fn count_by(&self, table: &str, index: &str, opt: &CountOptions) -> DbResult<usize> {
        let (index_schema, prefix) = self.resolve(Event::QueryCountBy, table, index, &opt.index_value)?;
        let tree = self.readable_index(table, index_schema)?;
        let (scanned, matched) = count_matches(tree, &prefix, |record| opt.excludes(record));

        self.db.metrics.record_query(scanned, 0);
        trace_query(&self.db, Event::QueryCountBy, table, index, scanned, matched);
        Ok(matched)
    }
}

/// Returns (entries visited, entries not excluded)
pub(crate) fn count_matches<F>(tree: &IndexTree, prefix: &[u8], excludes: F) -> (u64, usize)
where
    F: Fn(&Value) -> bool,
{
    let mut scanned = 0u64;
    let matched = tree
        .scan_prefix(prefix)
        .inspect(|_| scanned += 1)
        .filter(|(_, record)| {
            let record: &Value = record;
            !excludes(record)
        })
        .count();
    (scanned, matched)
}
