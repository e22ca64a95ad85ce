//! Paginating retrieval engine
//!
//! One directional prefix scan. Excluded records are dropped first, then
//! `offset` matches are skipped, then up to `limit` matches are collected.
//! The scan stops as soon as the page is full, so work is bounded by
//! offset + limit + the excluded entries seen on the way, never by the size
//! of the index.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::DbResult;
use crate::index::{IndexKey, IndexTree, Record};
use crate::observability::Event;
use crate::txn::Txn;

use super::options::{GetOptions, Window};
use super::trace_query;

/// Records collected by one windowed scan
#[derive(Debug)]
pub(crate) struct Page {
    pub(crate) records: Vec<Record>,
    /// Index entries visited, excluded ones included
    pub(crate) scanned: u64,
}

impl Txn {
    /// A page of records from `table`.`index` under `opt.index_value`.
    ///
    /// May return fewer than `limit` records, or none, when the prefix range
    /// runs out.
    pub fn get_option(&self, table: &str, index: &str, opt: &GetOptions) -> DbResult<Vec<Record>> {
        let (index_schema, prefix) = self.resolve(Event::QueryGetOption, table, index, &opt.index_value)?;
        let tree = self.readable_index(table, index_schema)?;
        let window = opt.normalize(self.db.config.max_page_size);

        let page = collect_window(tree, &prefix, &window, |record| opt.excludes(record));

        self.db
            .metrics
            .record_query(page.scanned, page.records.len() as u64);
        trace_query(&self.db, Event::QueryGetOption, table, index, page.scanned, page.records.len());
        Ok(page.records)
    }

    /// First record of `table`.`index` under `values`, in ascending key order
    pub fn first(&self, table: &str, index: &str, values: &[IndexKey]) -> DbResult<Option<Record>> {
        let (index_schema, prefix) = self.resolve(Event::QueryFirst, table, index, values)?;
        let tree = self.readable_index(table, index_schema)?;
        let record = tree.scan_prefix(&prefix).next().map(|(_, record)| Arc::clone(record));

        self.db.metrics.record_query(u64::from(record.is_some()), u64::from(record.is_some()));
        Ok(record)
    }
}

pub(crate) fn collect_window<F>(tree: &IndexTree, prefix: &[u8], window: &Window, excludes: F) -> Page
where
    F: Fn(&Value) -> bool,
{
    let mut scanned = 0u64;
    let mut records = Vec::with_capacity(window.limit.min(tree.len()));
    records.extend(
        tree.scan(prefix, window.direction)
            .inspect(|_| scanned += 1)
            .filter(|(_, record)| {
                let record: &Value = record;
                !excludes(record)
            })
            .skip(window.offset)
            .take(window.limit)
            .map(|(_, record)| Arc::clone(record)),
    );

    Page { records, scanned }
}
