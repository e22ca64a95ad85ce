//! Query options
//!
//! A filter EXCLUDES the records it returns `true` for. Excluded records are
//! dropped before offset and limit are applied, so they never take up a
//! slot in a page.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::db::MAX_PAGE_SIZE;
use crate::index::{IndexKey, ScanDirection};

/// Exclusion predicate over a record: `true` drops the record
pub type Filter = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

fn excludes(filter: &Option<Filter>, record: &Value) -> bool {
    filter.as_ref().map_or(false, |f| f(record))
}

fn index_keys<I, K>(values: I) -> Vec<IndexKey>
where
    I: IntoIterator<Item = K>,
    K: Into<IndexKey>,
{
    values.into_iter().map(Into::into).collect()
}

/// Options for `Txn::count_by`
#[derive(Clone, Default)]
pub struct CountOptions {
    /// Leading index values; empty scans the whole index
    pub index_value: Vec<IndexKey>,
    /// Exclusion predicate; `None` excludes nothing
    pub filter: Option<Filter>,
}

impl CountOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index_value<I, K>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<IndexKey>,
    {
        self.index_value = index_keys(values);
        self
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Returns whether the filter drops `record`
    pub fn excludes(&self, record: &Value) -> bool {
        excludes(&self.filter, record)
    }
}

impl fmt::Debug for CountOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountOptions")
            .field("index_value", &self.index_value)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Options for `Txn::get_option`.
///
/// `limit` and `offset` are taken as given and normalized per query: a limit
/// outside `1..=max_page_size` becomes `max_page_size`, a negative offset
/// becomes 0.
#[derive(Clone, Default)]
pub struct GetOptions {
    /// Leading index values; empty scans the whole index
    pub index_value: Vec<IndexKey>,
    /// Maximum number of records to return
    pub limit: i64,
    /// Number of matching records to skip
    pub offset: i64,
    /// Exclusion predicate; `None` excludes nothing
    pub filter: Option<Filter>,
    /// Scan in descending key order
    pub desc: bool,
}

impl GetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index_value<I, K>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<IndexKey>,
    {
        self.index_value = index_keys(values);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn descending(mut self, desc: bool) -> Self {
        self.desc = desc;
        self
    }

    /// Returns whether the filter drops `record`
    pub fn excludes(&self, record: &Value) -> bool {
        excludes(&self.filter, record)
    }

    /// Clamp limit and offset and pick the scan direction.
    ///
    /// The ceiling never exceeds `MAX_PAGE_SIZE`, whatever `max_page_size` is.
    pub fn normalize(&self, max_page_size: usize) -> Window {
        let max_page_size = max_page_size.clamp(1, MAX_PAGE_SIZE);
        let limit = match usize::try_from(self.limit) {
            Ok(limit) if limit > 0 && limit <= max_page_size => limit,
            _ => max_page_size,
        };
        let offset = usize::try_from(self.offset).unwrap_or(0);
        let direction = if self.desc {
            ScanDirection::Backward
        } else {
            ScanDirection::Forward
        };

        Window {
            limit,
            offset,
            direction,
        }
    }
}

impl fmt::Debug for GetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetOptions")
            .field("index_value", &self.index_value)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("desc", &self.desc)
            .finish()
    }
}

/// Normalized paging window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Records to return, in `1..=max_page_size`
    pub limit: usize,
    /// Matching records to skip
    pub offset: usize,
    /// Scan direction
    pub direction: ScanDirection,
}
