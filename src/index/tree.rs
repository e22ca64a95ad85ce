//! Persistent ordered index structure
//!
//! An `IndexTree` maps encoded index keys to records. The map sits behind an
//! `Arc`, so cloning a tree is O(1) and the first write after a clone copies
//! the map (copy-on-write). A tree reachable from a published snapshot is
//! never mutated in place.
//!
//! Prefix traversal is a lazy, double-ended iterator over the key range that
//! shares the prefix. Stopping early is simply not pulling more entries.

use std::collections::btree_map::{self, BTreeMap};
use std::ops::Bound;
use std::sync::Arc;

use serde_json::Value;

/// A record stored in the database, shared between every index that holds it
pub type Record = Arc<Value>;

/// Traversal order for a prefix scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanDirection {
    /// Ascending key order
    #[default]
    Forward,
    /// Descending key order
    Backward,
}

/// A persistent ordered key -> record structure
#[derive(Debug, Clone, Default)]
pub struct IndexTree {
    entries: Arc<BTreeMap<Vec<u8>, Record>>,
}

impl IndexTree {
    /// Creates a new empty index tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the tree holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact key lookup
    pub fn get(&self, key: &[u8]) -> Option<&Record> {
        self.entries.get(key)
    }

    /// Insert or replace the record stored under `key`.
    ///
    /// Copies the underlying map first if another tree still shares it.
    pub fn insert(&mut self, key: Vec<u8>, record: Record) -> Option<Record> {
        Arc::make_mut(&mut self.entries).insert(key, record)
    }

    /// Remove the entry stored under `key`
    pub fn remove(&mut self, key: &[u8]) -> Option<Record> {
        if !self.entries.contains_key(key) {
            return None;
        }
        Arc::make_mut(&mut self.entries).remove(key)
    }

    /// Returns whether both trees share the same underlying map
    pub fn shares_storage_with(&self, other: &IndexTree) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Ascending scan over all keys starting with `prefix`
    pub fn scan_prefix(&self, prefix: &[u8]) -> PrefixScan<'_> {
        self.scan(prefix, ScanDirection::Forward)
    }

    /// Scan over all keys starting with `prefix` in the given direction.
    ///
    /// An empty prefix covers the whole tree.
    pub fn scan(&self, prefix: &[u8], direction: ScanDirection) -> PrefixScan<'_> {
        let end = prefix_end(prefix);
        let upper = match &end {
            Some(end) => Bound::Excluded(end.as_slice()),
            None => Bound::Unbounded,
        };
        let range = self
            .entries
            .range::<[u8], _>((Bound::Included(prefix), upper));

        PrefixScan { range, direction }
    }
}

/// Lazy iterator over the entries sharing a key prefix
pub struct PrefixScan<'a> {
    range: btree_map::Range<'a, Vec<u8>, Record>,
    direction: ScanDirection,
}

impl<'a> PrefixScan<'a> {
    /// Returns the traversal direction
    pub fn direction(&self) -> ScanDirection {
        self.direction
    }
}

impl<'a> Iterator for PrefixScan<'a> {
    type Item = (&'a [u8], &'a Record);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.direction {
            ScanDirection::Forward => self.range.next(),
            ScanDirection::Backward => self.range.next_back(),
        };
        entry.map(|(key, record)| (key.as_slice(), record))
    }
}

/// Smallest key greater than every key starting with `prefix`.
///
/// `None` when no such key exists (empty prefix or all bytes 0xFF).
fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.last_mut() {
        if *last < 0xFF {
            *last += 1;
            return Some(end);
        }
        end.pop();
    }
    None
}
