//! Snapshot - Immutable point-in-time view of every index
//!
//! A snapshot maps table name -> index name -> `IndexTree`. Published
//! snapshots are shared through `Arc` and never change; a write transaction
//! works on its own copy, whose trees copy their maps lazily on first write.
//!
//! - Established when a transaction begins
//! - Never changes during the transaction
//! - Stamped with the commit identity that published it

use std::collections::BTreeMap;

use super::CommitId;
use crate::index::IndexTree;
use crate::schema::DbSchema;

/// A point-in-time view of all index trees.
#[derive(Debug, Clone)]
pub struct Snapshot {
    version: CommitId,
    tables: BTreeMap<String, BTreeMap<String, IndexTree>>,
}

impl Snapshot {
    /// Creates an empty snapshot holding one empty tree per declared index.
    pub fn empty(schema: &DbSchema) -> Self {
        let tables = schema
            .tables
            .iter()
            .map(|(table_name, table)| {
                let indexes = table
                    .indexes
                    .keys()
                    .map(|index_name| (index_name.clone(), IndexTree::new()))
                    .collect();
                (table_name.clone(), indexes)
            })
            .collect();

        Self {
            version: CommitId::initial(),
            tables,
        }
    }

    /// Returns the commit identity that published this snapshot
    #[inline]
    pub fn version(&self) -> CommitId {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: CommitId) {
        self.version = version;
    }

    /// The tree backing `table`.`index` in this snapshot
    pub fn index(&self, table: &str, index: &str) -> Option<&IndexTree> {
        self.tables.get(table).and_then(|indexes| indexes.get(index))
    }

    pub(crate) fn index_mut(&mut self, table: &str, index: &str) -> Option<&mut IndexTree> {
        self.tables
            .get_mut(table)
            .and_then(|indexes| indexes.get_mut(index))
    }
}
