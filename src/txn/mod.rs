//! Transactions
//!
//! A transaction owns one immutable snapshot for its whole lifetime.
//!
//! - Read transactions never mutate their snapshot and never block
//! - A write transaction holds the writer gate from `begin` until `commit`,
//!   `abort`, or drop; its writes go to a private copy-on-write snapshot
//!   that it can read back before committing
//! - Index trees are fetched from the snapshot on every call, never cached

mod resolver;
mod write;

use std::sync::Arc;

use crate::db::DbShared;
use crate::errors::{DbError, DbResult};
use crate::mvcc::{CommitId, Snapshot};
use crate::observability::{Event, Severity};

/// A transaction over one snapshot of the database
#[derive(Debug)]
pub struct Txn {
    pub(crate) db: Arc<DbShared>,
    pub(crate) snapshot: Arc<Snapshot>,
    holds_writer: bool,
}

impl Txn {
    pub(crate) fn begin(db: Arc<DbShared>, write: bool) -> DbResult<Self> {
        if write {
            db.acquire_writer();
        }
        let snapshot = match db.current_snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                if write {
                    db.release_writer();
                }
                return Err(err);
            }
        };

        if db.log_enabled(Severity::Trace) {
            let version = snapshot.version().value().to_string();
            let mode = if write { "write" } else { "read" };
            db.log(
                Severity::Trace,
                Event::TxnBegin,
                &[("mode", mode), ("version", &version)],
            );
        }

        Ok(Self {
            db,
            snapshot,
            holds_writer: write,
        })
    }

    /// Returns whether this transaction may write
    pub fn is_write(&self) -> bool {
        self.holds_writer
    }

    /// Version of the snapshot this transaction started from
    pub fn version(&self) -> CommitId {
        self.snapshot.version()
    }

    /// The snapshot this transaction reads
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    /// Publish this transaction's writes as the next snapshot.
    ///
    /// A no-op on read transactions, returning the version they observed.
    pub fn commit(mut self) -> DbResult<CommitId> {
        if !self.holds_writer {
            return Ok(self.snapshot.version());
        }

        let version = self.db.publish(&mut self.snapshot)?;
        self.holds_writer = false;
        self.db.release_writer();
        self.db.metrics.increment_commits();

        let version_str = version.value().to_string();
        self.db.log(Severity::Info, Event::TxnCommit, &[("version", &version_str)]);
        Ok(version)
    }

    /// Discard this transaction's writes
    pub fn abort(mut self) {
        self.discard();
    }

    fn discard(&mut self) {
        if self.holds_writer {
            self.holds_writer = false;
            self.db.release_writer();
            self.db.metrics.increment_aborts();
            self.db.log(Severity::Info, Event::TxnAbort, &[]);
        }
    }

    pub(crate) fn ensure_writable(&self) -> DbResult<()> {
        if self.holds_writer {
            Ok(())
        } else {
            Err(DbError::ReadOnlyTransaction)
        }
    }
}

impl Drop for Txn {
    fn drop(&mut self) {
        self.discard();
    }
}
