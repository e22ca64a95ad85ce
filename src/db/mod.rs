//! In-memory database handle
//!
//! `MemDb` owns the schema, the config, the counters, and a pointer to the
//! current published snapshot. Transactions capture that pointer when they
//! begin:
//!
//! - Any number of read transactions run concurrently and never block
//! - One write transaction at a time; `txn(true)` waits for the previous
//!   writer to commit, abort, or be dropped
//! - Commit swaps the pointer; older snapshots stay readable for whoever
//!   still holds them

mod config;

use std::sync::{Arc, Condvar, Mutex, PoisonError, RwLock};

pub use config::{DbConfig, MAX_PAGE_SIZE};

use crate::errors::{DbError, DbResult};
use crate::mvcc::{CommitId, Snapshot};
use crate::observability::{log_event, Event, MetricsSnapshot, QueryMetrics, Severity};
use crate::schema::DbSchema;
use crate::txn::Txn;

/// State shared by the database handle and its transactions
#[derive(Debug)]
pub(crate) struct DbShared {
    pub(crate) schema: DbSchema,
    pub(crate) config: DbConfig,
    pub(crate) metrics: QueryMetrics,
    current: RwLock<Arc<Snapshot>>,
    writer: WriterGate,
}

impl DbShared {
    /// The snapshot new transactions start from
    pub(crate) fn current_snapshot(&self) -> DbResult<Arc<Snapshot>> {
        let current = self.current.read().map_err(|_| DbError::poisoned("snapshot"))?;
        Ok(Arc::clone(&current))
    }

    /// Publish `snapshot` as the next version. Only the writer calls this.
    pub(crate) fn publish(&self, snapshot: &mut Arc<Snapshot>) -> DbResult<CommitId> {
        let mut current = self.current.write().map_err(|_| DbError::poisoned("snapshot"))?;
        let version = current.version().next();
        Arc::make_mut(snapshot).set_version(version);
        *current = Arc::clone(snapshot);
        Ok(version)
    }

    pub(crate) fn acquire_writer(&self) {
        self.writer.acquire();
    }

    pub(crate) fn release_writer(&self) {
        self.writer.release();
    }

    /// Returns whether events of `severity` pass this database's log level
    pub(crate) fn log_enabled(&self, severity: Severity) -> bool {
        severity >= self.config.log_level
    }

    pub(crate) fn log(&self, severity: Severity, event: Event, fields: &[(&str, &str)]) {
        if self.log_enabled(severity) {
            log_event(severity, event, fields);
        }
    }
}

/// Admits one writer at a time.
///
/// A poisoned lock is recovered: the flag it guards is always consistent.
#[derive(Debug, Default)]
struct WriterGate {
    busy: Mutex<bool>,
    released: Condvar,
}

impl WriterGate {
    fn acquire(&self) {
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);
        while *busy {
            busy = self
                .released
                .wait(busy)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *busy = true;
    }

    fn release(&self) {
        *self.busy.lock().unwrap_or_else(PoisonError::into_inner) = false;
        self.released.notify_one();
    }
}

/// Handle to an in-memory database. Cloning shares the same database.
#[derive(Debug, Clone)]
pub struct MemDb {
    shared: Arc<DbShared>,
}

impl MemDb {
    /// Open an empty database for `schema`.
    ///
    /// `config.log_level` filters the events of this database only.
    pub fn new(schema: DbSchema, config: DbConfig) -> DbResult<Self> {
        schema.validate()?;
        config.validate()?;

        let snapshot = Snapshot::empty(&schema);
        let shared = Arc::new(DbShared {
            schema,
            config,
            metrics: QueryMetrics::new(),
            current: RwLock::new(Arc::new(snapshot)),
            writer: WriterGate::default(),
        });

        let tables = shared.schema.tables.len().to_string();
        shared.log(Severity::Info, Event::DbOpen, &[("tables", &tables)]);
        Ok(Self { shared })
    }

    /// Open an empty database with the default config
    pub fn with_schema(schema: DbSchema) -> DbResult<Self> {
        Self::new(schema, DbConfig::default())
    }

    /// Begin a transaction on the current snapshot.
    ///
    /// A write transaction waits until no other writer is active.
    pub fn txn(&self, write: bool) -> DbResult<Txn> {
        Txn::begin(Arc::clone(&self.shared), write)
    }

    /// Version of the current published snapshot
    pub fn version(&self) -> DbResult<CommitId> {
        Ok(self.shared.current_snapshot()?.version())
    }

    /// The database schema
    pub fn schema(&self) -> &DbSchema {
        &self.shared.schema
    }

    /// The database config
    pub fn config(&self) -> &DbConfig {
        &self.shared.config
    }

    /// Current counter values
    pub fn metrics(&self) -> MetricsSnapshot {
        self.shared.metrics.snapshot()
    }
}
