//! Observability events for memdb
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in memdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Database opened with a validated schema
    DbOpen,

    // Transactions
    /// Transaction started
    TxnBegin,
    /// Write transaction published a new snapshot
    TxnCommit,
    /// Write transaction discarded
    TxnAbort,

    // Queries
    /// Table count served
    QueryCount,
    /// Filtered prefix count served
    QueryCountBy,
    /// Paginated retrieval served
    QueryGetOption,
    /// First-match lookup served
    QueryFirst,
    /// Query rejected during index resolution
    QueryRejected,

    // Writes
    /// Record inserted or replaced
    RecordInsert,
    /// Record deleted
    RecordDelete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::DbOpen => "MEMDB_OPEN",

            Event::TxnBegin => "TXN_BEGIN",
            Event::TxnCommit => "TXN_COMMIT",
            Event::TxnAbort => "TXN_ABORT",

            Event::QueryCount => "QUERY_COUNT",
            Event::QueryCountBy => "QUERY_COUNT_BY",
            Event::QueryGetOption => "QUERY_GET_OPTION",
            Event::QueryFirst => "QUERY_FIRST",
            Event::QueryRejected => "QUERY_REJECTED",

            Event::RecordInsert => "RECORD_INSERT",
            Event::RecordDelete => "RECORD_DELETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
