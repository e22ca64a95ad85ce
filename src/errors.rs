//! Error types for memdb
//!
//! Error codes:
//! - MEMDB_UNKNOWN_TABLE (query)
//! - MEMDB_UNKNOWN_INDEX (query)
//! - MEMDB_ENCODING (query)
//! - MEMDB_INVALID_SCHEMA
//! - MEMDB_INVALID_CONFIG
//! - MEMDB_MISSING_ID
//! - MEMDB_MISSING_INDEX_FIELD
//! - MEMDB_UNIQUE_VIOLATION
//! - MEMDB_NOT_FOUND
//! - MEMDB_READ_ONLY_TXN
//! - MEMDB_INTERNAL
//!
//! Query errors are raised only while resolving an index, never while a scan
//! is running.

use thiserror::Error;

/// Result type for memdb operations
pub type DbResult<T> = Result<T, DbError>;

/// memdb errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown index '{index}' on table '{table}'")]
    UnknownIndex { table: String, index: String },

    #[error("Cannot encode value for index '{index}': {reason}")]
    Encoding { index: String, reason: String },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Record in table '{0}' has no usable 'id' field")]
    MissingId(String),

    #[error("Record is missing field '{field}' required by index '{index}'")]
    MissingIndexField { index: String, field: String },

    #[error("Unique index '{index}' on table '{table}' already holds another record for this value")]
    UniqueViolation { table: String, index: String },

    #[error("Record '{id}' not found in table '{table}'")]
    NotFound { table: String, id: String },

    #[error("Transaction is read-only")]
    ReadOnlyTransaction,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DbError {
    /// Returns the stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            DbError::UnknownTable(_) => "MEMDB_UNKNOWN_TABLE",
            DbError::UnknownIndex { .. } => "MEMDB_UNKNOWN_INDEX",
            DbError::Encoding { .. } => "MEMDB_ENCODING",
            DbError::InvalidSchema(_) => "MEMDB_INVALID_SCHEMA",
            DbError::InvalidConfig(_) => "MEMDB_INVALID_CONFIG",
            DbError::MissingId(_) => "MEMDB_MISSING_ID",
            DbError::MissingIndexField { .. } => "MEMDB_MISSING_INDEX_FIELD",
            DbError::UniqueViolation { .. } => "MEMDB_UNIQUE_VIOLATION",
            DbError::NotFound { .. } => "MEMDB_NOT_FOUND",
            DbError::ReadOnlyTransaction => "MEMDB_READ_ONLY_TXN",
            DbError::Internal(_) => "MEMDB_INTERNAL",
        }
    }

    /// Returns whether this error comes from index resolution
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            DbError::UnknownTable(_) | DbError::UnknownIndex { .. } | DbError::Encoding { .. }
        )
    }

    pub(crate) fn encoding(index: &str, reason: impl Into<String>) -> Self {
        DbError::Encoding {
            index: index.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn poisoned(what: &str) -> Self {
        DbError::Internal(format!("{} lock poisoned", what))
    }
}
