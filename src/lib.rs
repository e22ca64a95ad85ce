//! memdb - An in-memory transactional store with snapshot-scoped indexed
//! queries and pagination
//!
//! Every transaction owns an immutable snapshot of all index trees. Queries
//! resolve an index, encode a key prefix, and scan that prefix range once:
//!
//! - `Txn::count` - records in a table
//! - `Txn::count_by` - filtered count under an index prefix
//! - `Txn::get_option` - filtered, windowed, optionally descending page
//!
//! ```ignore
//! use memdb::{GetOptions, MemDb};
//!
//! let txn = db.txn(false)?;
//! let page = txn.get_option(
//!     "main",
//!     "foo",
//!     &GetOptions::new().with_index_value(["5"]).with_offset(10).with_limit(3),
//! )?;
//! ```

pub mod db;
pub mod errors;
pub mod index;
pub mod mvcc;
pub mod observability;
pub mod query;
pub mod schema;
pub mod txn;

pub use db::{DbConfig, MemDb, MAX_PAGE_SIZE};
pub use errors::{DbError, DbResult};
pub use index::{IndexKey, Record};
pub use query::{CountOptions, GetOptions};
pub use schema::{DbSchema, FieldType, IndexField, IndexSchema, TableSchema, ID_INDEX};
pub use txn::Txn;
