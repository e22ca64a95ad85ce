//! Index subsystem for memdb
//!
//! Indexes map order-preserving byte keys to records.
//!
//! # Design Principles
//!
//! - Persistent: trees are copy-on-write, published trees are immutable
//! - Deterministic: BTreeMap iteration order
//! - Prefix-bounded traversal in either direction
//!
//! # Invariants
//!
//! - Encoded key order matches value order within a field type
//! - Non-unique index keys end with the encoded primary id

mod key;
mod tree;

pub use key::IndexKey;
pub use tree::{IndexTree, PrefixScan, Record, ScanDirection};
