//! Schema subsystem for memdb
//!
//! Declares tables and their indexes. Every table carries a unique `id`
//! index, which doubles as the table's primary key and record count.
//!
//! Schemas describe index shape only; record bodies are free-form JSON.

mod types;

pub use types::{DbSchema, FieldType, IndexField, IndexSchema, TableSchema, ID_INDEX};
