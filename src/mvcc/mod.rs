//! MVCC Domain Types
//!
//! This module provides:
//! - `CommitId` - Totally ordered snapshot version
//! - `Snapshot` - Immutable view of every index, owned by one transaction
//!
//! Readers never block writers and never observe a commit that happened
//! after they started.

mod commit_id;
mod snapshot;

pub use commit_id::CommitId;
pub use snapshot::Snapshot;
