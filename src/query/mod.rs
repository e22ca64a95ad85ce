//! Indexed query and pagination layer
//!
//! Runs inside a transaction's snapshot:
//!
//! 1. Resolve the index and encode the prefix from the index values
//! 2. Fetch the snapshot's tree for that index
//! 3. Scan the prefix range once, in one direction, stopping as soon as the
//!    answer is known
//!
//! # Invariants
//!
//! - Filters run before offset and limit
//! - `limit` is clamped to `1..=max_page_size`, `offset` to `>= 0`
//! - Scans never mutate the tree
//! - Errors come only from index resolution

mod count;
mod options;
mod paginate;

pub use options::{CountOptions, Filter, GetOptions, Window};

use crate::db::DbShared;
use crate::observability::{Event, Severity};

fn trace_query(db: &DbShared, event: Event, table: &str, index: &str, scanned: u64, returned: usize) {
    if db.log_enabled(Severity::Trace) {
        let scanned = scanned.to_string();
        let returned = returned.to_string();
        db.log(
            Severity::Trace,
            event,
            &[
                ("index", index),
                ("returned", &returned),
                ("scanned", &scanned),
                ("table", table),
            ],
        );
    }
}
