//! CommitId - Totally ordered snapshot version
//!
//! Every committed write transaction publishes a new snapshot stamped with
//! the next commit identity. Read transactions report the identity of the
//! snapshot they observe.

/// A totally ordered, opaque commit identity.
///
/// `CommitId::initial()` stamps the empty snapshot a database starts with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CommitId(u64);

impl CommitId {
    /// Creates a new CommitId with the given value.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The identity of the snapshot a fresh database starts from
    #[inline]
    pub fn initial() -> Self {
        Self(0)
    }

    /// The identity assigned to the commit following this one
    #[inline]
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the underlying value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}
