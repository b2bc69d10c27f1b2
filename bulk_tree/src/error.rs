//! Error types

use thiserror::Error;

/// Contract violations reported by a [crate::Cursor]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IterError {
    /// The map was structurally modified by something other than this cursor
    /// since the cursor was created or last synchronized
    #[error("stale cursor: the map was modified since the cursor was last used")]
    ConcurrentModification,
    /// `next` was called after all entries were yielded
    #[error("cursor is at the end of the map")]
    Exhausted,
    /// `remove` was called without a preceding `next`, or twice in a row
    #[error("cursor has no current entry to remove")]
    NoCurrent,
    /// The cursor was created by a different map
    #[error("cursor used with a map other than the one that created it")]
    ForeignMap,
}

/// A broken structural invariant found by [crate::TreeMap::check_invariants].
/// These indicate internal corruption and are never recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("found out of order data in tree: {0}")]
    OutOfOrder(&'static str),
    #[error("count wrong: {len}, should be {counted}")]
    CountMismatch { len: usize, counted: usize },
    #[error("arena holds {arena} nodes but the tree reaches {counted}")]
    LeakedNodes { arena: usize, counted: usize },
    #[error("tree link points to an invalid node")]
    DanglingLink,
    #[error("malformed cyclic list: {0}")]
    MalformedList(&'static str),
    #[error("list is not strictly ascending")]
    UnsortedList,
    #[error("broken node arena: {0}")]
    Arena(&'static str),
}
