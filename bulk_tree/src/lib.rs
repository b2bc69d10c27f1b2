//! An ordered map stored as a binary search tree on an arena, with a bulk
//! loading path that converts the tree into a sorted cyclic doubly linked
//! list, merge sorts the incoming entries, merges the two lists, and rebuilds
//! a balanced tree out of the same nodes.
//!
//! See [TreeMap] for the map itself and [Cursor] for fail-fast iteration that
//! supports removal.

// false positives
#![allow(clippy::while_let_on_iterator)]

mod cursor;
pub mod error;
pub mod iterators;
mod reporter;
#[cfg(feature = "expose_internal_utils")]
pub mod spy;
mod tree_map;

pub use compare::{Compare, Natural};
pub use cursor::Cursor;
pub use error::{InvariantError, IterError};
pub use reporter::Reporter;
pub use tree_map::TreeMap;

extern crate alloc;
