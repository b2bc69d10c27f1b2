mod bulk;
mod find;
mod insert;
mod list;
mod remove;

use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    fmt,
    sync::atomic::{AtomicU64, Ordering::Relaxed},
};

use compare::{Compare, Natural};
use triple_arena::{ptr_struct, Arena};

use crate::{error::InvariantError, Reporter};

// handle to a node, the generation invalidates handles to removed nodes
ptr_struct!(PNode);

pub(crate) type NodeArena<K, V> = Arena<PNode, Node<K, V>>;

/// Source of `TreeMap::id`s, so that cursors can tell maps apart
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Relaxed)
}

/// A node of the tree. While the tree is being bulk loaded, the same record is
/// used as a cell of a cyclic doubly linked list with `left` acting as `prev`
/// and `right` acting as `next`. That reinterpretation is confined to the
/// `list` module and never visible outside of a single `&mut self` call.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub k: K,
    pub v: V,
    pub left: Option<PNode>,
    pub right: Option<PNode>,
}

impl<K, V> Node<K, V> {
    pub fn new(k: K, v: V) -> Self {
        Self {
            k,
            v,
            left: None,
            right: None,
        }
    }
}

/// An ordered map stored as a binary search tree on an arena, ordered by a
/// comparator `C` chosen at construction.
///
/// Single insertions and removals work directly on the tree with no automatic
/// rebalancing. Bulk loads through [TreeMap::bulk_put] (and `Extend` and
/// `FromIterator`) that are larger than the map itself flatten the tree into a
/// sorted cyclic list, merge sort the incoming entries into another list, merge
/// the two, and rebuild a height balanced tree out of the same nodes.
///
/// ```
/// use bulk_tree::TreeMap;
///
/// let mut map = TreeMap::new();
/// map.insert(1, "a");
/// map.insert(3, "c");
/// map.insert(2, "b");
/// assert_eq!(map.get(&2), Some(&"b"));
///
/// // the batch is larger than the map, so this takes the rebuild path
/// map.bulk_put((4..10).map(|i| (i, "z")));
/// assert_eq!(map.len(), 9);
/// assert!(map.height() <= 4);
///
/// let keys: Vec<i32> = map.keys().copied().collect();
/// assert_eq!(keys, (1..10).collect::<Vec<_>>());
/// ```
///
/// Any comparator implementing `compare::Compare<K>` can be used, including
/// closures:
///
/// ```
/// use bulk_tree::TreeMap;
///
/// let mut map = TreeMap::with_cmp(|x: &i32, y: &i32| y.cmp(x));
/// map.bulk_put([(1, ()), (2, ()), (3, ())]);
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
/// ```
pub struct TreeMap<K, V, C = Natural<K>> {
    /// Unique among live maps, clones get a new one
    pub(crate) id: u64,
    pub(crate) root: Option<PNode>,
    pub(crate) len: usize,
    /// Incremented on every structural change
    pub(crate) version: u64,
    pub(crate) a: NodeArena<K, V>,
    pub(crate) cmp: C,
    pub(crate) reporter: Reporter,
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates an empty map using the natural order of `K`
    pub fn new() -> Self {
        Self::with_cmp(compare::natural())
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Creates an empty map ordered by `cmp`, which must be a total order
    pub fn with_cmp(cmp: C) -> Self {
        Self {
            id: next_id(),
            root: None,
            len: 0,
            version: 0,
            a: Arena::new(),
            cmp,
            reporter: Reporter::default(),
        }
    }

    /// Replaces the invariant reporter, builder style
    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn set_reporter(&mut self, reporter: Reporter) {
        self.reporter = reporter;
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Returns the comparator
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of key-value entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the structural version stamp. It changes whenever an entry is
    /// added or removed or the tree is rebuilt, and never on reads or on value
    /// replacement.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf, 0 for an empty map
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(PNode, usize)> = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((p, depth)) = stack.pop() {
            max = max.max(depth);
            let node = &self.a[p];
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        max
    }

    /// Removes all entries. The version only changes if there was something
    /// to remove.
    pub fn clear(&mut self) {
        if self.root.is_none() {
            return
        }
        self.root = None;
        self.a.clear();
        self.len = 0;
        self.version = self.version.wrapping_add(1);
    }

    /// Sets `parent`'s link in direction `is_right` to `child`, or makes
    /// `child` the root if there is no parent
    pub(crate) fn connect(&mut self, parent: Option<(PNode, bool)>, child: Option<PNode>) {
        match parent {
            None => self.root = child,
            Some((p, true)) => self.a[p].right = child,
            Some((p, false)) => self.a[p].left = child,
        }
    }
}

impl<K, V, C: Compare<K>> TreeMap<K, V, C> {
    /// Checks the tree without reporting. Used by tests.
    ///
    /// Every key must be strictly between the keys of its ancestors in the
    /// direction of the path taken to reach it, the number of reachable nodes
    /// must equal both `len` and the number of nodes allocated in the arena,
    /// and the arena itself must be consistent.
    #[doc(hidden)]
    pub fn _check_invariants(this: &Self) -> Result<(), InvariantError> {
        Arena::_check_invariants(&this.a).map_err(InvariantError::Arena)?;
        let mut counted = 0usize;
        // (node, lower bound, upper bound), both bounds exclusive
        let mut stack: Vec<(PNode, Option<PNode>, Option<PNode>)> = Vec::new();
        if let Some(root) = this.root {
            stack.push((root, None, None));
        }
        while let Some((p, lower, upper)) = stack.pop() {
            counted += 1;
            if counted > this.a.len() {
                // something is reachable twice
                return Err(InvariantError::LeakedNodes {
                    arena: this.a.len(),
                    counted,
                })
            }
            let node = this.a.get(p).ok_or(InvariantError::DanglingLink)?;
            if let Some(lower) = lower {
                let lower = &this.a.get(lower).ok_or(InvariantError::DanglingLink)?.k;
                if this.cmp.compare(lower, &node.k) != Ordering::Less {
                    return Err(InvariantError::OutOfOrder("key not coming after its lower bound"))
                }
            }
            if let Some(upper) = upper {
                let upper = &this.a.get(upper).ok_or(InvariantError::DanglingLink)?.k;
                if this.cmp.compare(&node.k, upper) != Ordering::Less {
                    return Err(InvariantError::OutOfOrder("key not coming before its upper bound"))
                }
            }
            if let Some(left) = node.left {
                stack.push((left, lower, Some(p)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(p), upper));
            }
        }
        if counted != this.len {
            return Err(InvariantError::CountMismatch {
                len: this.len,
                counted,
            })
        }
        if counted != this.a.len() {
            return Err(InvariantError::LeakedNodes {
                arena: this.a.len(),
                counted,
            })
        }
        Ok(())
    }

    /// Checks all structural invariants, sending a description of the first
    /// problem found to the reporter.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        Self::_check_invariants(self).map_err(|e| {
            self.reporter.report(&alloc::format!("{e}"));
            e
        })
    }

    /// Escalates broken invariants in checked builds
    #[inline]
    #[track_caller]
    pub(crate) fn debug_check(&self, context: &'static str) {
        if cfg!(any(debug_assertions, feature = "check_invariants")) {
            if let Err(e) = self.check_invariants() {
                panic!("invariant broken {context}: {e}")
            }
        }
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for TreeMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            id: next_id(),
            root: self.root,
            len: self.len,
            version: self.version,
            a: self.a.clone(),
            cmp: self.cmp.clone(),
            reporter: self.reporter.clone(),
        }
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Maps are equal if they have equal entries in the same order
impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for TreeMap<K, V, C> {}
