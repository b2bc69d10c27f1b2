use alloc::vec::Vec;

use compare::Compare;

use crate::{error::IterError, tree_map::PNode, TreeMap};

/// A fail-fast, in-order cursor over a `TreeMap` that does not borrow the map
/// between calls.
///
/// Borrowing iterators like [TreeMap::iter] cannot observe mutation at all,
/// but algorithms that want to remove entries while walking the map (or that
/// hold on to a position across unrelated calls) need something that the
/// borrow checker will let coexist with `&mut TreeMap`. A `Cursor` remembers
/// the version of the map it was synchronized with, and every operation fails
/// with [IterError::ConcurrentModification] if the map has been structurally
/// changed by anything other than the cursor's own [Cursor::remove].
///
/// ```
/// use bulk_tree::{IterError, TreeMap};
///
/// let mut map: TreeMap<u32, &str> = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
///
/// let mut cursor = map.cursor();
/// while let Some((k, _)) = cursor.advance(&map).unwrap() {
///     if k % 2 == 1 {
///         cursor.remove(&mut map).unwrap();
///     }
/// }
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2]);
///
/// let cursor = map.cursor();
/// map.insert(4, "d");
/// assert_eq!(cursor.has_next(&map), Err(IterError::ConcurrentModification));
/// ```
///
/// A `Cursor` can only be used with the map that created it, anything else
/// fails with [IterError::ForeignMap].
#[derive(Debug, Clone)]
pub struct Cursor {
    map_id: u64,
    pending: Vec<PNode>,
    current: Option<PNode>,
    version: u64,
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Returns a [Cursor] positioned before the least entry
    pub fn cursor(&self) -> Cursor {
        let mut pending = Vec::new();
        let mut p = self.root;
        while let Some(inner) = p {
            pending.push(inner);
            p = self.a[inner].left;
        }
        Cursor {
            map_id: self.id,
            pending,
            current: None,
            version: self.version,
        }
    }
}

impl Cursor {
    fn check_version<K, V, C>(&self, map: &TreeMap<K, V, C>) -> Result<(), IterError> {
        if self.map_id != map.id {
            Err(IterError::ForeignMap)
        } else if self.version == map.version {
            Ok(())
        } else {
            Err(IterError::ConcurrentModification)
        }
    }

    /// Returns if there is another entry to yield
    pub fn has_next<K, V, C>(&self, map: &TreeMap<K, V, C>) -> Result<bool, IterError> {
        self.check_version(map)?;
        Ok(!self.pending.is_empty())
    }

    /// Yields the next entry and makes it the current entry
    ///
    /// # Errors
    ///
    /// [IterError::Exhausted] if all entries have been yielded,
    /// [IterError::ConcurrentModification] if the cursor is stale, or
    /// [IterError::ForeignMap] if `map` did not create this cursor
    #[allow(clippy::should_implement_trait)]
    pub fn next<'a, K, V, C>(
        &mut self,
        map: &'a TreeMap<K, V, C>,
    ) -> Result<(&'a K, &'a V), IterError> {
        if !self.has_next(map)? {
            return Err(IterError::Exhausted)
        }
        let p = self.pending.pop().unwrap();
        let node = map.a.get(p).ok_or(IterError::ConcurrentModification)?;
        let mut right = node.right;
        while let Some(inner) = right {
            self.pending.push(inner);
            right = map
                .a
                .get(inner)
                .ok_or(IterError::ConcurrentModification)?
                .left;
        }
        self.current = Some(p);
        Ok((&node.k, &node.v))
    }

    /// The same as [Cursor::next] except that the end of the map is
    /// `Ok(None)`, for use in `while let` loops
    pub fn advance<'a, K, V, C>(
        &mut self,
        map: &'a TreeMap<K, V, C>,
    ) -> Result<Option<(&'a K, &'a V)>, IterError> {
        if self.has_next(map)? {
            self.next(map).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Removes the entry most recently yielded by `next` from `map` and
    /// returns it. The cursor stays usable and continues with the entry after
    /// the removed one.
    ///
    /// # Errors
    ///
    /// [IterError::NoCurrent] if `next` has not been called since the cursor
    /// was created or since the last `remove`. Also fails like `next` for
    /// stale cursors and foreign maps, leaving `map` untouched.
    pub fn remove<K, V, C: Compare<K>>(
        &mut self,
        map: &mut TreeMap<K, V, C>,
    ) -> Result<(K, V), IterError> {
        self.check_version(map)?;
        let p = self.current.ok_or(IterError::NoCurrent)?;
        // Nodes still pending are never freed or moved by removing an entry
        // that was already yielded, so the stack stays valid.
        let res = map
            .remove_node(p)
            .ok_or(IterError::ConcurrentModification)?;
        self.current = None;
        self.version = map.version;
        Ok(res)
    }
}
