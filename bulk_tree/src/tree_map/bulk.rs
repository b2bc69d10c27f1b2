use alloc::vec::Vec;

use compare::{Compare, Natural};
use log::{debug, trace};

use crate::{tree_map::Node, TreeMap};

impl<K, V, C: Compare<K>> TreeMap<K, V, C> {
    /// Inserts every entry of `entries`.
    ///
    /// If there are no more incoming entries than there are entries in the
    /// map, they are inserted one at a time. Otherwise, the incoming entries
    /// are put in a list and merge sorted, the tree is flattened into a sorted
    /// list of its own nodes, the two lists are merged, and a height balanced
    /// tree is rebuilt out of the result. The version changes exactly once in
    /// that case.
    ///
    /// Either way, an incoming value replaces the value of an equal key
    /// already in the map, and if `entries` has equal keys the last of them
    /// wins.
    pub fn bulk_put<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        self.debug_check("at beginning of bulk_put");
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        if entries.len() <= self.len {
            debug!(
                "bulk_put: inserting {} entries one at a time into {}",
                entries.len(),
                self.len
            );
            for (k, v) in entries {
                self.insert(k, v);
            }
            return
        }
        debug!(
            "bulk_put: merging {} entries into {} and rebuilding",
            entries.len(),
            self.len
        );
        let size = entries.len();
        let mut incoming = None;
        for (k, v) in entries {
            let p = self.a.insert(Node::new(k, v));
            incoming = Some(self.push_back(incoming, p));
        }
        let incoming = self.sort(incoming, size);
        let root = self.root.take();
        let existing = self.flatten(root);
        self.debug_check_sorted(existing, "after flatten in bulk_put");
        let merged = self.merge(existing, incoming);
        let len = self.length(merged);
        self.debug_check_sorted(merged, "before rebuild in bulk_put");
        self.root = self.rebuild(merged, len);
        trace!("bulk_put: {} entries after rebuild, height {}", len, self.height());
        self.len = len;
        self.version = self.version.wrapping_add(1);
        self.debug_check("at end of bulk_put");
    }

    /// Rebuilds the tree into a height balanced one with the same entries.
    /// This counts as a structural change.
    pub fn rebalance(&mut self) {
        self.debug_check("at beginning of rebalance");
        let root = self.root.take();
        let l = self.flatten(root);
        self.debug_check_sorted(l, "after flatten in rebalance");
        if cfg!(any(debug_assertions, feature = "check_invariants"))
            && (self.length(l) != self.len)
        {
            panic!("invariant broken in rebalance: flattened list is not `len` long")
        }
        self.root = self.rebuild(l, self.len);
        self.version = self.version.wrapping_add(1);
        self.debug_check("at end of rebalance");
    }
}

/// Routes through [TreeMap::bulk_put]
impl<K, V, C: Compare<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.bulk_put(iter);
    }
}

/// Routes through [TreeMap::bulk_put], so the result is height balanced
impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V, Natural<K>> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::new();
        map.bulk_put(iter);
        map
    }
}
