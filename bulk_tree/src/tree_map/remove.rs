use core::mem;

use compare::Compare;

use crate::{tree_map::PNode, TreeMap};

impl<K, V, C: Compare<K>> TreeMap<K, V, C> {
    /// Removes the entry with a key equal to `k` and returns its value. Does
    /// nothing if there is no such entry.
    pub fn remove(&mut self, k: &K) -> Option<V> {
        self.remove_entry(k).map(|(_, v)| v)
    }

    /// Removes the entry with a key equal to `k` and returns the stored key
    /// and value
    pub fn remove_entry(&mut self, k: &K) -> Option<(K, V)> {
        self.debug_check("at beginning of remove");
        let (p, parent) = self.find_with_parent(k)?;
        let res = self.remove_found(p, parent);
        self.debug_check("at end of remove");
        Some(res)
    }

    /// Removes the entry with a key equal to `k` only if `pred` returns `true`
    /// for its value
    pub fn remove_entry_if<F: FnOnce(&V) -> bool>(&mut self, k: &K, pred: F) -> Option<(K, V)> {
        self.debug_check("at beginning of remove_entry_if");
        let (p, parent) = self.find_with_parent(k)?;
        if !pred(&self.a[p].v) {
            return None
        }
        let res = self.remove_found(p, parent);
        self.debug_check("at end of remove_entry_if");
        Some(res)
    }

    /// Removes the entry stored in node `p`. Returns `None` if `p` is not a
    /// node of this tree.
    pub(crate) fn remove_node(&mut self, p: PNode) -> Option<(K, V)> {
        self.debug_check("at beginning of remove_node");
        let parent = {
            let k = &self.a.get(p)?.k;
            let (found, parent) = self.find_with_parent(k)?;
            if found != p {
                return None
            }
            parent
        };
        let res = self.remove_found(p, parent);
        self.debug_check("at end of remove_node");
        Some(res)
    }

    /// Unlinks the entry at `n`, where `parent` is as returned by
    /// `find_with_parent`.
    fn remove_found(&mut self, n: PNode, parent: Option<(PNode, bool)>) -> (K, V) {
        self.version = self.version.wrapping_add(1);
        self.len -= 1;
        let (left, right) = (self.a[n].left, self.a[n].right);
        let t = match left {
            None => {
                // the right subtree takes the place of `n`
                self.connect(parent, right);
                let node = self.a.remove(n).unwrap();
                return (node.k, node.v)
            }
            Some(t) => t,
        };
        if self.a[t].right.is_none() {
            // the left child takes the place of `n` and inherits its right subtree
            self.a[t].right = right;
            self.connect(parent, Some(t));
            let node = self.a.remove(n).unwrap();
            return (node.k, node.v)
        }
        // Find the in-order predecessor, the rightmost node of the left
        // subtree. It has no right child, so its own left subtree can take its
        // place, after which its entry moves into the slot of `n`.
        //
        //        n                pred
        //       / \               / \
        //      t  ...     ->     t  ...
        //       \                 \
        //        x                 x
        //       / \               / \
        //     ...  pred         ...  l
        //         /
        //        l
        let mut pred_parent = t;
        let mut pred = self.a[t].right.unwrap();
        while let Some(right) = self.a[pred].right {
            pred_parent = pred;
            pred = right;
        }
        let pred_left = self.a[pred].left;
        self.a[pred_parent].right = pred_left;
        let pred_node = self.a.remove(pred).unwrap();
        let node = &mut self.a[n];
        let k = mem::replace(&mut node.k, pred_node.k);
        let v = mem::replace(&mut node.v, pred_node.v);
        (k, v)
    }
}
