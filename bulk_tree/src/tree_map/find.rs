use core::cmp::Ordering;

use compare::Compare;

use crate::{tree_map::PNode, TreeMap};

impl<K, V, C: Compare<K>> TreeMap<K, V, C> {
    /// Descends from the root to the node with a key equal to `k`. Also
    /// returns the parent of that node and whether the node is its right
    /// child, or `None` if the node is the root.
    #[allow(clippy::type_complexity)]
    pub(crate) fn find_with_parent(&self, k: &K) -> Option<(PNode, Option<(PNode, bool)>)> {
        let mut parent = None;
        let mut p = self.root?;
        loop {
            let node = &self.a[p];
            match self.cmp.compare(k, &node.k) {
                Ordering::Less => {
                    parent = Some((p, false));
                    p = node.left?;
                }
                Ordering::Equal => return Some((p, parent)),
                Ordering::Greater => {
                    parent = Some((p, true));
                    p = node.right?;
                }
            }
        }
    }

    /// Returns if there is an entry with a key equal to `k`
    pub fn contains_key(&self, k: &K) -> bool {
        self.find_with_parent(k).is_some()
    }

    /// Returns a reference to the value with a key equal to `k`
    #[must_use]
    pub fn get(&self, k: &K) -> Option<&V> {
        let (p, _) = self.find_with_parent(k)?;
        Some(&self.a[p].v)
    }

    /// Returns the stored key and value for a key equal to `k`
    #[must_use]
    pub fn get_key_value(&self, k: &K) -> Option<(&K, &V)> {
        let (p, _) = self.find_with_parent(k)?;
        let node = &self.a[p];
        Some((&node.k, &node.v))
    }

    /// Returns a mutable reference to the value with a key equal to `k`.
    /// Changing a value is not a structural change.
    #[must_use]
    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        let (p, _) = self.find_with_parent(k)?;
        Some(&mut self.a[p].v)
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Returns the entry with the least key
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut p = self.root?;
        while let Some(left) = self.a[p].left {
            p = left;
        }
        let node = &self.a[p];
        Some((&node.k, &node.v))
    }

    /// Returns the entry with the greatest key
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut p = self.root?;
        while let Some(right) = self.a[p].right {
            p = right;
        }
        let node = &self.a[p];
        Some((&node.k, &node.v))
    }
}
