use core::{cmp::Ordering, mem};

use compare::Compare;

use crate::{tree_map::Node, TreeMap};

impl<K, V, C: Compare<K>> TreeMap<K, V, C> {
    /// Inserts `v` under the key `k`.
    ///
    /// If an equal key is already present, its value is replaced in place and
    /// the old value is returned. That is not a structural change, so the
    /// version stays the same and the already stored key is kept. Otherwise a
    /// new leaf is linked in and `None` is returned.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        self.debug_check("at beginning of insert");
        let mut parent = None;
        let mut cur = self.root;
        while let Some(p) = cur {
            let node = &self.a[p];
            match self.cmp.compare(&k, &node.k) {
                Ordering::Less => {
                    parent = Some((p, false));
                    cur = node.left;
                }
                Ordering::Equal => return Some(mem::replace(&mut self.a[p].v, v)),
                Ordering::Greater => {
                    parent = Some((p, true));
                    cur = node.right;
                }
            }
        }
        let p_new = self.a.insert(Node::new(k, v));
        self.connect(parent, Some(p_new));
        self.len += 1;
        self.version = self.version.wrapping_add(1);
        self.debug_check("at end of insert");
        None
    }
}
