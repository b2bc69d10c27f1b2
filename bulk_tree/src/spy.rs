//! Hooks for corrupting a `TreeMap` so that tests can observe the invariant
//! checker. Only available with the `expose_internal_utils` feature.

use crate::{tree_map::Node, TreeMap};

/// Overwrites the recorded number of entries
pub fn set_len<K, V, C>(map: &mut TreeMap<K, V, C>, len: usize) {
    map.len = len;
}

/// Overwrites the structural version
pub fn set_version<K, V, C>(map: &mut TreeMap<K, V, C>, version: u64) {
    map.version = version;
}

/// Overwrites the key stored at the root, returning the old key
pub fn replace_root_key<K, V, C>(map: &mut TreeMap<K, V, C>, k: K) -> Option<K> {
    let root = map.root?;
    Some(core::mem::replace(&mut map.a[root].k, k))
}

/// Swaps the left and right subtrees of the root
pub fn swap_root_children<K, V, C>(map: &mut TreeMap<K, V, C>) {
    if let Some(root) = map.root {
        let node = &mut map.a[root];
        core::mem::swap(&mut node.left, &mut node.right);
    }
}

/// Allocates a node that is not linked into the tree
pub fn leak_node<K, V, C>(map: &mut TreeMap<K, V, C>, k: K, v: V) {
    let _ = map.a.insert(Node::new(k, v));
}

/// Makes the right link of the root point back to the root
pub fn make_root_cycle<K, V, C>(map: &mut TreeMap<K, V, C>) {
    if let Some(root) = map.root {
        map.a[root].right = Some(root);
    }
}
