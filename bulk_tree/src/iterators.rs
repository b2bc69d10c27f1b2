//! Iterators for `TreeMap`. All of them iterate in ascending key order by an
//! in-order walk with an explicit stack of pending ancestors.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::{
    tree_map::{NodeArena, PNode},
    TreeMap,
};

/// Pushes `p` and its chain of left children
#[inline]
fn push_left_spine<K, V>(a: &NodeArena<K, V>, pending: &mut Vec<PNode>, mut p: Option<PNode>) {
    while let Some(inner) = p {
        pending.push(inner);
        p = a[inner].left;
    }
}

/// An iterator over `(&K, &V)`
pub struct Iter<'a, K, V> {
    a: &'a NodeArena<K, V>,
    pending: Vec<PNode>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let p = self.pending.pop()?;
        let a = self.a;
        let node = &a[p];
        push_left_spine(a, &mut self.pending, node.right);
        self.remaining -= 1;
        Some((&node.k, &node.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An iterator over `&K`
pub struct Keys<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// An iterator over `&V`
pub struct Values<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

/// An owning iterator over `(K, V)`
pub struct IntoIter<K, V> {
    a: NodeArena<K, V>,
    pending: Vec<PNode>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let p = self.pending.pop()?;
        let node = self.a.remove(p).unwrap();
        push_left_spine(&self.a, &mut self.pending, node.right);
        Some((node.k, node.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.a.len(), Some(self.a.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, C> TreeMap<K, V, C> {
    /// Iteration over `(&K, &V)` in ascending key order
    pub fn iter(&self) -> Iter<K, V> {
        let mut pending = Vec::new();
        push_left_spine(&self.a, &mut pending, self.root);
        Iter {
            a: &self.a,
            pending,
            remaining: self.len,
        }
    }

    /// Iteration over `&K` in ascending order
    pub fn keys(&self) -> Keys<K, V> {
        Keys { iter: self.iter() }
    }

    /// Iteration over `&V` in ascending key order
    pub fn values(&self) -> Values<K, V> {
        Values { iter: self.iter() }
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        let mut pending = Vec::new();
        push_left_spine(&self.a, &mut pending, self.root);
        IntoIter { a: self.a, pending }
    }
}
