//! Conversions between the tree and sorted cyclic doubly linked lists, and the
//! merge sort over such lists.
//!
//! A list is named by `Option<PNode>`, `None` being the empty list and
//! `Some(head)` naming any node of the cycle as its head. Within this module
//! `Node::left` is `prev` and `Node::right` is `next`. For a well formed list,
//! following `next` from the head visits every cell exactly once and returns to
//! the head, and `prev` is the exact inverse of `next`.

use alloc::vec::Vec;
use core::cmp::Ordering;

use compare::Compare;

use crate::{error::InvariantError, tree_map::PNode, TreeMap};

impl<K, V, C> TreeMap<K, V, C> {
    #[inline]
    fn prev(&self, p: PNode) -> PNode {
        self.a[p].left.unwrap()
    }

    #[inline]
    fn next(&self, p: PNode) -> PNode {
        self.a[p].right.unwrap()
    }

    #[inline]
    fn link(&mut self, p0: PNode, p1: PNode) {
        self.a[p0].right = Some(p1);
        self.a[p1].left = Some(p0);
    }

    /// Checks that `head` is empty or a well formed cyclic list
    pub(crate) fn _check_list(&self, head: Option<PNode>) -> Result<(), InvariantError> {
        let head = match head {
            Some(head) => head,
            None => return Ok(()),
        };
        let mut p = head;
        // a well formed list cannot have more cells than the arena
        for _ in 0..self.a.len() {
            let node = self.a.get(p).ok_or(InvariantError::DanglingLink)?;
            let next = node
                .right
                .ok_or(InvariantError::MalformedList("`next` is missing"))?;
            let prev = node
                .left
                .ok_or(InvariantError::MalformedList("`prev` is missing"))?;
            let next_node = self.a.get(next).ok_or(InvariantError::DanglingLink)?;
            let prev_node = self.a.get(prev).ok_or(InvariantError::DanglingLink)?;
            if next_node.left != Some(p) {
                return Err(InvariantError::MalformedList("`next.prev` mismatch"))
            }
            if prev_node.right != Some(p) {
                return Err(InvariantError::MalformedList("`prev.next` mismatch"))
            }
            p = next;
            if p == head {
                return Ok(())
            }
        }
        Err(InvariantError::MalformedList("does not cycle back to its head"))
    }

    /// Counts the cells of a well formed list
    pub(crate) fn length(&self, l: Option<PNode>) -> usize {
        let head = match l {
            Some(head) => head,
            None => return 0,
        };
        let mut count = 1;
        let mut p = self.next(head);
        while p != head {
            count += 1;
            p = self.next(p);
        }
        count
    }

    /// Adds the detached node `n` to the end of the list `l`
    pub(crate) fn push_back(&mut self, l: Option<PNode>, n: PNode) -> PNode {
        match l {
            None => {
                self.link(n, n);
                n
            }
            Some(head) => {
                let tail = self.prev(head);
                self.link(tail, n);
                self.link(n, head);
                head
            }
        }
    }

    /// Splices `l2` onto the end of `l1` in `O(1)`
    pub(crate) fn append(&mut self, l1: Option<PNode>, l2: Option<PNode>) -> Option<PNode> {
        let (head1, head2) = match (l1, l2) {
            (None, l2) => return l2,
            (l1, None) => return l1,
            (Some(head1), Some(head2)) => (head1, head2),
        };
        let tail1 = self.prev(head1);
        let tail2 = self.prev(head2);
        self.link(tail1, head2);
        self.link(tail2, head1);
        Some(head1)
    }

    /// Keeps the first `n` cells of the nonempty list `l` as a list of their
    /// own and returns the rest as a second, possibly empty, list.
    ///
    /// # Panics
    ///
    /// If `n` is 0. `n` must not be greater than the length of `l`.
    pub(crate) fn split(&mut self, l: PNode, n: usize) -> Option<PNode> {
        assert!(n > 0, "split needs to keep a positive number of cells");
        let mut last = l;
        for _ in 1..n {
            last = self.next(last);
        }
        let rest_head = self.next(last);
        if rest_head == l {
            // `n` was the whole length
            return None
        }
        let rest_tail = self.prev(l);
        self.link(last, l);
        self.link(rest_tail, rest_head);
        Some(rest_head)
    }

    /// Converts the subtree at `root` into a sorted cyclic list of the same
    /// nodes, by an in-order walk appending each node as it is visited.
    pub(crate) fn flatten(&mut self, root: Option<PNode>) -> Option<PNode> {
        let mut res = None;
        let mut pending: Vec<PNode> = Vec::new();
        let mut cur = root;
        loop {
            while let Some(p) = cur {
                pending.push(p);
                cur = self.a[p].left;
            }
            let p = match pending.pop() {
                Some(p) => p,
                None => break,
            };
            // the left subtree of `p` is already in `res`, and its right subtree
            // must be read before `push_back` overwrites the links
            cur = self.a[p].right;
            res = Some(self.push_back(res, p));
        }
        res
    }

    /// Converts a sorted list of exactly `count` cells into a height balanced
    /// tree of the same nodes, with the cell after the first `count / 2`
    /// becoming the root.
    pub(crate) fn rebuild(&mut self, l: Option<PNode>, count: usize) -> Option<PNode> {
        let head = match (l, count) {
            (_, 0) => return None,
            (Some(head), _) => head,
            (None, _) => panic!("list is shorter than `count`"),
        };
        if count == 1 {
            let node = &mut self.a[head];
            node.left = None;
            node.right = None;
            return Some(head)
        }
        let mid = count / 2;
        // `mid > 0` since `count >= 2`
        let root = self.split(head, mid).unwrap();
        let rest = self.split(root, 1);
        let left = self.rebuild(Some(head), mid);
        let right = self.rebuild(rest, count - mid - 1);
        let node = &mut self.a[root];
        node.left = left;
        node.right = right;
        Some(root)
    }
}

impl<K, V, C: Compare<K>> TreeMap<K, V, C> {
    /// Checks that `head` is a well formed list with strictly ascending keys
    pub(crate) fn _check_sorted(&self, head: Option<PNode>) -> Result<(), InvariantError> {
        self._check_list(head)?;
        let head = match head {
            Some(head) => head,
            None => return Ok(()),
        };
        let mut p = head;
        loop {
            let next = self.next(p);
            if next == head {
                return Ok(())
            }
            if self.cmp.compare(&self.a[p].k, &self.a[next].k) != Ordering::Less {
                return Err(InvariantError::UnsortedList)
            }
            p = next;
        }
    }

    /// Escalates a malformed or unsorted list in checked builds
    #[inline]
    #[track_caller]
    pub(crate) fn debug_check_sorted(&self, head: Option<PNode>, context: &'static str) {
        if cfg!(any(debug_assertions, feature = "check_invariants")) {
            if let Err(e) = self._check_sorted(head) {
                self.reporter.report(&alloc::format!("{e}"));
                panic!("invariant broken {context}: {e}")
            }
        }
    }

    /// Sorts the list `l` of exactly `size` cells by top down merge sort.
    /// Cells with equal keys are collapsed into the one that came last in `l`.
    pub(crate) fn sort(&mut self, l: Option<PNode>, size: usize) -> Option<PNode> {
        if size <= 1 {
            return l
        }
        // `size >= 2` means `l` is not empty
        let head = l.unwrap();
        let mid = size / 2;
        let rest = self.split(head, mid);
        let left = self.sort(Some(head), mid);
        let right = self.sort(rest, size - mid);
        let res = self.merge(left, right);
        self.debug_check_sorted(res, "at end of sort");
        res
    }

    /// Merges two sorted lists into one sorted list. When both lists have a
    /// cell with the same key, the cell from `l2` is kept and the one from `l1`
    /// is dropped, so `l2` should hold the newer entries.
    pub(crate) fn merge(&mut self, l1: Option<PNode>, l2: Option<PNode>) -> Option<PNode> {
        self.debug_check_sorted(l1, "at beginning of merge");
        self.debug_check_sorted(l2, "at beginning of merge");
        let (mut l1, mut l2) = (l1, l2);
        let mut res = None;
        while let (Some(head1), Some(head2)) = (l1, l2) {
            match self.cmp.compare(&self.a[head1].k, &self.a[head2].k) {
                Ordering::Less => {
                    l1 = self.split(head1, 1);
                    res = Some(self.push_back(res, head1));
                }
                Ordering::Equal => {
                    l2 = self.split(head2, 1);
                    res = Some(self.push_back(res, head2));
                    l1 = self.split(head1, 1);
                    // the detached older entry is dropped
                    let _ = self.a.remove(head1);
                }
                Ordering::Greater => {
                    l2 = self.split(head2, 1);
                    res = Some(self.push_back(res, head2));
                }
            }
        }
        // at most one of these is nonempty
        res = self.append(res, l1);
        res = self.append(res, l2);
        self.debug_check_sorted(res, "at end of merge");
        res
    }
}
