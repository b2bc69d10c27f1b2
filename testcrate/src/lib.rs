use std::{
    cell::Cell,
    cmp::Ordering,
    collections::BTreeMap,
    rc::Rc,
    sync::{Arc, Mutex},
};

use bulk_tree::{Compare, Reporter, TreeMap};
use rand_xoshiro::{rand_core::RngCore, Xoshiro128StarStar};

/// The height of a tree with `n` nodes rebuilt from a sorted list, which is
/// the number of bits needed to represent `n`
pub fn balanced_height(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

/// Returns a reporter that collects every message into the returned buffer
pub fn capture_reporter() -> (Reporter, Arc<Mutex<Vec<String>>>) {
    let buf = Arc::new(Mutex::new(vec![]));
    let sink = buf.clone();
    (
        Reporter::new(move |s| sink.lock().unwrap().push(s.to_owned())),
        buf,
    )
}

/// A natural order comparator that counts how many times it is called
#[derive(Clone)]
pub struct CountingCmp {
    pub count: Rc<Cell<u64>>,
}

impl CountingCmp {
    pub fn new() -> Self {
        Self {
            count: Rc::new(Cell::new(0)),
        }
    }

    pub fn get(&self) -> u64 {
        self.count.get()
    }

    pub fn reset(&self) {
        self.count.set(0)
    }
}

impl Default for CountingCmp {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Compare<K> for CountingCmp {
    fn compare(&self, l: &K, r: &K) -> Ordering {
        self.count.set(self.count.get() + 1);
        l.cmp(r)
    }
}

/// Generates `n` entries with keys in `0..max_key`, so that collisions are
/// likely, and with unique increasing values taken from `counter`
pub fn fuzz_batch(
    rng: &mut Xoshiro128StarStar,
    counter: &mut u64,
    n: usize,
    max_key: u64,
) -> Vec<(u64, u64)> {
    let mut v = vec![];
    for _ in 0..n {
        *counter += 1;
        v.push((rng.next_u64() % max_key, *counter));
    }
    v
}

/// Panics if `a` does not hold exactly the entries of `b`, or if its
/// invariants are broken
pub fn assert_same<C: Compare<u64>>(a: &TreeMap<u64, u64, C>, b: &BTreeMap<u64, u64>) {
    if let Err(e) = TreeMap::_check_invariants(a) {
        panic!("{e}");
    }
    assert_eq!(a.len(), b.len());
    assert_eq!(a.is_empty(), b.is_empty());
    assert!(a.iter().eq(b.iter()));
    assert_eq!(a.iter().len(), b.len());
}
