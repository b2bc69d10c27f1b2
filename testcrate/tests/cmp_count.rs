use bulk_tree::TreeMap;
use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};
use testcrate::{balanced_height, CountingCmp};

// checked builds verify both inputs and the output of every merge
const SLACK: u64 = if cfg!(debug_assertions) { 8 } else { 1 };

#[test]
fn bulk_put_comparisons() {
    let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    let cmp = CountingCmp::new();
    let mut map: TreeMap<u64, (), CountingCmp> = TreeMap::with_cmp(cmp.clone());
    let n = 1024u64;
    let log_n = 10;
    let batch: Vec<(u64, ())> = (0..n).map(|_| (rng.next_u64(), ())).collect();
    cmp.reset();
    map.bulk_put(batch);
    assert!(cmp.get() <= SLACK * n * log_n, "{} comparisons", cmp.get());
    assert_eq!(map.height(), balanced_height(map.len()));

    // merging into an existing map of the same size costs about one more
    // pass over both lists
    let batch: Vec<(u64, ())> = (0..(n + 1)).map(|_| (rng.next_u64(), ())).collect();
    cmp.reset();
    map.bulk_put(batch);
    assert!(
        cmp.get() <= SLACK * (n * log_n + 4 * n),
        "{} comparisons",
        cmp.get()
    );
    TreeMap::_check_invariants(&map).unwrap();
}

#[test]
fn lookups_after_rebuild() {
    let cmp = CountingCmp::new();
    let mut map = TreeMap::with_cmp(cmp.clone());
    for k in 0..512u32 {
        map.insert(k, k);
    }
    map.rebalance();
    let height = map.height() as u64;
    assert_eq!(height, 10);
    for k in 0..512u32 {
        cmp.reset();
        assert_eq!(map.get(&k), Some(&k));
        assert!(cmp.get() <= height);
    }
}
