//! Property tests using `BTreeMap` as an oracle

use std::collections::BTreeMap;

use bulk_tree::TreeMap;
use proptest::prelude::*;
use testcrate::{assert_same, balanced_height};

/// Small keys so that batches collide with each other and with the map
fn entries(max_count: usize) -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((0..64u64, any::<u64>()), 0..=max_count)
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u64, u64),
    Remove(u64),
    BulkPut(Vec<(u64, u64)>),
    Rebalance,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..64u64, any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => (0..64u64).prop_map(Op::Remove),
        1 => entries(48).prop_map(Op::BulkPut),
        1 => Just(Op::Rebalance),
    ]
}

proptest! {
    #[test]
    fn iteration_is_sorted(singles in entries(64), batch in entries(128)) {
        let mut map = TreeMap::new();
        for (k, v) in singles {
            map.insert(k, v);
        }
        map.bulk_put(batch);
        let keys: Vec<u64> = map.keys().copied().collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(keys.len(), map.len());
    }

    #[test]
    fn bulk_put_semantics(singles in entries(64), batch in entries(128)) {
        let mut map = TreeMap::new();
        let mut oracle = BTreeMap::new();
        for (k, v) in singles {
            map.insert(k, v);
            oracle.insert(k, v);
        }
        let len = map.len();
        let version = map.version();
        // batch entries replace existing ones and later batch entries win
        for (k, v) in batch.iter().copied() {
            oracle.insert(k, v);
        }
        let rebuilt = batch.len() > len;
        map.bulk_put(batch);
        assert_same(&map, &oracle);
        if rebuilt {
            prop_assert_eq!(map.version(), version + 1);
            prop_assert_eq!(map.height(), balanced_height(map.len()));
        }
    }

    #[test]
    fn rebalance_keeps_entries(singles in entries(128)) {
        let mut map = TreeMap::new();
        for (k, v) in singles.iter().copied() {
            map.insert(k, v);
        }
        let before: Vec<(u64, u64)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let height = map.height();
        map.rebalance();
        let after: Vec<(u64, u64)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(before, after);
        prop_assert!(map.height() <= height);
        prop_assert_eq!(map.height(), balanced_height(map.len()));
        TreeMap::_check_invariants(&map).unwrap();
    }

    #[test]
    fn reads_change_nothing(singles in entries(64), probes in prop::collection::vec(0..64u64, 0..32)) {
        let map: TreeMap<u64, u64> = singles.into_iter().collect();
        let version = map.version();
        let len = map.len();
        let height = map.height();
        for k in probes {
            let _ = map.get(&k);
            let _ = map.contains_key(&k);
            let _ = map.cursor().has_next(&map);
            let _ = map.iter().count();
        }
        prop_assert_eq!(map.version(), version);
        prop_assert_eq!(map.len(), len);
        prop_assert_eq!(map.height(), height);
    }

    #[test]
    fn random_ops(ops in prop::collection::vec(op(), 0..64)) {
        let mut map = TreeMap::new();
        let mut oracle = BTreeMap::new();
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), oracle.insert(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), oracle.remove(&k));
                }
                Op::BulkPut(batch) => {
                    oracle.extend(batch.iter().copied());
                    map.extend(batch);
                }
                Op::Rebalance => map.rebalance(),
            }
            assert_same(&map, &oracle);
        }
    }
}
