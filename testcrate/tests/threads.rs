use std::{
    sync::{Arc, Mutex},
    thread,
};

use bulk_tree::{Cursor, Reporter, TreeMap};
use testcrate::capture_reporter;

fn _assert_send_sync<T: Send + Sync>() {}

#[test]
fn send_sync() {
    _assert_send_sync::<TreeMap<u64, u64>>();
    _assert_send_sync::<TreeMap<String, Vec<u8>>>();
    _assert_send_sync::<Reporter>();
    _assert_send_sync::<Cursor>();
}

#[test]
fn shared_behind_a_lock() {
    let (reporter, msgs) = capture_reporter();
    let map = Arc::new(Mutex::new(TreeMap::<u64, u64>::new().with_reporter(reporter)));
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let map = map.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    map.lock().unwrap().insert(i * 4 + t, t);
                }
                let batch: Vec<(u64, u64)> = (0..200).map(|i| (1000 + i * 4 + t, t)).collect();
                map.lock().unwrap().bulk_put(batch);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let map = map.lock().unwrap();
    assert_eq!(map.len(), 1200);
    assert!(map.keys().zip(map.keys().skip(1)).all(|(x, y)| x < y));
    map.check_invariants().unwrap();
    assert!(msgs.lock().unwrap().is_empty());
}
