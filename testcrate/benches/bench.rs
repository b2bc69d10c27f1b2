use std::{collections::BTreeMap, hint::black_box};

use bulk_tree::TreeMap;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};

fn entries(n: usize) -> Vec<(u64, u64)> {
    let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    (0..n).map(|i| (rng.next_u64(), i as u64)).collect()
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for size in [1_000, 10_000, 100_000] {
        let batch = entries(size);
        group.bench_with_input(BenchmarkId::new("insert", size), &batch, |b, batch| {
            b.iter(|| {
                let mut map = TreeMap::new();
                for (k, v) in batch.iter().copied() {
                    map.insert(k, v);
                }
                black_box(map)
            })
        });
        group.bench_with_input(BenchmarkId::new("bulk_put", size), &batch, |b, batch| {
            b.iter(|| {
                let mut map = TreeMap::new();
                map.bulk_put(batch.iter().copied());
                black_box(map)
            })
        });
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &batch, |b, batch| {
            b.iter(|| black_box(batch.iter().copied().collect::<BTreeMap<u64, u64>>()))
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for size in [1_000, 10_000] {
        // one more than the map so `bulk_put` merges
        let batch = entries(2 * size + 1);
        let (old, new) = batch.split_at(size);
        let base: TreeMap<u64, u64> = old.iter().copied().collect();
        group.bench_with_input(BenchmarkId::new("bulk_put", size), &new, |b, new| {
            b.iter(|| {
                let mut map = base.clone();
                map.bulk_put(new.iter().copied());
                black_box(map)
            })
        });
        group.bench_with_input(BenchmarkId::new("insert", size), &new, |b, new| {
            b.iter(|| {
                let mut map = base.clone();
                for (k, v) in new.iter().copied() {
                    map.insert(k, v);
                }
                black_box(map)
            })
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let batch = entries(100_000);
    let map: TreeMap<u64, u64> = batch.iter().copied().collect();
    let mut rng = Xoshiro128StarStar::seed_from_u64(1);
    c.bench_function("get", |b| {
        b.iter(|| {
            let (k, _) = batch[(rng.next_u32() as usize) % batch.len()];
            black_box(map.get(&k))
        })
    });
    c.bench_function("iter", |b| b.iter(|| black_box(map.values().sum::<u64>())));
}

criterion_group!(benches, bench_load, bench_merge, bench_lookup);
criterion_main!(benches);
