#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use primemap::{ChainedHashMap, QuadraticHashMap, sip_hash};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;
const INITIAL_CAPACITY: usize = 11;

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = vec((any::<String>(), any::<String>()), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    group.bench_function("quadratic put", |b| {
        b.iter(|| {
            let mut map = QuadraticHashMap::new(INITIAL_CAPACITY, sip_hash);
            for (key, value) in items.clone() {
                map.put(key, value);
            }
            map
        });
    });
    group.bench_function("chained put", |b| {
        b.iter(|| {
            let mut map = ChainedHashMap::new(INITIAL_CAPACITY, sip_hash);
            for (key, value) in items.clone() {
                map.put(key, value);
            }
            map
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            let mut map = HashMap::with_capacity(INITIAL_CAPACITY);
            for (key, value) in items.clone() {
                map.insert(key, value);
            }
            map
        });
    });

    let mut quadratic_map = QuadraticHashMap::new(INITIAL_CAPACITY, sip_hash);
    quadratic_map.extend(items.iter().cloned());
    let mut chained_map = ChainedHashMap::new(INITIAL_CAPACITY, sip_hash);
    chained_map.extend(items.iter().cloned());
    let rust_map: HashMap<String, String> = items.iter().cloned().collect();

    group.bench_function("quadratic get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| quadratic_map.get(key).is_some()).count());
    });
    group.bench_function("chained get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| chained_map.get(key).is_some()).count());
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| rust_map.contains_key(key)).count());
    });
    group.finish();
}

criterion_group!(benches, hash_map_benches);

criterion_main!(benches);
