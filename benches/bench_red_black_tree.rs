use balanced_collections::red_black_tree::RedBlackMap;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 1000;

fn random_keys() -> Vec<u32> {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    (0..NUM_OF_OPERATIONS).map(|_| rng.next_u32()).collect()
}

fn bench_btreemap_insert(c: &mut Criterion) {
    let keys = random_keys();
    c.bench_function("bench btreemap insert", move |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for key in &keys {
                map.insert(*key, *key);
            }
        })
    });
}

fn bench_btreemap_get(c: &mut Criterion) {
    let keys = random_keys();
    let map: BTreeMap<u32, u32> = keys.iter().map(|key| (*key, *key)).collect();
    c.bench_function("bench btreemap get", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_red_black_tree_insert(c: &mut Criterion) {
    let keys = random_keys();
    c.bench_function("bench red_black_tree insert", move |b| {
        b.iter(|| {
            let mut map = RedBlackMap::new();
            for key in &keys {
                map.insert(*key, *key);
            }
        })
    });
}

fn bench_red_black_tree_insert_sorted(c: &mut Criterion) {
    c.bench_function("bench red_black_tree insert sorted", |b| {
        b.iter(|| {
            let mut map = RedBlackMap::new();
            for key in 0..NUM_OF_OPERATIONS {
                map.insert(key, key);
            }
        })
    });
}

fn bench_red_black_tree_get(c: &mut Criterion) {
    let keys = random_keys();
    let map: RedBlackMap<u32, u32> = keys.iter().map(|key| (*key, *key)).collect();
    c.bench_function("bench red_black_tree get", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_red_black_tree_remove(c: &mut Criterion) {
    let keys = random_keys();
    c.bench_function("bench red_black_tree remove", move |b| {
        b.iter(|| {
            let mut map: RedBlackMap<u32, u32> = keys.iter().map(|key| (*key, *key)).collect();
            for key in &keys {
                black_box(map.remove(key));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_btreemap_get,
    bench_btreemap_insert,
    bench_red_black_tree_get,
    bench_red_black_tree_insert,
    bench_red_black_tree_insert_sorted,
    bench_red_black_tree_remove,
);
criterion_main!(benches);
