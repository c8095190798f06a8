use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use prime_table::{DoublingPrimes, DynamicHashMap, HashMap, HashSet, Params};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn strategies() -> [(&'static str, Params); 3] {
    [
        ("chain", Params::chain(31, 7)),
        ("linear", Params::linear(31, 7)),
        ("double", Params::double(31, 37, 5, 7)),
    ]
}

fn bench_insert(c: &mut Criterion) {
    let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
    for (name, params) in strategies() {
        c.bench_function(&format!("set_insert_10k_{}", name), |b| {
            b.iter_batched(
                || HashSet::with_source(params, DoublingPrimes).unwrap(),
                |mut s| {
                    for k in &keys {
                        let _ = s.insert(k.as_str());
                    }
                    black_box(s)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_find_hit(c: &mut Criterion) {
    let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
    for (name, params) in strategies() {
        let mut m = HashMap::with_source(params, DoublingPrimes).unwrap();
        for (i, k) in keys.iter().enumerate() {
            let _ = m.insert(k.as_str(), i as u64);
        }
        let mut it = keys.iter().cycle();
        c.bench_function(&format!("map_get_hit_{}", name), |b| {
            b.iter(|| {
                let k = it.next().unwrap();
                black_box(m.get(k));
            })
        });
    }
}

fn bench_find_miss(c: &mut Criterion) {
    for (name, params) in strategies() {
        let mut s = HashSet::with_source(params, DoublingPrimes).unwrap();
        for x in lcg(11).take(10_000) {
            let _ = s.insert(key(x));
        }
        let mut miss = lcg(0xdead_beef);
        c.bench_function(&format!("set_contains_miss_{}", name), |b| {
            b.iter(|| {
                // generate keys unlikely in the set
                let k = key(miss.next().unwrap());
                black_box(s.contains(&k));
            })
        });
    }
}

fn bench_dynamic_insert(c: &mut Criterion) {
    let keys: Vec<_> = lcg(3).take(10_000).map(key).collect();
    c.bench_function("dynamic_map_insert_10k_chain", |b| {
        b.iter_batched(
            || DynamicHashMap::with_source(Params::chain(31, 7), DoublingPrimes).unwrap(),
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    let _ = m.insert(k.as_str(), i);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_find_hit, bench_find_miss, bench_dynamic_insert
}
criterion_main!(benches);
