use backyard::hashing::{CarterWegmanHash, TornadoHash};
use backyard::{BackyardCuckoo, Config, HashFunction};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;

const SEED: u64 = 42;
const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Bins at half load, with the cuckoo tables taking the overflow.
fn config_for(size: usize) -> Config {
    Config {
        num_bins: size / 2,
        bin_capacity: 4,
        cuckoo_table_size: size / 4,
        queue_n: 64,
        queue_k: 4,
        detector_elements: 64,
        detector_n: 32,
        detector_k: 4,
        insert_iterations: 16,
    }
}

fn generate_keys(size: usize) -> Vec<u64> {
    let mut rng = ChaCha20Rng::seed_from_u64(SEED);
    (0..size).map(|_| rng.random()).collect()
}

fn filled<H: HashFunction>(keys: &[u64]) -> BackyardCuckoo<u64, H> {
    let mut dictionary = BackyardCuckoo::new(&config_for(keys.len()), SEED).unwrap();
    for &key in keys {
        dictionary.insert(key).unwrap();
    }
    dictionary
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in SIZES {
        let keys = generate_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Tornado", size), &keys, |b, keys| {
            b.iter(|| black_box(filled::<TornadoHash>(keys)));
        });

        group.bench_with_input(BenchmarkId::new("CarterWegman", size), &keys, |b, keys| {
            b.iter(|| black_box(filled::<CarterWegmanHash>(keys)));
        });

        group.bench_with_input(BenchmarkId::new("HashSet", size), &keys, |b, keys| {
            b.iter(|| {
                let mut set = HashSet::with_capacity(keys.len());
                for &key in keys {
                    set.insert(key);
                }
                black_box(set)
            });
        });
    }

    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains");

    for size in SIZES {
        let keys = generate_keys(size);
        let dictionary = filled::<TornadoHash>(&keys);
        let misses = generate_keys(2 * size).split_off(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("hits", size), &keys, |b, keys| {
            b.iter(|| keys.iter().filter(|key| dictionary.contains(key)).count());
        });

        group.bench_with_input(BenchmarkId::new("misses", size), &misses, |b, misses| {
            b.iter(|| misses.iter().filter(|key| dictionary.contains(key)).count());
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");

    for size in SIZES {
        let keys = generate_keys(size);
        let dictionary = filled::<TornadoHash>(&keys);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.iter_batched(
                || dictionary.clone(),
                |mut dictionary| {
                    for key in keys {
                        dictionary.remove(key);
                    }
                    dictionary
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_contains, bench_remove);
criterion_main!(benches);
