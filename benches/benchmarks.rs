//! 线性探测表与Cuckoo表性能基准测试

use criterion::{
    criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, PlotConfiguration,
    Throughput,
};
use probe_tables::{CuckooTable, HashTable, Key, LinearProbeTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

// 基准测试配置
const SEED: u64 = 42;
const ITEM_COUNTS: [usize; 3] = [1_000, 10_000, 100_000];
const INITIAL_CAPACITY: usize = 101;

/// 生成随机键
fn generate_keys(count: usize) -> Vec<Key> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count).map(|_| rng.gen_range(0..=1_000_000_000)).collect()
}

fn filled<T: HashTable>(mut table: T, keys: &[Key]) -> T {
    for &key in keys {
        table.insert(key);
    }
    table
}

/// 插入操作基准测试
fn bench_insert(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(criterion::AxisScale::Logarithmic);
    let mut group = c.benchmark_group("Insert");
    group.plot_config(plot_config);

    for &count in ITEM_COUNTS.iter() {
        let keys = generate_keys(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("linear", count), &keys, |b, keys| {
            b.iter_batched(
                || LinearProbeTable::new(INITIAL_CAPACITY),
                |table| filled(table, keys),
                BatchSize::LargeInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("cuckoo", count), &keys, |b, keys| {
            b.iter_batched(
                || CuckooTable::new(INITIAL_CAPACITY),
                |table| filled(table, keys),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// 查询操作基准测试（命中与未命中各一半）
fn bench_search(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(criterion::AxisScale::Logarithmic);
    let mut group = c.benchmark_group("Search");
    group.plot_config(plot_config);

    for &count in ITEM_COUNTS.iter() {
        let keys = generate_keys(count);
        let probes: Vec<Key> = keys
            .iter()
            .enumerate()
            .map(|(i, &key)| if i % 2 == 0 { key } else { -key - 1 })
            .collect();
        let linear = filled(LinearProbeTable::new(INITIAL_CAPACITY), &keys);
        let cuckoo = filled(CuckooTable::new(INITIAL_CAPACITY), &keys);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("linear", count), &probes, |b, probes| {
            b.iter(|| probes.iter().filter(|&&key| linear.search(key)).count());
        });
        group.bench_with_input(BenchmarkId::new("cuckoo", count), &probes, |b, probes| {
            b.iter(|| probes.iter().filter(|&&key| cuckoo.search(key)).count());
        });
    }
    group.finish();
}

/// 删除操作基准测试
fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("Remove");

    for &count in ITEM_COUNTS.iter() {
        let keys = generate_keys(count);
        let linear = filled(LinearProbeTable::new(INITIAL_CAPACITY), &keys);
        let cuckoo = filled(CuckooTable::new(INITIAL_CAPACITY), &keys);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("linear", count), &keys, |b, keys| {
            b.iter_batched(
                || LinearProbeTable::from_iter(linear.keys()),
                |mut table| keys.iter().filter(|&&key| table.remove(key)).count(),
                BatchSize::LargeInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("cuckoo", count), &keys, |b, keys| {
            b.iter_batched(
                || CuckooTable::from_iter(cuckoo.keys()),
                |mut table| keys.iter().filter(|&&key| table.remove(key)).count(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .noise_threshold(0.05);
    targets =
        bench_insert,
        bench_search,
        bench_remove
);
criterion_main!(benches);
