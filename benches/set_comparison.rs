use core::hash::BuildHasherDefault;
use core::hash::Hash;
use core::hint::black_box;

use chain_hash::HashSet as ChainHashSet;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashSet as HashbrownHashSet;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

type SipState = BuildHasherDefault<SipHasher>;

trait TestValue: Clone + Hash + Eq {
    fn new(key: u64) -> Self;
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct SmallTestItem {
    key: u64,
}

impl TestValue for SmallTestItem {
    fn new(key: u64) -> Self {
        black_box(Self { key })
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct TestItem {
    key: String,
}

impl TestValue for TestItem {
    fn new(key: u64) -> Self {
        black_box(Self {
            key: format!("key_{:016X}", key),
        })
    }
}

/// The operations every benchmarked set supports.
trait BenchSet<V> {
    const NAME: &'static str;

    fn with_capacity(capacity: usize) -> Self;
    fn insert(&mut self, value: V) -> bool;
    fn contains(&self, value: &V) -> bool;
    fn remove(&mut self, value: &V) -> bool;
    fn iter_count(&self) -> usize;
}

impl<V: Hash + Eq> BenchSet<V> for ChainHashSet<V, SipState> {
    const NAME: &'static str = "chain_hash";

    fn with_capacity(capacity: usize) -> Self {
        ChainHashSet::with_capacity(capacity)
    }

    fn insert(&mut self, value: V) -> bool {
        ChainHashSet::insert(self, value)
    }

    fn contains(&self, value: &V) -> bool {
        ChainHashSet::contains(self, value)
    }

    fn remove(&mut self, value: &V) -> bool {
        ChainHashSet::remove(self, value)
    }

    fn iter_count(&self) -> usize {
        self.iter().map(black_box).count()
    }
}

impl<V: Hash + Eq> BenchSet<V> for HashbrownHashSet<V, SipState> {
    const NAME: &'static str = "hashbrown";

    fn with_capacity(capacity: usize) -> Self {
        HashbrownHashSet::with_capacity_and_hasher(capacity, SipState::default())
    }

    fn insert(&mut self, value: V) -> bool {
        HashbrownHashSet::insert(self, value)
    }

    fn contains(&self, value: &V) -> bool {
        HashbrownHashSet::contains(self, value)
    }

    fn remove(&mut self, value: &V) -> bool {
        HashbrownHashSet::remove(self, value)
    }

    fn iter_count(&self) -> usize {
        self.iter().map(black_box).count()
    }
}

impl<V: Hash + Eq> BenchSet<V> for std::collections::HashSet<V, SipState> {
    const NAME: &'static str = "std";

    fn with_capacity(capacity: usize) -> Self {
        std::collections::HashSet::with_capacity_and_hasher(capacity, SipState::default())
    }

    fn insert(&mut self, value: V) -> bool {
        std::collections::HashSet::insert(self, value)
    }

    fn contains(&self, value: &V) -> bool {
        std::collections::HashSet::contains(self, value)
    }

    fn remove(&mut self, value: &V) -> bool {
        std::collections::HashSet::remove(self, value)
    }

    fn iter_count(&self) -> usize {
        self.iter().map(black_box).count()
    }
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 11),
    (1 << 12),
    (1 << 13),
    (1 << 14),
    (1 << 15),
    (1 << 16),
    (1 << 17),
];

fn random_values<V: TestValue>(count: usize) -> Vec<V> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| V::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn sequential_values<V: TestValue>(count: usize) -> Vec<V> {
    (0..count as u64).map(V::new).collect()
}

fn shuffled<V: Clone>(values: &[V]) -> Vec<V> {
    let mut values = values.to_vec();
    values.shuffle(&mut SmallRng::from_os_rng());
    values
}

fn insert_random<V: TestValue, S: BenchSet<V>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    values: &[V],
    preallocate: bool,
) {
    group.bench_function(BenchmarkId::new(S::NAME, values.len()), |b| {
        b.iter_batched(
            || shuffled(values),
            |values| {
                let capacity = if preallocate { values.len() } else { 0 };
                let mut set = S::with_capacity(capacity);
                for value in values {
                    black_box(set.insert(value));
                }
                black_box(set)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_random<V: TestValue, const MAX_SIZE: usize>(c: &mut Criterion) {
    for preallocate in [false, true] {
        let mut group = c.benchmark_group(format!(
            "insert_random{}_{}",
            if preallocate { "_preallocated" } else { "" },
            core::any::type_name::<V>()
        ));
        group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

        for size in SIZES[..=MAX_SIZE].iter() {
            let values = random_values::<V>(*size);
            group.throughput(Throughput::Elements(*size as u64));
            insert_random::<V, ChainHashSet<V, SipState>>(&mut group, &values, preallocate);
            insert_random::<V, HashbrownHashSet<V, SipState>>(&mut group, &values, preallocate);
            insert_random::<V, std::collections::HashSet<V, SipState>>(
                &mut group,
                &values,
                preallocate,
            );
        }

        group.finish();
    }
}

fn find<V: TestValue, S: BenchSet<V>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    present: &[V],
    probes: &[V],
) {
    let mut set = S::with_capacity(0);
    for value in present.iter().cloned() {
        set.insert(value);
    }

    group.bench_function(BenchmarkId::new(S::NAME, probes.len()), |b| {
        b.iter(|| {
            for probe in probes {
                black_box(set.contains(probe));
            }
        })
    });
}

fn bench_find_hit_miss<V: TestValue, const MAX_SIZE: usize>(c: &mut Criterion) {
    for (label, hit_every) in [("hit", 1), ("miss", 0), ("hit_miss", 2)] {
        let mut group = c.benchmark_group(format!(
            "find_{}_{}",
            label,
            core::any::type_name::<V>()
        ));
        group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

        for size in SIZES[..=MAX_SIZE].iter() {
            let present = sequential_values::<V>(*size);
            let probes = (0..*size as u64)
                .map(|i| {
                    if hit_every != 0 && i % hit_every == 0 {
                        V::new(i)
                    } else {
                        V::new(i + *size as u64)
                    }
                })
                .collect::<Vec<V>>();
            let probes = shuffled(&probes);

            group.throughput(Throughput::Elements(*size as u64));
            find::<V, ChainHashSet<V, SipState>>(&mut group, &present, &probes);
            find::<V, HashbrownHashSet<V, SipState>>(&mut group, &present, &probes);
            find::<V, std::collections::HashSet<V, SipState>>(&mut group, &present, &probes);
        }

        group.finish();
    }
}

fn remove<V: TestValue, S: BenchSet<V>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    values: &[V],
) {
    group.bench_function(BenchmarkId::new(S::NAME, values.len()), |b| {
        b.iter_batched(
            || {
                let mut set = S::with_capacity(0);
                for value in values.iter().cloned() {
                    set.insert(value);
                }
                (set, shuffled(values))
            },
            |(mut set, order)| {
                for value in &order {
                    black_box(set.remove(value));
                }
                black_box(set)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove<V: TestValue, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<V>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter() {
        let values = random_values::<V>(*size);
        group.throughput(Throughput::Elements(*size as u64));
        remove::<V, ChainHashSet<V, SipState>>(&mut group, &values);
        remove::<V, HashbrownHashSet<V, SipState>>(&mut group, &values);
        remove::<V, std::collections::HashSet<V, SipState>>(&mut group, &values);
    }

    group.finish();
}

fn iteration<V: TestValue, S: BenchSet<V>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    values: &[V],
) {
    let mut set = S::with_capacity(0);
    for value in values.iter().cloned() {
        set.insert(value);
    }

    group.bench_function(BenchmarkId::new(S::NAME, values.len()), |b| {
        b.iter(|| black_box(set.iter_count()))
    });
}

fn bench_iteration<V: TestValue, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", core::any::type_name::<V>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter() {
        let values = random_values::<V>(*size);
        group.throughput(Throughput::Elements(*size as u64));
        iteration::<V, ChainHashSet<V, SipState>>(&mut group, &values);
        iteration::<V, HashbrownHashSet<V, SipState>>(&mut group, &values);
        iteration::<V, std::collections::HashSet<V, SipState>>(&mut group, &values);
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Remove,
    Find,
}

const KEY_SPACE_MULTIPLIER: usize = 4;

fn mixed<V: TestValue, S: BenchSet<V>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    operations: &[Operation],
    size: usize,
) {
    let insert_distr = Zipf::new(size as f32 - 1.0, 1.0).unwrap();
    let find_remove_distr =
        Zipf::new(size as f32 * KEY_SPACE_MULTIPLIER as f32 - 1.0, 1.0).unwrap();

    group.bench_function(BenchmarkId::new(S::NAME, size), |b| {
        b.iter_batched(
            || (shuffled(operations), SmallRng::from_os_rng()),
            |(operations, mut rng)| {
                let mut set = S::with_capacity(0);
                for operation in operations {
                    match operation {
                        Operation::Insert => {
                            let key = rng.sample(insert_distr) as u64;
                            black_box(set.insert(V::new(key)));
                        }
                        Operation::Remove => {
                            let key = rng.sample(find_remove_distr) as u64;
                            black_box(set.remove(&V::new(key)));
                        }
                        Operation::Find => {
                            let key = rng.sample(find_remove_distr) as u64;
                            black_box(set.contains(&V::new(key)));
                        }
                    }
                }
                black_box(set)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_mixed_probabilistic_zipf<V: TestValue, const MAX_SIZE: usize>(c: &mut Criterion) {
    for exponent in [0.5f32, 1.0, 2.0] {
        let mut group = c.benchmark_group(format!(
            "mixed_probabilistic_zipf_{:.1}_{}",
            exponent,
            core::any::type_name::<V>()
        ));
        group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

        let op_distr = Zipf::new(3.0, exponent).unwrap();
        let mut rng = SmallRng::from_os_rng();

        for size in SIZES[..=MAX_SIZE].iter() {
            let operations = (0..*size * 3)
                .map(|_| match rng.sample(op_distr) as u32 {
                    1 => Operation::Insert,
                    2 => Operation::Find,
                    _ => Operation::Remove,
                })
                .collect::<Vec<Operation>>();

            group.throughput(Throughput::Elements(operations.len() as u64));
            mixed::<V, ChainHashSet<V, SipState>>(&mut group, &operations, *size);
            mixed::<V, HashbrownHashSet<V, SipState>>(&mut group, &operations, *size);
            mixed::<V, std::collections::HashSet<V, SipState>>(&mut group, &operations, *size);
        }

        group.finish();
    }
}

fn churn<V: TestValue, S: BenchSet<V>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    values: &[V],
) {
    group.bench_function(BenchmarkId::new(S::NAME, values.len()), |b| {
        b.iter_batched(
            || shuffled(values),
            |values| {
                let mut set = S::with_capacity(0);
                // Fill and empty twice to exercise both growing and shrinking.
                for _ in 0..2 {
                    for value in values.iter().cloned() {
                        black_box(set.insert(value));
                    }
                    for value in &values {
                        black_box(set.remove(value));
                    }
                }
                black_box(set)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_churn<V: TestValue, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("churn_{}", core::any::type_name::<V>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter() {
        let values = random_values::<V>(*size);
        group.throughput(Throughput::Elements(*size as u64 * 4));
        churn::<V, ChainHashSet<V, SipState>>(&mut group, &values);
        churn::<V, HashbrownHashSet<V, SipState>>(&mut group, &values);
        churn::<V, std::collections::HashSet<V, SipState>>(&mut group, &values);
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<SmallTestItem, 7>,
    bench_insert_random::<TestItem, 5>,
    bench_find_hit_miss::<SmallTestItem, 7>,
    bench_find_hit_miss::<TestItem, 5>,
    bench_remove::<SmallTestItem, 7>,
    bench_remove::<TestItem, 5>,
    bench_iteration::<SmallTestItem, 7>,
    bench_iteration::<TestItem, 5>,
    bench_mixed_probabilistic_zipf::<SmallTestItem, 7>,
    bench_mixed_probabilistic_zipf::<TestItem, 5>,
    bench_churn::<SmallTestItem, 7>,
    bench_churn::<TestItem, 5>,
);

criterion_main!(benches);
