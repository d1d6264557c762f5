use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowcas::{
    CUSTOM_EPOCH_MS, IdGenStatus, ManualClock, MonotonicClock, SnowflakeGenerator, TimeSource,
};
use std::{sync::Barrier, thread::scope, time::Instant};

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded). With the default 12-bit sequence this is exactly one
// millisecond worth of IDs, so a fixed clock never exhausts.
const TOTAL_IDS: usize = 4096;

/// Hot path: a fixed clock, every attempt is `Ready`.
fn bench_fixed_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("snowflake/fixed");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = SnowflakeGenerator::with_node_id(0, 0, ManualClock::new(42))
                    .expect("valid config");
                for _ in 0..TOTAL_IDS {
                    match generator.poll_id() {
                        IdGenStatus::Ready { id } => {
                            black_box(id);
                        }
                        IdGenStatus::Pending { .. } => unreachable!(),
                    }
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Realistic wall-clock behavior: spins whenever the sequence is exhausted.
fn bench_monotonic_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("snowflake/mono");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let clock = MonotonicClock::new();
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let generator =
                SnowflakeGenerator::with_node_id(0, CUSTOM_EPOCH_MS, clock.clone())
                    .expect("valid config");
            let start = Instant::now();

            for _ in 0..iters {
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// One generator shared by every thread.
fn bench_contended<T>(c: &mut Criterion, group_name: &str, clock: impl Fn() -> T)
where
    T: TimeSource + Send + Sync,
{
    let mut group = c.benchmark_group(group_name);

    let mut thread_counts = vec![1, 2, 4, 8, num_cpus::get()];
    thread_counts.sort_unstable();
    thread_counts.dedup();

    for threads in thread_counts {
        let total = (TOTAL_IDS * threads) as u64;
        group.throughput(Throughput::Elements(total));

        group.bench_function(format!("threads/{threads}/elems/{total}"), |b| {
            b.iter_custom(|iters| {
                let generator =
                    SnowflakeGenerator::with_node_id(0, 0, clock()).expect("valid config");
                let barrier = Barrier::new(threads + 1);
                let start = scope(|s| {
                    for _ in 0..threads {
                        s.spawn(|| {
                            barrier.wait();
                            for _ in 0..iters {
                                for _ in 0..TOTAL_IDS {
                                    black_box(generator.next_id());
                                }
                            }
                        });
                    }
                    barrier.wait();
                    Instant::now()
                });
                start.elapsed()
            });
        });
    }

    group.finish();
}

fn bench_contended_mono(c: &mut Criterion) {
    let clock = MonotonicClock::new();
    bench_contended(c, "snowflake/contended/mono", || clock.clone());
}

criterion_group!(
    benches,
    bench_fixed_clock,
    bench_monotonic_clock,
    bench_contended_mono
);
criterion_main!(benches);
