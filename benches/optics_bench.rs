//! Benchmark for accessors.
//!
//! Compares composed and combined accessors against direct field access and
//! measures the overhead of the suspending rows.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use futures::executor::block_on;
use lenskit::optics::{FunctionLens, FunctionTraversal, Lens, Traversal};
use lenskit::suspend::AsyncTraversal;
use std::convert::Infallible;
use std::hint::black_box;

#[derive(Clone, Debug)]
struct Record {
    a: i64,
    b: i64,
}

#[derive(Clone, Debug)]
struct Nested {
    inner: Record,
}

fn field_a() -> impl Lens<Record, i64> + Clone {
    FunctionLens::new(
        |record: &Record| &record.a,
        |record: Record, a: i64| Record { a, ..record },
    )
}

fn accessor_inner() -> impl Lens<Nested, Record> + Clone {
    FunctionLens::new(
        |nested: &Nested| &nested.inner,
        |_: Nested, inner: Record| Nested { inner },
    )
}

fn each() -> impl Traversal<Vec<i64>, i64> + Clone {
    FunctionTraversal::new(
        |numbers: &Vec<i64>| numbers.iter().collect(),
        |numbers: Vec<i64>, function: &mut dyn FnMut(i64) -> i64| {
            numbers.into_iter().map(function).collect()
        },
    )
}

// =============================================================================
// Lens Benchmarks
// =============================================================================

fn benchmark_lens_set(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("lens_set");
    let nested = Nested {
        inner: Record { a: 1, b: 2 },
    };

    group.bench_function("direct", |bencher| {
        bencher.iter(|| {
            let source = black_box(nested.clone());
            black_box(Nested {
                inner: Record {
                    a: 9,
                    ..source.inner
                },
            })
        });
    });

    let composed = accessor_inner().compose(field_a());
    group.bench_function("composed", |bencher| {
        bencher.iter(|| black_box(composed.set(black_box(nested.clone()), 9)));
    });

    group.finish();
}

// =============================================================================
// Traversal Benchmarks
// =============================================================================

fn benchmark_traversal_modify(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("traversal_modify");

    for size in [10, 100, 1000] {
        let numbers: Vec<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("direct", size), &numbers, |bencher, numbers| {
            bencher.iter(|| {
                black_box(
                    numbers
                        .clone()
                        .into_iter()
                        .map(|number| number + 1)
                        .collect::<Vec<_>>(),
                )
            });
        });

        let traversal = each();
        group.bench_with_input(BenchmarkId::new("traversal", size), &numbers, |bencher, numbers| {
            bencher.iter(|| black_box(traversal.modify(numbers.clone(), |number| number + 1)));
        });

        let combined = each().combine(each());
        group.bench_with_input(BenchmarkId::new("combined", size), &numbers, |bencher, numbers| {
            bencher.iter(|| black_box(combined.modify(numbers.clone(), |number| number + 1)));
        });

        let lifted = each().suspend::<Infallible>();
        group.bench_with_input(BenchmarkId::new("suspended", size), &numbers, |bencher, numbers| {
            bencher.iter(|| {
                black_box(block_on(lifted.modify(numbers.clone(), |number| number + 1)))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_lens_set, benchmark_traversal_modify);
criterion_main!(benches);
