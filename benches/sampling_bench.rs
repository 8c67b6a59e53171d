//! Criterion benchmarks for u-exprsearch.
//!
//! Uses synthetic exemplars of growing depth over a fixed variable pool to
//! measure mutation, sampling, and selection overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_exprsearch::model::{Deme, Hyperparams, Instance, Knob};
use u_exprsearch::random::create_rng;
use u_exprsearch::sampling::{mutate, sample_new_instances};
use u_exprsearch::selection::{select_top_k, tournament_selection};

// ===========================================================================
// Synthetic exemplars: alternating AND/OR layers over x0..x{n}
// ===========================================================================

fn pool(n: usize) -> Vec<Knob> {
    (0..n).map(|i| Knob::new(format!("x{i}"))).collect()
}

fn layered(depth: usize, width: usize) -> String {
    fn build(level: usize, depth: usize, width: usize, next: &mut usize) -> String {
        let op = if level % 2 == 0 { "AND" } else { "OR" };
        let children: Vec<String> = (0..width)
            .map(|_| {
                if level + 1 == depth {
                    *next += 1;
                    format!("x{}", *next - 1)
                } else {
                    build(level + 1, depth, width, next)
                }
            })
            .collect();
        format!("({op} {})", children.join(" "))
    }
    let mut next = 0;
    build(0, depth, width, &mut next)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_mutate(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutate");

    for depth in [1usize, 2, 3] {
        let knobs = pool(64);
        let exemplar = Instance::new(layered(depth, 3), 0);
        let proposals = knobs[40..46].to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &exemplar, |b, ex| {
            let mut rng = create_rng(42);
            b.iter(|| {
                let result = mutate(0.5, black_box(ex), &proposals, &knobs, &mut rng);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_new_instances");
    group.sample_size(20);

    for size in [10usize, 50, 200] {
        let knobs = pool(64);
        let exemplar = Instance::new(layered(3, 3), 0);
        let proposals = knobs[40..48].to_vec();
        let hyper = Hyperparams::default().with_neighborhood_size(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &hyper, |b, h| {
            let mut rng = create_rng(42);
            b.iter(|| {
                let result =
                    sample_new_instances(0.5, black_box(h), &exemplar, &proposals, &knobs, &mut rng);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");

    let instances: Vec<Instance> = (0..1000u64)
        .map(|i| {
            let mut inst = Instance::new(format!("(AND x{i} y)"), i);
            inst.score = ((i * 7919) % 1000) as f64 / 1000.0;
            inst
        })
        .collect();
    let deme = Deme::new("bench", 0, Hyperparams::default(), instances);

    group.bench_function("top_k_100", |b| {
        b.iter(|| black_box(select_top_k(black_box(&deme), 100)))
    });
    group.bench_function("tournament_100_of_5", |b| {
        let mut rng = create_rng(42);
        b.iter(|| black_box(tournament_selection(black_box(&deme), 100, 5, &mut rng)))
    });
    group.finish();
}

criterion_group!(benches, bench_mutate, bench_sample, bench_selection);
criterion_main!(benches);
