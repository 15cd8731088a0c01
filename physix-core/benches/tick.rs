//! Benchmarks for tick throughput.
//!
//! Run with: `cargo bench -p physix-core`
//!
//! Measures one full tick (all substeps) for a fixed crowd of bodies while
//! varying the worker count, to show how the per-tick pool scales.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use physix_core::{Boundary, TickConfig, Vec3, World};

/// A cube lattice of `side³` unit spheres with alternating velocities.
fn lattice_world(side: usize, workers: usize) -> World {
    let boundaries = Boundary::enclosure(30.0, 1.0).expect("valid enclosure");
    let mut world = World::new(boundaries, TickConfig::new(5, workers));
    let spacing = 2.5;
    let offset = (side as f64 - 1.0) * spacing / 2.0;
    for i in 0..side {
        for j in 0..side {
            for k in 0..side {
                let position = Vec3::new(
                    i as f64 * spacing - offset,
                    j as f64 * spacing - offset,
                    k as f64 * spacing - offset,
                );
                let sign = if (i + j + k) % 2 == 0 { 1.0 } else { -1.0 };
                world
                    .spawn(position, Vec3::new(sign, -sign, 0.5 * sign), 1.0, 1.0)
                    .expect("valid body");
            }
        }
    }
    world
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_512_bodies");

    for &workers in &[1, 2, 4, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            let mut world = lattice_world(8, workers);
            b.iter(|| world.tick(1.0 / 60.0).expect("stable tick"));
        });
    }

    group.finish();
}

fn bench_body_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_4_workers");

    for &side in &[3, 5, 8] {
        let bodies = side * side * side;
        group.bench_with_input(BenchmarkId::from_parameter(bodies), &side, |b, &side| {
            let mut world = lattice_world(side, 4);
            b.iter(|| world.tick(1.0 / 60.0).expect("stable tick"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_body_count);
criterion_main!(benches);
