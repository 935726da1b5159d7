//! Criterion benchmarks for the per-frame hot path.
//!
//! Benchmarks:
//!   - one full simulation step at N = 128 (evolve, compose, CPU transform)
//!   - evolve + compose alone
//!   - one projector solve
//!
//! Run with: cargo bench --bench ocean_step

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;

use swellgrid::ocean::OceanSimulation;
use swellgrid::params::{ProjectionConfig, RenderConfig, SpectrumConfig};
use swellgrid::projection::{Camera, ProjectionSolver};
use swellgrid::spectrum::{empty_fields, DispersionTable, SpectrumEvolver, SpectrumGenerator};

fn bench_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("ocean_step");
    group.sample_size(20);

    let config = SpectrumConfig::default();
    let mut simulation = OceanSimulation::with_cpu_engine(&config).unwrap();
    let mut time_s = 0.0_f32;

    group.bench_function("step_n128", |b| {
        b.iter(|| {
            time_s += 1.0 / 60.0;
            black_box(simulation.step(black_box(time_s)).unwrap().height(0, 0))
        });
    });

    let generator = SpectrumGenerator::new(&config).unwrap();
    let (spectrum, _) = generator.generate();
    let dispersion = DispersionTable::build(generator.config());
    let evolver = SpectrumEvolver::new(generator.config());
    let mut fields = empty_fields(generator.config().size);

    group.bench_function("evolve_compose_n128", |b| {
        b.iter(|| {
            let evolved = evolver.evolve(&spectrum, &dispersion, black_box(2.5)).unwrap();
            evolver.compose(&evolved, &mut fields).unwrap();
        });
    });

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    let mut solver = ProjectionSolver::new(&ProjectionConfig::default());
    let camera = Camera::looking_at(
        Vec3::new(0.0, 20.0, 0.0),
        Vec3::new(0.0, 0.0, 100.0),
        &RenderConfig::default(),
    );

    group.bench_function("solve", |b| {
        b.iter(|| black_box(solver.update(black_box(&camera)).projector_vp));
    });

    group.finish();
}

criterion_group!(benches, bench_simulation_step, bench_projection);
criterion_main!(benches);
