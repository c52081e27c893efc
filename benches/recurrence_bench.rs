//! Benchmarks for the lazy evaluators and Clenshaw summation.
//!
//! Run with: `cargo bench --bench recurrence_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ndarray::{Array1, Array2, ArrayD};
use orthopoly::{
    ArithmeticMode, DiskRecurrence, DiskTree, LineRecurrence, LineTree, Scaling, SphereRecurrence,
    SphereTree, clenshaw,
};

/// Evenly spaced points in `(-1, 1)`.
fn line_points(n: usize) -> ArrayD<f64> {
    Array1::from_shape_fn(n, |i| -1.0 + 2.0 * (i as f64 + 0.5) / n as f64).into_dyn()
}

/// Points on a spiral inside the unit disk, leading axis `(x, y)`.
fn disk_points(n: usize) -> ArrayD<f64> {
    Array2::from_shape_fn((2, n), |(axis, i)| {
        let r = (i as f64 + 0.5) / n as f64;
        let phi = 0.37 * i as f64;
        if axis == 0 { r * phi.cos() } else { r * phi.sin() }
    })
    .into_dyn()
}

/// `(θ, φ)` pairs covering the sphere.
fn sphere_angles(n: usize) -> ArrayD<f64> {
    Array2::from_shape_fn((2, n), |(axis, i)| {
        let s = (i as f64 + 0.5) / n as f64;
        if axis == 0 { s * std::f64::consts::PI } else { 13.0 * s }
    })
    .into_dyn()
}

fn bench_line_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_tree");
    let jacobi = LineRecurrence::jacobi(Scaling::Normal, 1.5, 0.5, ArithmeticMode::Auto).unwrap();
    let x = line_points(1000);

    for degree in [10, 50, 200] {
        group.bench_with_input(BenchmarkId::new("jacobi_normal", degree), &degree, |b, &degree| {
            b.iter(|| {
                let level = LineTree::new(&jacobi, black_box(x.clone())).nth(degree);
                black_box(level)
            })
        });
    }
    group.finish();
}

fn bench_clenshaw(c: &mut Criterion) {
    let mut group = c.benchmark_group("clenshaw");
    let legendre = LineRecurrence::<f64>::legendre(Scaling::Normal, ArithmeticMode::Auto).unwrap();
    let x = line_points(1000);

    for degree in [10, 50, 200] {
        let coefficients: Vec<f64> = (0..=degree).map(|k| 1.0 / (k as f64 + 1.0)).collect();
        group.bench_with_input(BenchmarkId::new("legendre_normal", degree), &coefficients, |b, coefficients| {
            b.iter(|| clenshaw(black_box(coefficients), &legendre, black_box(&x)))
        });
    }
    group.finish();
}

fn bench_disk_and_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("multivariate_tree");
    let zernike = DiskRecurrence::<f64>::zernike(Scaling::Normal, ArithmeticMode::Auto).unwrap();
    let harmonics =
        SphereRecurrence::<f64>::spherical_harmonics(Scaling::QuantumMechanic, ArithmeticMode::Auto).unwrap();
    let xy = disk_points(500);
    let angles = sphere_angles(500);

    for degree in [10, 30] {
        group.bench_with_input(BenchmarkId::new("zernike", degree), &degree, |b, &degree| {
            b.iter(|| {
                let tree = DiskTree::new(&zernike, black_box(&xy)).unwrap();
                black_box(tree.take(degree + 1).count())
            })
        });
        group.bench_with_input(BenchmarkId::new("spherical_harmonics", degree), &degree, |b, &degree| {
            b.iter(|| {
                let tree = SphereTree::spherical_complex(&harmonics, black_box(&angles)).unwrap();
                black_box(tree.take(degree + 1).count())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_line_tree, bench_clenshaw, bench_disk_and_sphere);
criterion_main!(benches);
