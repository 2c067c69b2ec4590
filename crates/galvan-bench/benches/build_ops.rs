//! Criterion benchmarks for model construction and equation discretisation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use galvan_bench::{reference_profile, stress_profile};
use galvan_model::lithium_ion;

/// Benchmark: validate options and build the reference single particle model.
fn bench_build_reference(c: &mut Criterion) {
    c.bench_function("build_spm_reference", |b| {
        b.iter(|| {
            let model = lithium_ion::spm(reference_profile()).unwrap();
            black_box(model.equations().len());
        });
    });
}

/// Benchmark: process and discretise every equation of the stress profile.
fn bench_discretise_stress(c: &mut Criterion) {
    c.bench_function("discretise_spm_stress", |b| {
        b.iter(|| {
            let mut model = lithium_ion::spm(stress_profile()).unwrap();
            let (eqs, layout) = model.discretise_equations().unwrap();
            black_box((eqs.len(), layout.len()));
        });
    });
}

criterion_group!(benches, bench_build_reference, bench_discretise_stress);
criterion_main!(benches);
