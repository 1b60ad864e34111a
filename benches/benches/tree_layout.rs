//! Benchmarks for tree layout in kernel/src/layout.rs
//!
//! Performance-critical paths:
//! - `compute_tree_layout`: BFS grouping and per-level centering
//! - `BranchGraphStore::seed_positions`: layout plus position writes

#![allow(missing_docs)]

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sprig_kernel::domain::{Branch, BranchId, Project};
use sprig_kernel::infrastructure::config::LayoutSettings;
use sprig_kernel::layout::compute_tree_layout;
use sprig_kernel::store::BranchGraphStore;

/// Builds a tree where every branch has up to `fanout` children.
fn balanced_tree(size: usize, fanout: usize) -> Vec<Branch> {
    let now = Utc::now();
    (0..size)
        .map(|n| {
            let parent = (n > 0).then(|| BranchId::new(format!("b{}", (n - 1) / fanout)));
            Branch::new(BranchId::new(format!("b{n}")), parent, &format!("b{n}"), "", now)
                .expect("Valid branch")
        })
        .collect()
}

fn bench_compute_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_tree_layout");
    let settings = LayoutSettings::default();
    let root = BranchId::new("b0");

    for size in [10, 50, 200, 1000] {
        let branches = balanced_tree(size, 3);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &branches, |b, branches| {
            b.iter(|| compute_tree_layout(black_box(branches), &root, &settings));
        });
    }
    group.finish();
}

fn bench_seed_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("seed_positions");
    let settings = LayoutSettings::default();

    for size in [50, 500] {
        let branches = balanced_tree(size, 4);
        group.bench_with_input(BenchmarkId::from_parameter(size), &branches, |b, branches| {
            b.iter_batched(
                || {
                    let mut project =
                        Project::new("proj_bench", "Bench", "", BranchId::new("b0"), Utc::now());
                    project.branches.clone_from(branches);
                    BranchGraphStore::load(project).expect("Load project")
                },
                |mut store| store.seed_positions(&settings),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_layout, bench_seed_positions);
criterion_main!(benches);
