//! Benchmarks for blend detection in kernel/src/canvas/geometry.rs
//!
//! Performance-critical paths:
//! - `find_blend_target`: linear scan of node centers on every drag tick
//! - `CanvasInteractionController::drag_to`: the full per-move update

#![allow(missing_docs)]

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sprig_kernel::canvas::{find_blend_target, CanvasInteractionController};
use sprig_kernel::domain::{Branch, BranchId, Position, Project};
use sprig_kernel::infrastructure::config::{BlendTargetPolicy, CanvasSettings};
use sprig_kernel::store::BranchGraphStore;

/// Lays `size` branches out on a grid far enough apart that none overlap.
fn grid(size: usize) -> Vec<Branch> {
    let now = Utc::now();
    (0..size)
        .map(|n| {
            let parent = (n > 0).then(|| BranchId::new("b0"));
            let position = Position::new((n % 20) as f64 * 400.0, (n / 20) as f64 * 400.0);
            Branch::new(BranchId::new(format!("b{n}")), parent, &format!("b{n}"), "", now)
                .expect("Valid branch")
                .with_position(position)
        })
        .collect()
}

fn bench_find_blend_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_blend_target");
    let dragged = BranchId::new("dragged");
    let miss = Position::new(-5000.0, -5000.0);

    for policy in [BlendTargetPolicy::FirstFound, BlendTargetPolicy::Nearest] {
        let settings = CanvasSettings {
            blend_target_policy: policy,
            ..CanvasSettings::default()
        };
        for size in [10, 50, 200] {
            let branches = grid(size);
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{policy:?}"), size),
                &branches,
                |b, branches| {
                    b.iter(|| find_blend_target(black_box(branches), &dragged, miss, &settings));
                },
            );
        }
    }
    group.finish();
}

fn bench_drag_to(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_to");

    for size in [10, 50, 200] {
        let mut project = Project::new("proj_bench", "Bench", "", BranchId::new("b0"), Utc::now());
        project.branches = grid(size);
        let store = BranchGraphStore::load(project).expect("Load project");
        let mut canvas = CanvasInteractionController::new(CanvasSettings::default());
        canvas
            .begin_drag(&store, &BranchId::new("b1"))
            .expect("Start drag");

        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut x = 0.0;
            b.iter(|| {
                x += 1.0;
                canvas
                    .drag_to(&store, Position::new(x % 8000.0, 200.0))
                    .map(|target| target.is_some())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_blend_target, bench_drag_to);
criterion_main!(benches);
