// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use anthem::layout::{layout, layout_on_scale, AxisRange, LinearScale};
use anthem::model::Metric;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `layout.beeswarm`, `layout.beeswarm_scaled`, `layout.ticks`
// - Case IDs must remain stable across refactors so results stay comparable over time.
fn benches_layout(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("layout.beeswarm");

        for case in [fixtures::Case::Dataset, fixtures::Case::Medium, fixtures::Case::Large] {
            let entities = fixtures::entities(case);
            group.throughput(Throughput::Elements(entities.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let nodes = layout(
                        black_box(&entities),
                        |entity| entity.tempo().unwrap_or(f64::NAN),
                        AxisRange::new(40.0, 770.0),
                        175.0,
                        14.0,
                    )
                    .expect("layout");
                    black_box(nodes.iter().fold(0.0f64, |acc, node| acc + node.x() + node.y()))
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("layout.beeswarm_scaled");

        for case in [fixtures::Case::Dataset, fixtures::Case::Medium] {
            let entities = fixtures::entities(case);
            let scale = LinearScale::padded(
                entities.iter().filter_map(|entity| Metric::Duration.finite_value(entity)),
                0.9,
                1.05,
                (40.0, 770.0),
            )
            .expect("scale");
            group.throughput(Throughput::Elements(entities.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let nodes = layout_on_scale(
                        black_box(&entities),
                        |entity| entity.duration().unwrap_or(f64::NAN),
                        &scale,
                        175.0,
                        14.0,
                    )
                    .expect("layout");
                    black_box(nodes.len())
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("layout.ticks");
        for (case_id, domain) in [("bpm", (68.4, 180.6)), ("seconds", (0.0, 181.0))] {
            let scale = LinearScale::new(domain, (0.0, 730.0));
            group.bench_function(case_id, move |b| {
                b.iter(|| black_box(black_box(scale).nice().ticks(10).len()))
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_layout
}
criterion_main!(benches);
