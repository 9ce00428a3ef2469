// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use anthem::dashboard::{Dashboard, DashboardConfig};
use anthem::model::SchoolId;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `selection.fan_out`, `selection.snapshot`, `dashboard.build`
// - Case IDs must remain stable across refactors so results stay comparable over time.
fn benches_selection(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("selection.fan_out");

        for case in [fixtures::Case::Dataset, fixtures::Case::Medium, fixtures::Case::Large] {
            let dashboard =
                Dashboard::new(fixtures::store(case), DashboardConfig::default()).expect("dashboard");
            let schools = dashboard
                .store()
                .iter()
                .map(|entity| entity.school().clone())
                .collect::<Vec<SchoolId>>();
            let start = Instant::now();

            group.throughput(Throughput::Elements(schools.len() as u64));
            group.bench_function(case.id(), move |b| {
                let mut idx = 0usize;
                b.iter(|| {
                    let school = &schools[idx % schools.len()];
                    idx = idx.wrapping_add(7);
                    let now = start + Duration::from_millis(idx as u64);
                    let transition = dashboard.toggle(black_box(school), now).expect("toggle");
                    black_box(transition.revision())
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("selection.snapshot");

        let dashboard = Dashboard::new(fixtures::store(fixtures::Case::Dataset), DashboardConfig::default())
            .expect("dashboard");
        let now = Instant::now();
        if let Some(first) = dashboard.store().iter().next().map(|entity| entity.school().clone()) {
            dashboard.toggle(&first, now).expect("toggle");
        }
        group.bench_function(fixtures::Case::Dataset.id(), move |b| {
            b.iter(|| black_box(dashboard.snapshot_json(now).expect("snapshot").len()))
        });

        group.finish();
    }

    {
        let mut group = c.benchmark_group("dashboard.build");
        group.sample_size(10);

        for case in [fixtures::Case::Dataset, fixtures::Case::Medium] {
            let entities = fixtures::entities(case);
            group.throughput(Throughput::Elements(entities.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let store =
                        anthem::store::EntityStore::new(black_box(entities.clone())).expect("store");
                    let dashboard =
                        Dashboard::new(store, DashboardConfig::default()).expect("dashboard");
                    black_box(dashboard.store().len())
                })
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_selection
}
criterion_main!(benches);
