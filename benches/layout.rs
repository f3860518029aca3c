// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use pickpause::config::LayoutConfig;
use pickpause::layout::{solve_layout, LayoutRequest};

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<u64>().ok()).unwrap_or(default)
}

fn criterion_config() -> Criterion {
    let sample_size = env_u64("BENCH_SAMPLE_SIZE", 60).clamp(10, 200) as usize;
    let warmup_secs = env_u64("BENCH_WARMUP_SECS", 3).clamp(1, 60);
    let measurement_secs = env_u64("BENCH_MEASUREMENT_SECS", 5).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
}

// Benchmark identity (keep stable):
// - Group name: `layout.solve`
// - Case IDs: `batch_4`, `batch_64_wide`, `batch_512`, `dense_small_area`
fn benches_layout(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("layout.solve");

    for (case_id, request) in [
        ("batch_4", LayoutRequest::new(1024.0, 768.0, 4, 1.0)),
        ("batch_64_wide", LayoutRequest::new(1920.0, 1080.0, 64, 16.0 / 9.0)),
        ("batch_512", LayoutRequest::new(2560.0, 1440.0, 512, 2.0 / 3.0)),
        ("dense_small_area", LayoutRequest::new(40.0, 30.0, 96, 1.0)),
    ] {
        group.throughput(Throughput::Elements(request.item_count as u64));
        let config = config.clone();
        group.bench_function(case_id, move |b| {
            b.iter(|| {
                let geometry = solve_layout(black_box(&request), black_box(&config));
                black_box(geometry.columns().wrapping_add(geometry.rows()))
            })
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = benches_layout
}
criterion_main!(benches);
