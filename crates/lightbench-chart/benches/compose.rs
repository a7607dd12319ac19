// Dweve Lightbench - Render Benchmark Reporting
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Panel composition over a synthetic sweep.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lightbench_chart::{compose, PanelKind, StyleConfig};
use lightbench_core::{derive_speedups, BenchmarkTable, IntegrityPolicy, Sample};

const MODES: [&str; 3] = ["naive", "forward+", "clustered deferred"];

fn sweep(steps: u32) -> BenchmarkTable {
    let samples = MODES.iter().enumerate().flat_map(|(i, mode)| {
        (1..=steps).map(move |step| {
            let avg = step as f64 / (i + 1) as f64;
            Sample::new(*mode, step * 100, avg, avg * 0.9, avg * 1.1)
        })
    });
    match BenchmarkTable::from_samples(samples, IntegrityPolicy::Lenient) {
        Ok(outcome) => outcome.table,
        Err(e) => panic!("synthetic sweep failed to build: {e}"),
    }
}

fn bench_compose(c: &mut Criterion) {
    let style = StyleConfig::default();
    let mut group = c.benchmark_group("compose");
    for steps in [10u32, 100, 1_000] {
        let table = sweep(steps);
        let derived = match derive_speedups(&table, "naive") {
            Ok(derivation) => derivation.series,
            Err(e) => panic!("synthetic sweep failed to derive: {e}"),
        };
        group.bench_with_input(BenchmarkId::from_parameter(steps), &table, |b, table| {
            b.iter(|| compose(black_box(table), &derived, &style, &PanelKind::ALL))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compose);
criterion_main!(benches);
