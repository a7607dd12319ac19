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

//! Property-based tests for loading and deriving.
//!
//! - Conforming rows load with every field preserved exactly
//! - No loaded sample breaks `min <= avg <= max`
//! - The deriver returns one series per non-baseline mode
//! - Equal frame times give a speedup of exactly 1.0

use lightbench_core::{derive_speedups, load_str, LoadConfig, COLUMNS};
use proptest::prelude::*;
use std::collections::BTreeSet;

const MODES: [&str; 4] = ["naive", "forward+", "clustered deferred", "tiled"];

#[derive(Debug, Clone)]
struct Row {
    mode: &'static str,
    light_count: u32,
    avg: f64,
    min: f64,
    max: f64,
}

fn render(rows: &[Row]) -> String {
    let mut csv = COLUMNS.join(",");
    csv.push('\n');
    for row in rows {
        // `{}` on f64 prints the shortest representation that parses back
        // to the same value.
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            row.mode, row.light_count, row.avg, row.min, row.max
        ));
    }
    csv
}

/// Rows with distinct `(mode, light count)` cells and arbitrary ordering of
/// the three frame times.
fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::btree_set((0usize..MODES.len(), 1u32..20), 1..30).prop_flat_map(
        |cells: BTreeSet<(usize, u32)>| {
            let cells: Vec<(usize, u32)> = cells.into_iter().collect();
            let n = cells.len();
            prop::collection::vec((0.0f64..100.0, 0.0f64..100.0, 0.0f64..100.0), n).prop_map(
                move |times| {
                    cells
                        .iter()
                        .zip(times)
                        .map(|(&(mode, step), (a, b, c))| Row {
                            mode: MODES[mode],
                            light_count: step * 250,
                            avg: a,
                            min: b,
                            max: c,
                        })
                        .collect::<Vec<_>>()
                },
            )
        },
    )
}

fn conforming(row: &Row) -> bool {
    row.min <= row.avg && row.avg <= row.max
}

proptest! {
    #[test]
    fn prop_conforming_rows_are_preserved(rows in rows()) {
        let csv = render(&rows);
        match load_str(&csv, &LoadConfig::default()) {
            Ok(outcome) => {
                for row in rows.iter().filter(|r| conforming(r)) {
                    let sample = outcome.table.get(row.mode, row.light_count);
                    prop_assert!(sample.is_some());
                    let sample = sample.unwrap();
                    prop_assert_eq!(sample.avg_frame_time_ms, row.avg);
                    prop_assert_eq!(sample.min_frame_time_ms, row.min);
                    prop_assert_eq!(sample.max_frame_time_ms, row.max);
                }
                let kept = rows.iter().filter(|r| conforming(r)).count();
                prop_assert_eq!(outcome.table.len(), kept);
                prop_assert_eq!(outcome.excluded.len(), rows.len() - kept);
            }
            Err(_) => {
                // Only possible when every row was excluded.
                prop_assert!(rows.iter().all(|r| !conforming(r)));
            }
        }
    }

    #[test]
    fn prop_loaded_samples_are_ordered(rows in rows()) {
        if let Ok(outcome) = load_str(&render(&rows), &LoadConfig::default()) {
            for sample in outcome.table.samples() {
                prop_assert!(sample.min_frame_time_ms <= sample.avg_frame_time_ms);
                prop_assert!(sample.avg_frame_time_ms <= sample.max_frame_time_ms);
            }
        }
    }

    #[test]
    fn prop_one_series_per_comparison_mode(
        counts in prop::collection::btree_set(1u32..50, 1..10),
        times in prop::collection::vec(1.0f64..50.0, 40),
    ) {
        let mut rows = Vec::new();
        let mut t = times.iter().cycle();
        for &step in &counts {
            for &mode in &MODES[..3] {
                let avg = *t.next().unwrap();
                rows.push(Row {
                    mode,
                    light_count: step * 100,
                    avg,
                    min: avg * 0.9,
                    max: avg * 1.1,
                });
            }
        }

        let outcome = load_str(&render(&rows), &LoadConfig::default()).unwrap();
        let derived = derive_speedups(&outcome.table, "naive").unwrap();

        prop_assert_eq!(derived.series.len(), outcome.table.modes().len() - 1);
        for series in &derived.series {
            prop_assert_eq!(series.points.len(), counts.len());
            let ascending = series.points.windows(2).all(|w| w[0].light_count < w[1].light_count);
            prop_assert!(ascending);
        }
    }

    #[test]
    fn prop_equal_times_give_parity(avg in 0.001f64..1000.0, step in 1u32..100) {
        let rows = vec![
            Row { mode: "naive", light_count: step, avg, min: avg, max: avg },
            Row { mode: "forward+", light_count: step, avg, min: avg, max: avg },
        ];
        let outcome = load_str(&render(&rows), &LoadConfig::default()).unwrap();
        let derived = derive_speedups(&outcome.table, "naive").unwrap();
        let factor = derived.series[0].factor_at(step).unwrap();
        prop_assert!((factor - 1.0).abs() < 1e-9);
    }
}
