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

//! File-based loading tests against a full three-mode sweep.

use lightbench_core::{
    derive_speedups, load_path, to_csv_string, variance_bands, CoreError, IntegrityPolicy,
    LoadConfig,
};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const LIGHT_COUNTS: [u32; 10] = [500, 1000, 1500, 2000, 2500, 3000, 3500, 4000, 4500, 5000];

/// A sweep in the shape produced by the benchmark runner: three modes, ten
/// light counts, times scaling roughly linearly with the number of lights.
fn sweep_csv() -> String {
    let mut csv = String::from(
        "Render Mode,Number of Lights,Average Frame Time (ms),Min Frame Time (ms),Max Frame Time (ms)\n",
    );
    for (mode, per_light) in [("naive", 0.02), ("forward+", 0.004), ("clustered deferred", 0.002)] {
        for count in LIGHT_COUNTS {
            let avg = count as f64 * per_light + 1.0;
            csv.push_str(&format!(
                "{},{},{:.3},{:.3},{:.3}\n",
                mode,
                count,
                avg,
                avg * 0.9,
                avg * 1.2
            ));
        }
    }
    csv
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_full_sweep_loads_complete_grid() {
    let file = write_temp(&sweep_csv());
    let outcome = load_path(file.path(), &LoadConfig::default()).unwrap();

    assert_eq!(outcome.table.len(), 30);
    assert_eq!(outcome.table.modes().len(), 3);
    assert_eq!(outcome.table.light_counts(), &LIGHT_COUNTS);
    assert!(outcome.table.is_complete());
    assert!(outcome.table.grid_gaps().is_empty());
    assert!(outcome.excluded.is_empty());
}

#[test]
fn test_full_sweep_speedups() {
    let file = write_temp(&sweep_csv());
    let outcome = load_path(file.path(), &LoadConfig::default()).unwrap();
    let derived = derive_speedups(&outcome.table, "naive").unwrap();

    assert_eq!(derived.series.len(), 2);
    for series in &derived.series {
        assert_eq!(series.points.len(), LIGHT_COUNTS.len());
        // Both tiled techniques pull further ahead as lights increase.
        let factors: Vec<f64> = series.defined().map(|(_, f)| f).collect();
        assert!(factors.windows(2).all(|w| w[0] <= w[1]));
    }

    let bands = variance_bands(&outcome.table);
    assert_eq!(bands.len(), 3);
    assert!(bands.iter().all(|b| b.points.len() == LIGHT_COUNTS.len()));
}

#[test]
fn test_corrupt_row_is_reported_not_fatal() {
    let mut csv = sweep_csv();
    csv.push_str("naive,5500,20.0,25.0,22.0\n");
    let file = write_temp(&csv);

    let outcome = load_path(file.path(), &LoadConfig::default()).unwrap();
    assert_eq!(outcome.table.len(), 30);
    assert_eq!(outcome.excluded.len(), 1);
    assert_eq!(outcome.excluded[0].light_count, 5500);
    assert_eq!(outcome.excluded[0].line, Some(32));

    let strict = LoadConfig::default().with_integrity(IntegrityPolicy::Strict);
    let err = load_path(file.path(), &strict).unwrap_err();
    assert!(matches!(err, CoreError::DataIntegrity { line: 32, .. }));
}

#[test]
fn test_written_table_matches_source_file() {
    let source = sweep_csv();
    let file = write_temp(&source);
    let outcome = load_path(file.path(), &LoadConfig::default()).unwrap();

    let written = to_csv_string(&outcome.table).unwrap();
    assert_eq!(written, source);

    let copy = write_temp(&written);
    assert_eq!(fs::read_to_string(copy.path()).unwrap(), source);
}
