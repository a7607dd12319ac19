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

//! Load benchmark CSV files into a [`BenchmarkTable`].
//!
//! The input has exactly five columns, in any order:
//!
//! | Column | Type |
//! |---|---|
//! | `Render Mode` | non-empty string |
//! | `Number of Lights` | positive integer |
//! | `Average Frame Time (ms)` | finite float ≥ 0 |
//! | `Min Frame Time (ms)` | finite float ≥ 0 |
//! | `Max Frame Time (ms)` | finite float ≥ 0 |
//!
//! Schema and type problems abort the load. Rows that parse but break
//! `min <= avg <= max`, or repeat an already loaded `(mode, light count)`
//! cell, are handled by the configured [`IntegrityPolicy`].

use crate::error::{CoreError, ExcludedRow, Result};
use crate::mode::RenderMode;
use crate::sample::Sample;
use crate::table::{BenchmarkTable, TableBuilder};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header of the render mode column.
pub const COL_MODE: &str = "Render Mode";
/// Header of the light count column.
pub const COL_LIGHTS: &str = "Number of Lights";
/// Header of the average frame time column.
pub const COL_AVG: &str = "Average Frame Time (ms)";
/// Header of the minimum frame time column.
pub const COL_MIN: &str = "Min Frame Time (ms)";
/// Header of the maximum frame time column.
pub const COL_MAX: &str = "Max Frame Time (ms)";

/// Canonical column order, as written by [`crate::write_csv`].
pub const COLUMNS: [&str; 5] = [COL_MODE, COL_LIGHTS, COL_AVG, COL_MIN, COL_MAX];

/// Field-name spellings accepted in place of the canonical headers.
const ALIASES: [&str; 5] = [
    "mode",
    "light_count",
    "avg_frame_time_ms",
    "min_frame_time_ms",
    "max_frame_time_ms",
];

/// Default maximum number of data rows.
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// What to do with a row that parses but breaks an integrity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrityPolicy {
    /// Drop the row, log a warning and record it in [`LoadOutcome::excluded`].
    #[default]
    Lenient,
    /// Abort the load with [`CoreError::DataIntegrity`].
    Strict,
}

/// Configuration for loading benchmark CSV.
///
/// ```
/// use lightbench_core::{IntegrityPolicy, LoadConfig};
///
/// let config = LoadConfig::default()
///     .with_delimiter(b';')
///     .with_integrity(IntegrityPolicy::Strict);
/// assert_eq!(config.delimiter, b';');
/// assert!(config.trim);
/// ```
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Trim whitespace around headers and fields (default: `true`).
    pub trim: bool,
    /// Maximum number of data rows (default: 1,000,000).
    pub max_rows: usize,
    /// Handling of integrity violations (default: lenient).
    pub integrity: IntegrityPolicy,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            max_rows: DEFAULT_MAX_ROWS,
            integrity: IntegrityPolicy::Lenient,
        }
    }
}

impl LoadConfig {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whitespace trimming.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Sets the row limit.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Sets the integrity policy.
    pub fn with_integrity(mut self, integrity: IntegrityPolicy) -> Self {
        self.integrity = integrity;
        self
    }
}

/// A loaded table plus the rows dropped on the way.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// The loaded table.
    pub table: BenchmarkTable,
    /// Rows excluded under [`IntegrityPolicy::Lenient`], in input order.
    pub excluded: Vec<ExcludedRow>,
}

/// Loads a benchmark CSV file.
///
/// # Errors
///
/// [`CoreError::Io`] if the file cannot be opened, plus everything
/// [`load_reader`] returns.
pub fn load_path(path: impl AsRef<Path>, config: &LoadConfig) -> Result<LoadOutcome> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CoreError::io_error(path, e))?;
    tracing::debug!("loading benchmark table from {}", path.display());
    load_reader(file, config)
}

/// Loads benchmark CSV held in memory.
///
/// ```
/// use lightbench_core::{load_str, LoadConfig};
///
/// let csv = "Render Mode,Number of Lights,Average Frame Time (ms),Min Frame Time (ms),Max Frame Time (ms)\n\
///            naive,1000,20.0,18.0,22.0\n";
/// let outcome = load_str(csv, &LoadConfig::default()).unwrap();
/// assert_eq!(outcome.table.len(), 1);
/// assert!(outcome.excluded.is_empty());
/// ```
pub fn load_str(csv: &str, config: &LoadConfig) -> Result<LoadOutcome> {
    load_reader(csv.as_bytes(), config)
}

/// Loads benchmark CSV from any reader.
///
/// # Errors
///
/// - [`CoreError::Csv`]: malformed CSV, including rows with the wrong width
/// - [`CoreError::MissingColumn`] / [`CoreError::UnexpectedColumn`]: header
///   does not match the schema
/// - [`CoreError::TypeMismatch`]: a field has the wrong type
/// - [`CoreError::RowLimit`]: more than `config.max_rows` data rows
/// - [`CoreError::DataIntegrity`]: integrity violation in strict mode
/// - [`CoreError::EmptyTable`]: no rows survived
pub fn load_reader<R: Read>(reader: R, config: &LoadConfig) -> Result<LoadOutcome> {
    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .flexible(false)
        .trim(if config.trim { Trim::All } else { Trim::None })
        .from_reader(reader);

    let layout = ColumnLayout::from_headers(reader.headers()?)?;

    let mut builder = TableBuilder::default();
    let mut excluded = Vec::new();
    let mut rows = 0usize;

    for result in reader.records() {
        let record = result?;
        rows += 1;
        if rows > config.max_rows {
            return Err(CoreError::RowLimit {
                limit: config.max_rows,
                actual: rows,
            });
        }

        let line = record.position().map(|p| p.line()).unwrap_or(rows as u64 + 1);
        let sample = layout.parse_record(&record, line)?;
        builder.admit(sample, Some(line), config.integrity, &mut excluded)?;
    }

    tracing::debug!(
        "loaded {} samples from {} rows ({} excluded)",
        builder.len(),
        rows,
        excluded.len()
    );

    Ok(LoadOutcome {
        table: builder.finish()?,
        excluded,
    })
}

/// Field positions of the schema columns in the actual header.
#[derive(Debug)]
struct ColumnLayout {
    positions: [usize; 5],
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions: [Option<usize>; 5] = [None; 5];

        for (position, name) in headers.iter().enumerate() {
            let slot = COLUMNS
                .iter()
                .zip(ALIASES.iter())
                .position(|(canonical, alias)| name == *canonical || name == *alias);

            match slot {
                Some(slot) if positions[slot].is_none() => positions[slot] = Some(position),
                _ => {
                    return Err(CoreError::UnexpectedColumn {
                        column: name.to_string(),
                        position,
                    })
                }
            }
        }

        let mut resolved = [0usize; 5];
        for (slot, position) in positions.iter().enumerate() {
            resolved[slot] =
                position.ok_or_else(|| CoreError::MissingColumn(COLUMNS[slot].to_string()))?;
        }

        Ok(Self {
            positions: resolved,
        })
    }

    fn field<'r>(&self, record: &'r StringRecord, slot: usize) -> &'r str {
        // Width is enforced by the non-flexible reader.
        record.get(self.positions[slot]).unwrap_or("")
    }

    fn parse_record(&self, record: &StringRecord, line: u64) -> Result<Sample> {
        let mode = self.field(record, 0);
        if mode.is_empty() {
            return Err(type_mismatch(line, 0, "non-empty render mode label", mode));
        }

        let raw_lights = self.field(record, 1);
        let light_count = raw_lights
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| type_mismatch(line, 1, "positive integer", raw_lights))?;

        let avg = parse_frame_time(self.field(record, 2), line, 2)?;
        let min = parse_frame_time(self.field(record, 3), line, 3)?;
        let max = parse_frame_time(self.field(record, 4), line, 4)?;

        Ok(Sample {
            mode: RenderMode::new(mode),
            light_count,
            avg_frame_time_ms: avg,
            min_frame_time_ms: min,
            max_frame_time_ms: max,
        })
    }
}

fn parse_frame_time(raw: &str, line: u64, slot: usize) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| type_mismatch(line, slot, "non-negative number", raw))
}

fn type_mismatch(line: u64, slot: usize, expected: &str, value: &str) -> CoreError {
    CoreError::TypeMismatch {
        line,
        column: COLUMNS[slot].to_string(),
        expected: expected.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntegrityViolation;

    const HEADER: &str = "Render Mode,Number of Lights,Average Frame Time (ms),Min Frame Time (ms),Max Frame Time (ms)";

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_load_preserves_values() {
        let outcome = load_str(
            &csv(&[
                "naive,1000,20.0,18.0,22.0",
                "forward+,1000,10.0,9.0,11.0",
                "clustered deferred,1000,5.0,4.5,5.5",
            ]),
            &LoadConfig::default(),
        )
        .unwrap();

        let table = outcome.table;
        assert_eq!(table.len(), 3);
        let cd = table.get("clustered deferred", 1000).unwrap();
        assert_eq!(cd.avg_frame_time_ms, 5.0);
        assert_eq!(cd.min_frame_time_ms, 4.5);
        assert_eq!(cd.max_frame_time_ms, 5.5);
    }

    #[test]
    fn test_column_order_is_free() {
        let text = "Max Frame Time (ms),Render Mode,Min Frame Time (ms),Number of Lights,Average Frame Time (ms)\n\
                    22.0,naive,18.0,1000,20.0\n";
        let outcome = load_str(text, &LoadConfig::default()).unwrap();
        let sample = outcome.table.get("naive", 1000).unwrap();
        assert_eq!(sample.avg_frame_time_ms, 20.0);
        assert_eq!(sample.max_frame_time_ms, 22.0);
    }

    #[test]
    fn test_field_name_aliases() {
        let text = "mode,light_count,avg_frame_time_ms,min_frame_time_ms,max_frame_time_ms\n\
                    naive,500,1.0,0.5,1.5\n";
        let outcome = load_str(text, &LoadConfig::default()).unwrap();
        assert_eq!(outcome.table.len(), 1);
    }

    #[test]
    fn test_min_above_avg_is_excluded() {
        let outcome = load_str(
            &csv(&["naive,1000,20.0,25.0,22.0", "forward+,1000,10.0,9.0,11.0"]),
            &LoadConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.table.len(), 1);
        assert!(outcome.table.get("naive", 1000).is_none());
        assert_eq!(outcome.excluded.len(), 1);
        assert_eq!(outcome.excluded[0].line, Some(2));
        assert_eq!(
            outcome.excluded[0].reason,
            IntegrityViolation::FrameTimeOrder {
                min: 25.0,
                avg: 20.0,
                max: 22.0
            }
        );
    }

    #[test]
    fn test_strict_mode_aborts() {
        let config = LoadConfig::default().with_integrity(IntegrityPolicy::Strict);
        let err = load_str(&csv(&["naive,1000,20.0,25.0,22.0"]), &config).unwrap_err();
        assert!(matches!(err, CoreError::DataIntegrity { line: 2, .. }));
    }

    #[test]
    fn test_missing_column() {
        let text = "Render Mode,Number of Lights,Average Frame Time (ms),Min Frame Time (ms)\n\
                    naive,1000,20.0,18.0\n";
        let err = load_str(text, &LoadConfig::default()).unwrap_err();
        match err {
            CoreError::MissingColumn(name) => assert_eq!(name, COL_MAX),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_column() {
        let text = format!("{},GPU\nnaive,1000,20.0,18.0,22.0,RTX\n", HEADER);
        let err = load_str(&text, &LoadConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnexpectedColumn { position: 5, .. }
        ));
    }

    #[test]
    fn test_repeated_column() {
        let text = format!("{},Render Mode\n", HEADER);
        let err = load_str(&text, &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::UnexpectedColumn { .. }));
    }

    #[test]
    fn test_non_numeric_frame_time() {
        let err = load_str(&csv(&["naive,1000,fast,18.0,22.0"]), &LoadConfig::default())
            .unwrap_err();
        match err {
            CoreError::TypeMismatch {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, COL_AVG);
                assert_eq!(value, "fast");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_light_count_must_be_positive_integer() {
        for bad in ["0", "-5", "1.5", "many"] {
            let row = format!("naive,{},20.0,18.0,22.0", bad);
            let err = load_str(&csv(&[&row]), &LoadConfig::default()).unwrap_err();
            assert!(
                matches!(err, CoreError::TypeMismatch { ref column, .. } if column == COL_LIGHTS),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn test_negative_and_non_finite_times_rejected() {
        for bad in ["-1.0", "NaN", "inf"] {
            let row = format!("naive,1000,{},18.0,22.0", bad);
            let err = load_str(&csv(&[&row]), &LoadConfig::default()).unwrap_err();
            assert!(matches!(err, CoreError::TypeMismatch { .. }), "{bad}");
        }
    }

    #[test]
    fn test_empty_mode_rejected() {
        let err = load_str(&csv(&[",1000,20.0,18.0,22.0"]), &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch { ref column, .. } if column == COL_MODE));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let err = load_str(&csv(&["naive,1000,20.0"]), &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::Csv(_)));
    }

    #[test]
    fn test_row_limit() {
        let config = LoadConfig::default().with_max_rows(1);
        let err = load_str(
            &csv(&["naive,1000,20.0,18.0,22.0", "naive,2000,40.0,38.0,42.0"]),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::RowLimit { limit: 1, actual: 2 }));
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let err = load_str(&csv(&[]), &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyTable));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let text = HEADER.replace(',', ";") + "\nnaive;1000;20.0;18.0;22.0\n";
        let config = LoadConfig::default().with_delimiter(b';');
        let outcome = load_str(&text, &config).unwrap();
        assert_eq!(outcome.table.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_path("/definitely/not/here.csv", &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }
}
