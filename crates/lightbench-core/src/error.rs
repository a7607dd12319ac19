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

//! Error types for loading benchmark tables and deriving metrics.
//!
//! Conditions that invalidate a whole load or a whole metric are errors.
//! Conditions local to a single row or a single data point are recorded as
//! values ([`ExcludedRow`], [`InvalidMetric`]) so that the caller can report
//! them alongside the successful output.

use crate::mode::RenderMode;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by `lightbench-core`.
///
/// # Examples
///
/// ```
/// use lightbench_core::CoreError;
///
/// let err = CoreError::TypeMismatch {
///     line: 4,
///     column: "Number of Lights".to_string(),
///     expected: "positive integer".to_string(),
///     value: "lots".to_string(),
/// };
///
/// assert_eq!(
///     err.to_string(),
///     "Type mismatch at line 4 in column 'Number of Lights': expected positive integer, got 'lots'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum CoreError {
    /// The input source could not be read.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Path of the unreadable source.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// Malformed CSV (unbalanced quotes, ragged rows, invalid UTF-8).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The header contains a column outside the benchmark schema.
    #[error("Unexpected column '{column}' at position {position}")]
    UnexpectedColumn {
        /// Column name as it appeared in the header.
        column: String,
        /// Position of the column (0-based).
        position: usize,
    },

    /// A value could not be converted to its column type.
    #[error("Type mismatch at line {line} in column '{column}': expected {expected}, got '{value}'")]
    TypeMismatch {
        /// Line number of the offending record (1-based, header is line 1).
        line: u64,
        /// Column name.
        column: String,
        /// Expected type description.
        expected: String,
        /// Raw field value.
        value: String,
    },

    /// The input exceeds the configured row limit.
    #[error("Row limit exceeded: row count {actual} exceeds maximum {limit}")]
    RowLimit {
        /// Maximum allowed rows.
        limit: usize,
        /// Row count reached.
        actual: usize,
    },

    /// A row violated a data-integrity rule while loading in strict mode.
    #[error("Data integrity violation at line {line}: {violation}")]
    DataIntegrity {
        /// Line number of the offending record.
        line: u64,
        /// The violated rule.
        violation: IntegrityViolation,
    },

    /// No rows survived loading.
    #[error("Benchmark table is empty")]
    EmptyTable,

    /// The baseline mode has no sample at any light count.
    #[error("Baseline mode '{baseline}' is not present in the benchmark table")]
    MissingBaseline {
        /// Requested baseline label.
        baseline: String,
    },

    /// The baseline exists but every derived point is undefined.
    #[error("Every speedup relative to baseline '{baseline}' is undefined")]
    UndefinedMetrics {
        /// Baseline label.
        baseline: String,
    },
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Creates an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Returns true for errors caused by the shape or content of the input
    /// rather than by the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CoreError::Csv(_)
                | CoreError::MissingColumn(_)
                | CoreError::UnexpectedColumn { .. }
                | CoreError::TypeMismatch { .. }
                | CoreError::DataIntegrity { .. }
                | CoreError::EmptyTable
        )
    }
}

/// A per-row rule that a loaded sample broke.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityViolation {
    /// `min <= avg <= max` does not hold.
    FrameTimeOrder {
        /// Minimum frame time.
        min: f64,
        /// Average frame time.
        avg: f64,
        /// Maximum frame time.
        max: f64,
    },
    /// A sample for the same `(mode, light count)` cell was already loaded.
    Duplicate {
        /// Line of the sample that was kept, when known.
        first_line: Option<u64>,
    },
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityViolation::FrameTimeOrder { min, avg, max } => write!(
                f,
                "expected min <= avg <= max, got min={} avg={} max={}",
                min, avg, max
            ),
            IntegrityViolation::Duplicate {
                first_line: Some(line),
            } => write!(f, "duplicate of the sample at line {}", line),
            IntegrityViolation::Duplicate { first_line: None } => {
                write!(f, "duplicate of an earlier sample")
            }
        }
    }
}

/// A row that was dropped while loading in lenient mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludedRow {
    /// Line number of the record, when it came from a file.
    pub line: Option<u64>,
    /// Render mode of the dropped row.
    pub mode: RenderMode,
    /// Light count of the dropped row.
    pub light_count: u32,
    /// Why the row was dropped.
    pub reason: IntegrityViolation,
}

impl fmt::Display for ExcludedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "line {}: {} @ {} lights: {}",
                line, self.mode, self.light_count, self.reason
            ),
            None => write!(
                f,
                "{} @ {} lights: {}",
                self.mode, self.light_count, self.reason
            ),
        }
    }
}

/// A speedup point that could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidMetric {
    /// Baseline mode.
    pub baseline: RenderMode,
    /// Comparison mode.
    pub comparison: RenderMode,
    /// Light count of the point.
    pub light_count: u32,
    /// Baseline average frame time.
    pub baseline_ms: f64,
    /// Comparison average frame time.
    pub comparison_ms: f64,
}

impl fmt::Display for InvalidMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs {} @ {} lights: undefined ratio {} / {}",
            self.comparison, self.baseline, self.light_count, self.baseline_ms, self.comparison_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = CoreError::MissingColumn("Render Mode".to_string());
        assert_eq!(err.to_string(), "Missing required column: Render Mode");
    }

    #[test]
    fn test_unexpected_column_display() {
        let err = CoreError::UnexpectedColumn {
            column: "GPU".to_string(),
            position: 5,
        };
        assert_eq!(err.to_string(), "Unexpected column 'GPU' at position 5");
    }

    #[test]
    fn test_missing_baseline_display() {
        let err = CoreError::MissingBaseline {
            baseline: "naive".to_string(),
        };
        assert!(err.to_string().contains("'naive'"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CoreError::io_error("bench.csv", io);
        assert_eq!(err.to_string(), "I/O error for 'bench.csv': no such file");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_integrity_violation_display() {
        let violation = IntegrityViolation::FrameTimeOrder {
            min: 25.0,
            avg: 20.0,
            max: 22.0,
        };
        assert_eq!(
            violation.to_string(),
            "expected min <= avg <= max, got min=25 avg=20 max=22"
        );

        let dup = IntegrityViolation::Duplicate {
            first_line: Some(3),
        };
        assert_eq!(dup.to_string(), "duplicate of the sample at line 3");
    }

    #[test]
    fn test_excluded_row_display() {
        let row = ExcludedRow {
            line: Some(7),
            mode: RenderMode::new("naive"),
            light_count: 1000,
            reason: IntegrityViolation::Duplicate { first_line: None },
        };
        assert_eq!(
            row.to_string(),
            "line 7: naive @ 1000 lights: duplicate of an earlier sample"
        );
    }
}
