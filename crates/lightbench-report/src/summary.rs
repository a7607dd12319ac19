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

//! Textual numeric summary of a benchmark run.
//!
//! The summary reports per-mode frame times at one highlight light count,
//! pairwise speedups at that point, and every row or point the pipeline had
//! to set aside.

use lightbench_core::{
    speedup_between, BenchmarkTable, ExcludedRow, GridGap, InvalidMetric, RenderMode,
};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Decimal places of summary numbers unless configured otherwise.
pub const DEFAULT_SUMMARY_PRECISION: usize = 1;

const TITLE_WIDTH: usize = 20;

/// Frame times of one mode at the highlight light count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeStats {
    /// Mode.
    pub mode: RenderMode,
    /// Average frame time, `None` when the mode has no sample there.
    pub avg_ms: Option<f64>,
    /// Minimum frame time.
    pub min_ms: Option<f64>,
    /// Maximum frame time.
    pub max_ms: Option<f64>,
}

/// Speedup of `mode` over the earlier `reference` mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSpeedup {
    /// Mode listed earlier in the table.
    pub reference: RenderMode,
    /// Mode listed later in the table.
    pub mode: RenderMode,
    /// `avg(reference) / avg(mode)`, `None` if absent or undefined.
    pub factor: Option<f64>,
}

impl PairSpeedup {
    /// Display label, e.g. `Clustered Deferred vs Forward+`.
    pub fn label(&self) -> String {
        format!("{} vs {}", self.mode.title(), self.reference.title())
    }
}

/// Everything the text and JSON summaries print.
///
/// # Examples
///
/// ```
/// use lightbench_core::{BenchmarkTable, IntegrityPolicy, Sample};
/// use lightbench_report::Summary;
///
/// let table = BenchmarkTable::from_samples(
///     vec![
///         Sample::new("naive", 5000, 40.0, 35.0, 45.0),
///         Sample::new("forward+", 5000, 10.0, 9.0, 12.0),
///     ],
///     IntegrityPolicy::Lenient,
/// )
/// .unwrap()
/// .table;
///
/// let text = Summary::new(&table, None).to_string();
/// assert!(text.contains("At 5000 lights:"));
/// assert!(text.contains("Forward+ vs Naive: 4.0x faster"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Light count the summary reports on.
    pub highlight_light_count: u32,
    /// Per-mode frame times, in table mode order.
    pub modes: Vec<ModeStats>,
    /// Speedups for every ordered pair of modes.
    pub speedups: Vec<PairSpeedup>,
    /// Rows dropped while loading.
    pub excluded: Vec<ExcludedRow>,
    /// Speedup points that could not be computed.
    pub undefined: Vec<InvalidMetric>,
    /// Missing cells of the mode × light-count grid.
    pub grid_gaps: Vec<GridGap>,
    #[serde(skip)]
    precision: usize,
}

impl Summary {
    /// Builds the summary at `highlight`, or at the largest light count in
    /// the table when `None`.
    pub fn new(table: &BenchmarkTable, highlight: Option<u32>) -> Self {
        let highlight = highlight
            .or_else(|| table.light_counts().last().copied())
            .unwrap_or(0);

        let modes = table
            .modes()
            .iter()
            .map(|mode| {
                let sample = table.get(mode.as_str(), highlight);
                ModeStats {
                    mode: mode.clone(),
                    avg_ms: sample.map(|s| s.avg_frame_time_ms),
                    min_ms: sample.map(|s| s.min_frame_time_ms),
                    max_ms: sample.map(|s| s.max_frame_time_ms),
                }
            })
            .collect();

        let mut speedups = Vec::new();
        for (i, reference) in table.modes().iter().enumerate() {
            for mode in &table.modes()[i + 1..] {
                speedups.push(PairSpeedup {
                    reference: reference.clone(),
                    mode: mode.clone(),
                    factor: speedup_between(table, reference.as_str(), mode.as_str(), highlight),
                });
            }
        }

        Self {
            highlight_light_count: highlight,
            modes,
            speedups,
            excluded: Vec::new(),
            undefined: Vec::new(),
            grid_gaps: table.grid_gaps(),
            precision: DEFAULT_SUMMARY_PRECISION,
        }
    }

    /// Records the rows dropped while loading.
    pub fn with_excluded(mut self, excluded: Vec<ExcludedRow>) -> Self {
        self.excluded = excluded;
        self
    }

    /// Records the speedup points that could not be computed.
    pub fn with_undefined(mut self, undefined: Vec<InvalidMetric>) -> Self {
        self.undefined = undefined;
        self
    }

    /// Sets the decimal places of printed numbers.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Returns true if nothing was excluded, undefined or missing.
    pub fn is_clean(&self) -> bool {
        self.excluded.is_empty() && self.undefined.is_empty() && self.grid_gaps.is_empty()
    }

    /// Writes the text form to `writer`.
    pub fn write_text<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.to_string().as_bytes())
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = self.precision;
        let at = self.highlight_light_count;

        writeln!(f, "=== Performance Summary ===")?;
        writeln!(f)?;
        writeln!(f, "At {} lights:", at)?;
        for stats in &self.modes {
            let title = stats.mode.title();
            match (stats.avg_ms, stats.min_ms, stats.max_ms) {
                (Some(avg), Some(min), Some(max)) => writeln!(
                    f,
                    "{:<width$}: {:>6.prec$}ms avg, {:>6.prec$}ms min, {:>6.prec$}ms max",
                    title,
                    avg,
                    min,
                    max,
                    width = TITLE_WIDTH,
                    prec = prec
                )?,
                _ => writeln!(f, "{:<width$}: no sample", title, width = TITLE_WIDTH)?,
            }
        }

        if !self.speedups.is_empty() {
            writeln!(f)?;
            writeln!(f, "Speedup at {} lights:", at)?;
            let labels: Vec<String> = self
                .speedups
                .iter()
                .map(|pair| format!("{}:", pair.label()))
                .collect();
            let width = labels.iter().map(String::len).max().unwrap_or(0);
            for (label, pair) in labels.iter().zip(&self.speedups) {
                match pair.factor {
                    Some(factor) => writeln!(
                        f,
                        "{:<width$} {:.prec$}x faster",
                        label,
                        factor,
                        width = width,
                        prec = prec
                    )?,
                    None => writeln!(f, "{:<width$} n/a", label, width = width)?,
                }
            }
        }

        writeln!(f)?;
        write_section(f, "Excluded rows", &self.excluded)?;
        write_section(f, "Undefined speedup points", &self.undefined)?;
        write_section(f, "Grid gaps", &self.grid_gaps)
    }
}

fn write_section<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    items: &[T],
) -> fmt::Result {
    if items.is_empty() {
        return writeln!(f, "{}: none", name);
    }
    writeln!(f, "{} ({}):", name, items.len())?;
    for item in items {
        writeln!(f, "  - {}", item)?;
    }
    Ok(())
}

/// Exports the summary as JSON.
pub fn export_json(summary: &Summary, path: &Path) -> io::Result<()> {
    let json = summary
        .to_json()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, json)?;
    Ok(())
}
