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

//! In-memory benchmark table indexed by `(mode, light count)`.

use crate::error::{CoreError, ExcludedRow, IntegrityViolation, Result};
use crate::loader::{IntegrityPolicy, LoadOutcome};
use crate::mode::RenderMode;
use crate::sample::Sample;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A `(mode, light count)` cell with no sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridGap {
    /// Mode missing a sample.
    pub mode: RenderMode,
    /// Light count at which the sample is missing.
    pub light_count: u32,
}

impl fmt::Display for GridGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no sample for {} @ {} lights", self.mode, self.light_count)
    }
}

/// Loaded benchmark samples with an index built once at construction.
///
/// Modes are kept in first-appearance order; light counts are ascending.
/// Every sample in a table satisfies `min <= avg <= max` and no two samples
/// share a `(mode, light count)` cell.
#[derive(Debug, Clone)]
pub struct BenchmarkTable {
    samples: Vec<Sample>,
    index: HashMap<RenderMode, HashMap<u32, usize>>,
    modes: Vec<RenderMode>,
    light_counts: Vec<u32>,
}

impl BenchmarkTable {
    /// Builds a table from samples that did not come from a file, e.g. ones
    /// aggregated with [`Sample::from_frame_times`].
    ///
    /// Integrity violations are handled according to `policy`, exactly as
    /// the CSV loader does.
    ///
    /// # Errors
    ///
    /// - [`CoreError::DataIntegrity`] under [`IntegrityPolicy::Strict`]
    /// - [`CoreError::EmptyTable`] when no sample survives
    pub fn from_samples(
        samples: impl IntoIterator<Item = Sample>,
        policy: IntegrityPolicy,
    ) -> Result<LoadOutcome> {
        let mut builder = TableBuilder::default();
        let mut excluded = Vec::new();

        for sample in samples {
            builder.admit(sample, None, policy, &mut excluded)?;
        }

        Ok(LoadOutcome {
            table: builder.finish()?,
            excluded,
        })
    }

    /// Looks up the sample for a cell.
    pub fn get(&self, mode: &str, light_count: u32) -> Option<&Sample> {
        self.index
            .get(mode)
            .and_then(|by_count| by_count.get(&light_count))
            .map(|&i| &self.samples[i])
    }

    /// Returns true if the mode has at least one sample.
    pub fn contains_mode(&self, mode: &str) -> bool {
        self.index.contains_key(mode)
    }

    /// All samples in load order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Modes in first-appearance order.
    pub fn modes(&self) -> &[RenderMode] {
        &self.modes
    }

    /// Distinct light counts, ascending.
    pub fn light_counts(&self) -> &[u32] {
        &self.light_counts
    }

    /// Samples of one mode ordered by ascending light count.
    pub fn samples_for<'a>(&'a self, mode: &'a str) -> impl Iterator<Item = &'a Sample> + 'a {
        self.light_counts
            .iter()
            .filter_map(move |&count| self.get(mode, count))
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the table holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Cells missing from the complete mode × light-count grid, ordered by
    /// mode then light count.
    pub fn grid_gaps(&self) -> Vec<GridGap> {
        let mut gaps = Vec::new();
        for mode in &self.modes {
            for &light_count in &self.light_counts {
                if self.get(mode.as_str(), light_count).is_none() {
                    gaps.push(GridGap {
                        mode: mode.clone(),
                        light_count,
                    });
                }
            }
        }
        gaps
    }

    /// Returns true if every mode has a sample at every light count.
    pub fn is_complete(&self) -> bool {
        self.samples.len() == self.modes.len() * self.light_counts.len()
    }

    /// Largest average frame time across all samples.
    pub fn max_avg_frame_time_ms(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.avg_frame_time_ms)
            .fold(0.0, f64::max)
    }
}

/// Accumulates samples while enforcing cell uniqueness and frame-time order.
#[derive(Debug, Default)]
pub(crate) struct TableBuilder {
    samples: Vec<Sample>,
    lines: Vec<Option<u64>>,
    index: HashMap<RenderMode, HashMap<u32, usize>>,
    modes: Vec<RenderMode>,
}

impl TableBuilder {
    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }

    /// Inserts a sample or reports the rule it breaks.
    pub(crate) fn insert(
        &mut self,
        sample: Sample,
        line: Option<u64>,
    ) -> std::result::Result<(), IntegrityViolation> {
        sample.check()?;

        if let Some(&existing) = self
            .index
            .get(sample.mode.as_str())
            .and_then(|by_count| by_count.get(&sample.light_count))
        {
            return Err(IntegrityViolation::Duplicate {
                first_line: self.lines[existing],
            });
        }

        if !self.index.contains_key(sample.mode.as_str()) {
            self.modes.push(sample.mode.clone());
        }
        self.index
            .entry(sample.mode.clone())
            .or_default()
            .insert(sample.light_count, self.samples.len());
        self.samples.push(sample);
        self.lines.push(line);
        Ok(())
    }

    /// Inserts a sample, applying `policy` to a violation.
    pub(crate) fn admit(
        &mut self,
        sample: Sample,
        line: Option<u64>,
        policy: IntegrityPolicy,
        excluded: &mut Vec<ExcludedRow>,
    ) -> Result<()> {
        let mode = sample.mode.clone();
        let light_count = sample.light_count;

        match self.insert(sample, line) {
            Ok(()) => Ok(()),
            Err(violation) => match policy {
                IntegrityPolicy::Strict => Err(CoreError::DataIntegrity {
                    line: line.unwrap_or(0),
                    violation,
                }),
                IntegrityPolicy::Lenient => {
                    let row = ExcludedRow {
                        line,
                        mode,
                        light_count,
                        reason: violation,
                    };
                    tracing::warn!("excluding row: {}", row);
                    excluded.push(row);
                    Ok(())
                }
            },
        }
    }

    pub(crate) fn finish(self) -> Result<BenchmarkTable> {
        if self.samples.is_empty() {
            return Err(CoreError::EmptyTable);
        }

        let mut light_counts: Vec<u32> = self.samples.iter().map(|s| s.light_count).collect();
        light_counts.sort_unstable();
        light_counts.dedup();

        Ok(BenchmarkTable {
            samples: self.samples,
            index: self.index,
            modes: self.modes,
            light_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(samples: Vec<Sample>) -> BenchmarkTable {
        BenchmarkTable::from_samples(samples, IntegrityPolicy::Lenient)
            .unwrap()
            .table
    }

    #[test]
    fn test_lookup_and_ordering() {
        let t = table(vec![
            Sample::new("naive", 2000, 40.0, 38.0, 42.0),
            Sample::new("forward+", 1000, 10.0, 9.0, 11.0),
            Sample::new("naive", 1000, 20.0, 18.0, 22.0),
        ]);

        assert_eq!(t.len(), 3);
        assert_eq!(
            t.modes(),
            &[RenderMode::new("naive"), RenderMode::new("forward+")]
        );
        assert_eq!(t.light_counts(), &[1000, 2000]);
        assert_eq!(t.get("naive", 2000).unwrap().avg_frame_time_ms, 40.0);
        assert!(t.get("forward+", 2000).is_none());

        let counts: Vec<u32> = t.samples_for("naive").map(|s| s.light_count).collect();
        assert_eq!(counts, vec![1000, 2000]);
    }

    #[test]
    fn test_grid_gaps() {
        let t = table(vec![
            Sample::new("naive", 1000, 20.0, 18.0, 22.0),
            Sample::new("naive", 2000, 40.0, 38.0, 42.0),
            Sample::new("forward+", 1000, 10.0, 9.0, 11.0),
        ]);

        assert!(!t.is_complete());
        assert_eq!(
            t.grid_gaps(),
            vec![GridGap {
                mode: RenderMode::new("forward+"),
                light_count: 2000
            }]
        );
    }

    #[test]
    fn test_duplicates_are_excluded_leniently() {
        let outcome = BenchmarkTable::from_samples(
            vec![
                Sample::new("naive", 1000, 20.0, 18.0, 22.0),
                Sample::new("naive", 1000, 99.0, 98.0, 100.0),
            ],
            IntegrityPolicy::Lenient,
        )
        .unwrap();

        assert_eq!(outcome.table.len(), 1);
        assert_eq!(outcome.table.get("naive", 1000).unwrap().avg_frame_time_ms, 20.0);
        assert_eq!(outcome.excluded.len(), 1);
        assert!(matches!(
            outcome.excluded[0].reason,
            IntegrityViolation::Duplicate { .. }
        ));
    }

    #[test]
    fn test_strict_policy_rejects_disorder() {
        let result = BenchmarkTable::from_samples(
            vec![Sample::new("naive", 1000, 20.0, 25.0, 22.0)],
            IntegrityPolicy::Strict,
        );
        assert!(matches!(result, Err(CoreError::DataIntegrity { .. })));
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let result = BenchmarkTable::from_samples(Vec::new(), IntegrityPolicy::Lenient);
        assert!(matches!(result, Err(CoreError::EmptyTable)));
    }

    #[test]
    fn test_max_avg_frame_time() {
        let t = table(vec![
            Sample::new("naive", 1000, 20.0, 18.0, 22.0),
            Sample::new("forward+", 1000, 10.0, 9.0, 11.0),
        ]);
        assert_eq!(t.max_avg_frame_time_ms(), 20.0);
    }
}
