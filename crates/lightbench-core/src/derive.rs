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

//! Derived comparative metrics: speedup factors and variance bands.
//!
//! A speedup factor is `avg(baseline) / avg(comparison)` at a matched light
//! count; values above 1.0 mean the comparison mode is faster.

use crate::error::{CoreError, InvalidMetric, Result};
use crate::mode::RenderMode;
use crate::table::BenchmarkTable;
use serde::Serialize;

/// Speedup of one comparison mode at one light count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedupPoint {
    /// Light count of the point.
    pub light_count: u32,
    /// Speedup factor, `None` when a frame time was not positive.
    pub factor: Option<f64>,
}

/// Speedups of one comparison mode against the baseline, ascending by light
/// count.
///
/// Light counts where either mode has no sample have no point at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSeries {
    /// Baseline mode.
    pub baseline: RenderMode,
    /// Comparison mode.
    pub comparison: RenderMode,
    /// Points in ascending light-count order.
    pub points: Vec<SpeedupPoint>,
}

impl DerivedSeries {
    /// Factor at a light count, if the point exists and is defined.
    pub fn factor_at(&self, light_count: u32) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.light_count == light_count)
            .and_then(|p| p.factor)
    }

    /// Points with a defined factor.
    pub fn defined(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.factor.map(|f| (p.light_count, f)))
    }

    /// Largest defined factor.
    pub fn max_factor(&self) -> Option<f64> {
        self.defined().map(|(_, f)| f).reduce(f64::max)
    }

    /// Legend label, e.g. `Forward+ vs Naive`.
    pub fn label(&self) -> String {
        format!("{} vs {}", self.comparison.title(), self.baseline.title())
    }
}

/// Output of [`derive_speedups`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derivation {
    /// One series per non-baseline mode, in table mode order.
    pub series: Vec<DerivedSeries>,
    /// Points that could not be computed.
    pub invalid: Vec<InvalidMetric>,
}

/// Ratio of two average frame times, `None` if either is not positive.
pub fn speedup_factor(baseline_ms: f64, comparison_ms: f64) -> Option<f64> {
    (baseline_ms > 0.0 && comparison_ms > 0.0).then(|| baseline_ms / comparison_ms)
}

/// Speedup of `comparison` over `baseline` at one light count.
pub fn speedup_between(
    table: &BenchmarkTable,
    baseline: &str,
    comparison: &str,
    light_count: u32,
) -> Option<f64> {
    let base = table.get(baseline, light_count)?;
    let other = table.get(comparison, light_count)?;
    speedup_factor(base.avg_frame_time_ms, other.avg_frame_time_ms)
}

/// Computes one [`DerivedSeries`] per non-baseline mode.
///
/// A point whose ratio is undefined is kept with `factor: None` and recorded
/// in [`Derivation::invalid`]; the computation continues.
///
/// # Errors
///
/// - [`CoreError::MissingBaseline`] if the baseline has no sample at all
/// - [`CoreError::UndefinedMetrics`] if comparison points exist but none of
///   them is defined
///
/// ```
/// use lightbench_core::{derive_speedups, BenchmarkTable, IntegrityPolicy, Sample};
///
/// let table = BenchmarkTable::from_samples(
///     vec![
///         Sample::new("naive", 1000, 20.0, 18.0, 22.0),
///         Sample::new("forward+", 1000, 10.0, 9.0, 11.0),
///     ],
///     IntegrityPolicy::Lenient,
/// )
/// .unwrap()
/// .table;
///
/// let derived = derive_speedups(&table, "naive").unwrap();
/// assert_eq!(derived.series[0].factor_at(1000), Some(2.0));
/// ```
pub fn derive_speedups(table: &BenchmarkTable, baseline: &str) -> Result<Derivation> {
    if !table.contains_mode(baseline) {
        return Err(CoreError::MissingBaseline {
            baseline: baseline.to_string(),
        });
    }

    let baseline_mode = RenderMode::new(baseline);
    let mut series = Vec::with_capacity(table.modes().len().saturating_sub(1));
    let mut invalid = Vec::new();

    for comparison in table.modes().iter().filter(|m| m.as_str() != baseline) {
        let mut points = Vec::with_capacity(table.light_counts().len());

        for &light_count in table.light_counts() {
            let (Some(base), Some(other)) = (
                table.get(baseline, light_count),
                table.get(comparison.as_str(), light_count),
            ) else {
                continue;
            };

            let factor = speedup_factor(base.avg_frame_time_ms, other.avg_frame_time_ms);
            if factor.is_none() {
                let metric = InvalidMetric {
                    baseline: baseline_mode.clone(),
                    comparison: comparison.clone(),
                    light_count,
                    baseline_ms: base.avg_frame_time_ms,
                    comparison_ms: other.avg_frame_time_ms,
                };
                tracing::warn!("undefined speedup: {}", metric);
                invalid.push(metric);
            }
            points.push(SpeedupPoint {
                light_count,
                factor,
            });
        }

        series.push(DerivedSeries {
            baseline: baseline_mode.clone(),
            comparison: comparison.clone(),
            points,
        });
    }

    let any_points = series.iter().any(|s| !s.points.is_empty());
    let any_defined = series.iter().any(|s| s.defined().next().is_some());
    if any_points && !any_defined {
        return Err(CoreError::UndefinedMetrics {
            baseline: baseline.to_string(),
        });
    }

    tracing::debug!(
        "derived {} speedup series against '{}' ({} undefined points)",
        series.len(),
        baseline,
        invalid.len()
    );

    Ok(Derivation { series, invalid })
}

/// Frame-time statistics of one mode at one light count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandPoint {
    /// Light count.
    pub light_count: u32,
    /// Average frame time.
    pub avg_ms: f64,
    /// Minimum frame time.
    pub min_ms: f64,
    /// Maximum frame time.
    pub max_ms: f64,
}

impl BandPoint {
    /// Width of the band at this point.
    pub fn spread_ms(&self) -> f64 {
        self.max_ms - self.min_ms
    }
}

/// The min–max envelope of one mode across light counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceBand {
    /// Mode of the band.
    pub mode: RenderMode,
    /// Points ascending by light count.
    pub points: Vec<BandPoint>,
}

impl VarianceBand {
    /// Widest spread across the band.
    pub fn max_spread_ms(&self) -> f64 {
        self.points.iter().map(BandPoint::spread_ms).fold(0.0, f64::max)
    }
}

/// Computes one [`VarianceBand`] per mode, in table mode order.
pub fn variance_bands(table: &BenchmarkTable) -> Vec<VarianceBand> {
    table
        .modes()
        .iter()
        .map(|mode| VarianceBand {
            mode: mode.clone(),
            points: table
                .samples_for(mode.as_str())
                .map(|s| BandPoint {
                    light_count: s.light_count,
                    avg_ms: s.avg_frame_time_ms,
                    min_ms: s.min_frame_time_ms,
                    max_ms: s.max_frame_time_ms,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::IntegrityPolicy;
    use crate::sample::Sample;

    fn table(samples: Vec<Sample>) -> BenchmarkTable {
        BenchmarkTable::from_samples(samples, IntegrityPolicy::Lenient)
            .unwrap()
            .table
    }

    #[test]
    fn test_three_mode_speedups() {
        let t = table(vec![
            Sample::new("naive", 1000, 20.0, 18.0, 22.0),
            Sample::new("forward+", 1000, 10.0, 9.0, 11.0),
            Sample::new("clustered deferred", 1000, 5.0, 4.5, 5.5),
        ]);

        let derived = derive_speedups(&t, "naive").unwrap();
        assert_eq!(derived.series.len(), 2);
        assert_eq!(derived.series[0].comparison.as_str(), "forward+");
        assert_eq!(derived.series[0].factor_at(1000), Some(2.0));
        assert_eq!(derived.series[1].comparison.as_str(), "clustered deferred");
        assert_eq!(derived.series[1].factor_at(1000), Some(4.0));
        assert!(derived.invalid.is_empty());
    }

    #[test]
    fn test_parity_is_exactly_one() {
        let t = table(vec![
            Sample::new("naive", 1000, 16.666, 15.0, 18.0),
            Sample::new("forward+", 1000, 16.666, 16.0, 17.0),
        ]);
        let derived = derive_speedups(&t, "naive").unwrap();
        let factor = derived.series[0].factor_at(1000).unwrap();
        assert!((factor - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_baseline_point_is_absent() {
        let t = table(vec![
            Sample::new("naive", 1000, 20.0, 18.0, 22.0),
            Sample::new("forward+", 1000, 10.0, 9.0, 11.0),
            Sample::new("forward+", 2000, 20.0, 19.0, 21.0),
        ]);

        let derived = derive_speedups(&t, "naive").unwrap();
        let series = &derived.series[0];
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].light_count, 1000);
        assert!(series.points.iter().all(|p| p.light_count != 2000));
    }

    #[test]
    fn test_missing_baseline_mode_is_fatal() {
        let t = table(vec![Sample::new("forward+", 1000, 10.0, 9.0, 11.0)]);
        let err = derive_speedups(&t, "naive").unwrap_err();
        assert!(matches!(err, CoreError::MissingBaseline { .. }));
    }

    #[test]
    fn test_zero_frame_time_is_undefined_point() {
        let t = table(vec![
            Sample::new("naive", 1000, 20.0, 18.0, 22.0),
            Sample::new("naive", 2000, 40.0, 38.0, 42.0),
            Sample::new("forward+", 1000, 0.0, 0.0, 0.0),
            Sample::new("forward+", 2000, 10.0, 9.0, 11.0),
        ]);

        let derived = derive_speedups(&t, "naive").unwrap();
        let series = &derived.series[0];
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].factor, None);
        assert_eq!(series.points[1].factor, Some(4.0));
        assert_eq!(derived.invalid.len(), 1);
        assert_eq!(derived.invalid[0].light_count, 1000);
    }

    #[test]
    fn test_all_points_undefined_is_fatal() {
        let t = table(vec![
            Sample::new("naive", 1000, 0.0, 0.0, 0.0),
            Sample::new("forward+", 1000, 10.0, 9.0, 11.0),
        ]);
        let err = derive_speedups(&t, "naive").unwrap_err();
        assert!(matches!(err, CoreError::UndefinedMetrics { .. }));
    }

    #[test]
    fn test_points_are_ascending() {
        let t = table(vec![
            Sample::new("naive", 3000, 60.0, 58.0, 62.0),
            Sample::new("forward+", 3000, 12.0, 11.0, 13.0),
            Sample::new("naive", 500, 10.0, 9.0, 11.0),
            Sample::new("forward+", 500, 5.0, 4.0, 6.0),
        ]);
        let derived = derive_speedups(&t, "naive").unwrap();
        let counts: Vec<u32> = derived.series[0]
            .points
            .iter()
            .map(|p| p.light_count)
            .collect();
        assert_eq!(counts, vec![500, 3000]);
        assert_eq!(derived.series[0].max_factor(), Some(5.0));
    }

    #[test]
    fn test_speedup_between() {
        let t = table(vec![
            Sample::new("forward+", 1000, 10.0, 9.0, 11.0),
            Sample::new("clustered deferred", 1000, 5.0, 4.5, 5.5),
        ]);
        assert_eq!(
            speedup_between(&t, "forward+", "clustered deferred", 1000),
            Some(2.0)
        );
        assert_eq!(speedup_between(&t, "forward+", "naive", 1000), None);
    }

    #[test]
    fn test_series_label() {
        let series = DerivedSeries {
            baseline: RenderMode::new("naive"),
            comparison: RenderMode::new("clustered deferred"),
            points: Vec::new(),
        };
        assert_eq!(series.label(), "Clustered Deferred vs Naive");
    }

    #[test]
    fn test_variance_bands() {
        let t = table(vec![
            Sample::new("naive", 2000, 40.0, 30.0, 55.0),
            Sample::new("naive", 1000, 20.0, 18.0, 22.0),
            Sample::new("forward+", 1000, 10.0, 9.0, 11.0),
        ]);
        let bands = variance_bands(&t);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].mode.as_str(), "naive");
        assert_eq!(bands[0].points[0].light_count, 1000);
        assert_eq!(bands[0].max_spread_ms(), 25.0);
        assert_eq!(bands[1].points.len(), 1);
    }
}
