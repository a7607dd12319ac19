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

//! The chart composer: a pure mapping from table, derived series and style
//! to panel specifications.

use crate::error::{ChartError, Result};
use crate::panel::{
    Anchor, Annotation, AxisSpec, Bar, BandSpan, ErrorBarSpec, LegendPosition, PanelKind,
    PanelSpec, ReferenceLineSpec, SeriesGeometry, SeriesSpec, Tick,
};
use crate::style::{AxisRange, Color, StyleConfig};
use lightbench_core::{BenchmarkTable, DerivedSeries, RenderMode};
use tracing::debug;

/// Axis label for light counts.
pub const LIGHT_COUNT_LABEL: &str = "Number of Lights";

const REFERENCE_OPACITY: f64 = 0.5;
const PARITY_OPACITY: f64 = 0.3;
const BAND_OPACITY: f64 = 0.15;
const ERROR_BAR_OPACITY: f64 = 0.3;

/// Series label used in errors when a panel has no series at all.
const NO_SERIES: &str = "<none>";

/// Composes the requested panels in order.
///
/// # Errors
///
/// - [`ChartError::InvalidStyle`] if `style` does not validate
/// - [`ChartError::EmptySeries`] from the first panel that cannot be drawn
pub fn compose(
    table: &BenchmarkTable,
    derived: &[DerivedSeries],
    style: &StyleConfig,
    kinds: &[PanelKind],
) -> Result<Vec<PanelSpec>> {
    style.validate()?;
    kinds
        .iter()
        .map(|&kind| compose_panel(kind, table, derived, style))
        .collect()
}

/// Composes one panel of the given kind.
pub fn compose_panel(
    kind: PanelKind,
    table: &BenchmarkTable,
    derived: &[DerivedSeries],
    style: &StyleConfig,
) -> Result<PanelSpec> {
    let panel = match kind {
        PanelKind::Trend => trend_panel(table, style),
        PanelKind::Comparison => comparison_panel(table, derived, style),
        PanelKind::Variance => variance_panel(table, style),
    }?;
    debug!(
        "Composed {} panel: {} series, {} annotations",
        kind,
        panel.series.len(),
        panel.annotations.len()
    );
    Ok(panel)
}

/// One line per mode of average frame time against light count, with the
/// style's reference lines labelled at the right edge.
///
/// # Errors
///
/// [`ChartError::EmptySeries`] if the table has no modes or a mode has no
/// samples.
pub fn trend_panel(table: &BenchmarkTable, style: &StyleConfig) -> Result<PanelSpec> {
    if table.modes().is_empty() {
        return Err(empty(PanelKind::Trend, NO_SERIES));
    }

    let mut series = Vec::with_capacity(table.modes().len());
    for (index, mode) in table.modes().iter().enumerate() {
        let points: Vec<(f64, f64)> = table
            .samples_for(mode.as_str())
            .map(|s| (f64::from(s.light_count), s.avg_frame_time_ms))
            .collect();
        if points.is_empty() {
            return Err(empty(PanelKind::Trend, mode.as_str()));
        }
        series.push(SeriesSpec {
            label: Some(mode.title()),
            color: style.color_for(mode.as_str(), index),
            opacity: 1.0,
            geometry: SeriesGeometry::Line {
                points,
                markers: true,
            },
        });
    }

    let x_range = style
        .axis_ranges
        .trend_x
        .unwrap_or_else(|| default_range(max_light_count(table), style.headroom));
    let y_range = style
        .axis_ranges
        .trend_y
        .unwrap_or_else(|| default_range(table.max_avg_frame_time_ms(), style.headroom));

    let mut reference_lines = Vec::with_capacity(style.reference_lines.len());
    let mut annotations = Vec::with_capacity(style.reference_lines.len());
    for line in &style.reference_lines {
        reference_lines.push(ReferenceLineSpec {
            value: line.value,
            color: line.color,
            opacity: REFERENCE_OPACITY,
            width: 1,
            dashed: true,
        });
        annotations.push(Annotation {
            text: line.label.clone(),
            x: x_range.max,
            y: line.value,
            color: line.color,
            anchor: Anchor::RightBottom,
        });
    }

    Ok(PanelSpec {
        kind: PanelKind::Trend,
        title: "Average Frame Time vs Number of Lights".to_string(),
        x_axis: AxisSpec::numeric(LIGHT_COUNT_LABEL, x_range),
        y_axis: AxisSpec::numeric("Average Frame Time (ms)", y_range),
        series,
        reference_lines,
        annotations,
        legend: LegendPosition::UpperLeft,
    })
}

/// Grouped speedup bars, one group per light count and one bar per derived
/// series, each labelled with its factor.
///
/// Groups sit at integer x positions. A point that is undefined or absent
/// leaves its slot in the group empty.
///
/// # Errors
///
/// [`ChartError::EmptySeries`] if `derived` is empty or any series has no
/// points.
pub fn comparison_panel(
    table: &BenchmarkTable,
    derived: &[DerivedSeries],
    style: &StyleConfig,
) -> Result<PanelSpec> {
    let first = derived
        .first()
        .ok_or_else(|| empty(PanelKind::Comparison, NO_SERIES))?;
    if let Some(hollow) = derived.iter().find(|s| s.points.is_empty()) {
        return Err(empty(PanelKind::Comparison, &hollow.label()));
    }

    let mut light_counts: Vec<u32> = derived
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.light_count))
        .collect();
    light_counts.sort_unstable();
    light_counts.dedup();

    let max_factor = derived
        .iter()
        .filter_map(DerivedSeries::max_factor)
        .fold(1.0, f64::max);
    let y_range = style
        .axis_ranges
        .comparison_y
        .unwrap_or_else(|| default_range(max_factor, style.headroom));
    let lift = y_range.span() * style.bar_label_lift;

    let bar_width = style.bar_group_width / derived.len() as f64;
    let group_start = -style.bar_group_width / 2.0;

    let mut series = Vec::with_capacity(derived.len());
    let mut annotations = Vec::new();
    for (slot, derived_series) in derived.iter().enumerate() {
        let color = style.color_for(
            derived_series.comparison.as_str(),
            mode_index(table, &derived_series.comparison),
        );
        let offset = group_start + bar_width * (slot as f64 + 0.5);

        let mut bars = Vec::with_capacity(derived_series.points.len());
        for (light_count, factor) in derived_series.defined() {
            let Some(group) = light_counts.iter().position(|&lc| lc == light_count) else {
                continue;
            };
            let x = group as f64 + offset;
            bars.push(Bar {
                x,
                width: bar_width,
                height: factor,
            });
            annotations.push(Annotation {
                text: format!("{:.*}x", style.annotation_precision, factor),
                x,
                y: factor + lift,
                color,
                anchor: Anchor::CenterBottom,
            });
        }

        series.push(SeriesSpec {
            label: Some(derived_series.label()),
            color,
            opacity: 1.0,
            geometry: SeriesGeometry::Bars { bars },
        });
    }

    let ticks = light_counts
        .iter()
        .enumerate()
        .map(|(i, lc)| Tick {
            value: i as f64,
            label: lc.to_string(),
        })
        .collect();
    let x_range = AxisRange::new(-0.5, light_counts.len() as f64 - 0.5);

    Ok(PanelSpec {
        kind: PanelKind::Comparison,
        title: format!(
            "Performance Speedup Relative to {} Renderer",
            first.baseline.title()
        ),
        x_axis: AxisSpec::categorical(LIGHT_COUNT_LABEL, x_range, ticks),
        y_axis: AxisSpec::numeric("Speedup Factor (x)", y_range),
        series,
        reference_lines: vec![ReferenceLineSpec {
            value: 1.0,
            color: Color::RED,
            opacity: PARITY_OPACITY,
            width: 2,
            dashed: false,
        }],
        annotations,
        legend: LegendPosition::UpperLeft,
    })
}

/// Per mode, a shaded min/max band, the average line and asymmetric error
/// bars, all shifted horizontally by the mode's style offset.
///
/// # Errors
///
/// [`ChartError::EmptySeries`] if the table has no modes or a mode has no
/// samples.
pub fn variance_panel(table: &BenchmarkTable, style: &StyleConfig) -> Result<PanelSpec> {
    if table.modes().is_empty() {
        return Err(empty(PanelKind::Variance, NO_SERIES));
    }

    let mut series = Vec::with_capacity(table.modes().len() * 3);
    let mut x_min = 0.0_f64;
    let mut x_max = 0.0_f64;
    let mut y_max = 0.0_f64;

    for (index, mode) in table.modes().iter().enumerate() {
        let color = style.color_for(mode.as_str(), index);
        let offset = style.x_offset_for(mode.as_str());

        let mut line = Vec::new();
        let mut spans = Vec::new();
        let mut whiskers = Vec::new();
        for sample in table.samples_for(mode.as_str()) {
            let x = f64::from(sample.light_count) + offset;
            line.push((x, sample.avg_frame_time_ms));
            spans.push(BandSpan {
                x,
                low: sample.min_frame_time_ms,
                high: sample.max_frame_time_ms,
            });
            whiskers.push(ErrorBarSpec {
                x,
                low: sample.min_frame_time_ms,
                mid: sample.avg_frame_time_ms,
                high: sample.max_frame_time_ms,
            });
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_max = y_max.max(sample.max_frame_time_ms);
        }
        if line.is_empty() {
            return Err(empty(PanelKind::Variance, mode.as_str()));
        }

        series.push(SeriesSpec {
            label: None,
            color,
            opacity: BAND_OPACITY,
            geometry: SeriesGeometry::Band { spans },
        });
        series.push(SeriesSpec {
            label: Some(mode.title()),
            color,
            opacity: 1.0,
            geometry: SeriesGeometry::Line {
                points: line,
                markers: true,
            },
        });
        series.push(SeriesSpec {
            label: None,
            color,
            opacity: ERROR_BAR_OPACITY,
            geometry: SeriesGeometry::ErrorBars { bars: whiskers },
        });
    }

    let x_range = style.axis_ranges.variance_x.unwrap_or_else(|| {
        let top = default_range(x_max, style.headroom).max;
        AxisRange::new(x_min.min(0.0) * style.headroom, top)
    });
    let y_range = style
        .axis_ranges
        .variance_y
        .unwrap_or_else(|| default_range(y_max, style.headroom));

    Ok(PanelSpec {
        kind: PanelKind::Variance,
        title: "Frame Time with Min/Max Variance (Shaded Regions Show Range)".to_string(),
        x_axis: AxisSpec::numeric(LIGHT_COUNT_LABEL, x_range),
        y_axis: AxisSpec::numeric("Frame Time (ms)", y_range),
        series,
        reference_lines: Vec::new(),
        annotations: Vec::new(),
        legend: LegendPosition::UpperLeft,
    })
}

/// `[0, max × headroom]`, or `[0, 1]` when the data gives no positive bound.
fn default_range(max: f64, headroom: f64) -> AxisRange {
    let top = max * headroom;
    if top.is_finite() && top > 0.0 {
        AxisRange::new(0.0, top)
    } else {
        AxisRange::new(0.0, 1.0)
    }
}

fn max_light_count(table: &BenchmarkTable) -> f64 {
    table
        .light_counts()
        .last()
        .map(|&lc| f64::from(lc))
        .unwrap_or(0.0)
}

fn mode_index(table: &BenchmarkTable, mode: &RenderMode) -> usize {
    table
        .modes()
        .iter()
        .position(|m| m == mode)
        .unwrap_or(0)
}

fn empty(panel: PanelKind, series: &str) -> ChartError {
    ChartError::EmptySeries {
        panel,
        series: series.to_string(),
    }
}
