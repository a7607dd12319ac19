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

//! Declarative panel model produced by the composer.
//!
//! A [`PanelSpec`] is plain data in data coordinates. Nothing here knows
//! about pixels, fonts or image formats; the rendering surface maps it onto
//! a drawing backend.

use crate::style::{AxisRange, Color};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of panel the composer can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    /// Average frame time per mode against light count.
    Trend,
    /// Grouped speedup bars against the baseline mode.
    Comparison,
    /// Average frame time with min/max bands.
    Variance,
}

impl PanelKind {
    /// Every panel kind, in default report order.
    pub const ALL: [PanelKind; 3] = [PanelKind::Trend, PanelKind::Comparison, PanelKind::Variance];
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PanelKind::Trend => "trend",
            PanelKind::Comparison => "comparison",
            PanelKind::Variance => "variance",
        };
        f.write_str(name)
    }
}

/// A labelled position on a categorical axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// Position in data coordinates.
    pub value: f64,
    /// Text shown at the position.
    pub label: String,
}

/// One axis of a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    /// Axis description.
    pub label: String,
    /// Visible range.
    pub range: AxisRange,
    /// Explicit ticks; `None` lets the surface pick numeric ticks.
    pub ticks: Option<Vec<Tick>>,
}

impl AxisSpec {
    /// A numeric axis with automatic ticks.
    pub fn numeric(label: impl Into<String>, range: AxisRange) -> Self {
        Self {
            label: label.into(),
            range,
            ticks: None,
        }
    }

    /// A categorical axis with one tick per entry.
    pub fn categorical(label: impl Into<String>, range: AxisRange, ticks: Vec<Tick>) -> Self {
        Self {
            label: label.into(),
            range,
            ticks: Some(ticks),
        }
    }
}

/// One bar of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    /// Centre of the bar on the x axis.
    pub x: f64,
    /// Width in x units.
    pub width: f64,
    /// Top of the bar; bars rise from zero.
    pub height: f64,
}

impl Bar {
    /// Left edge.
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Vertical extent of a shaded band at one x position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandSpan {
    /// X position.
    pub x: f64,
    /// Lower edge.
    pub low: f64,
    /// Upper edge.
    pub high: f64,
}

/// An asymmetric error bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorBarSpec {
    /// X position.
    pub x: f64,
    /// Bottom whisker.
    pub low: f64,
    /// Centre value.
    pub mid: f64,
    /// Top whisker.
    pub high: f64,
}

/// What a series draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeriesGeometry {
    /// Connected points, optionally with a marker at each point.
    Line {
        /// `(x, y)` points in drawing order.
        points: Vec<(f64, f64)>,
        /// Draw a marker at each point.
        markers: bool,
    },
    /// Filled bars rising from zero.
    Bars {
        /// Bars in drawing order.
        bars: Vec<Bar>,
    },
    /// A filled region between `low` and `high`, ascending in x.
    Band {
        /// Spans ascending in x.
        spans: Vec<BandSpan>,
    },
    /// Vertical error bars.
    ErrorBars {
        /// Bars in drawing order.
        bars: Vec<ErrorBarSpec>,
    },
}

impl SeriesGeometry {
    /// Number of drawable elements.
    pub fn len(&self) -> usize {
        match self {
            SeriesGeometry::Line { points, .. } => points.len(),
            SeriesGeometry::Bars { bars } => bars.len(),
            SeriesGeometry::Band { spans } => spans.len(),
            SeriesGeometry::ErrorBars { bars } => bars.len(),
        }
    }

    /// Returns true if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One drawable series of a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    /// Legend entry; `None` keeps the series out of the legend.
    pub label: Option<String>,
    /// Stroke and fill colour.
    pub color: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Geometry to draw.
    pub geometry: SeriesGeometry,
}

/// A horizontal line across the whole panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLineSpec {
    /// Y value.
    pub value: f64,
    /// Line colour.
    pub color: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stroke width in points.
    pub width: u32,
    /// Dashed rather than solid.
    pub dashed: bool,
}

/// Where an annotation sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Text ends at the point and sits just above it.
    RightBottom,
    /// Text is centred on the point and sits above it.
    CenterBottom,
}

/// Text placed at a data coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// Text to draw.
    pub text: String,
    /// X in data coordinates.
    pub x: f64,
    /// Y in data coordinates.
    pub y: f64,
    /// Text colour.
    pub color: Color,
    /// Placement relative to `(x, y)`.
    pub anchor: Anchor,
}

/// Legend placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    /// Inside the plot, upper-left corner.
    UpperLeft,
    /// Inside the plot, upper-right corner.
    UpperRight,
    /// No legend.
    Hidden,
}

/// Everything needed to draw one panel. Immutable once composed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSpec {
    /// Panel kind.
    pub kind: PanelKind,
    /// Panel title.
    pub title: String,
    /// Horizontal axis.
    pub x_axis: AxisSpec,
    /// Vertical axis.
    pub y_axis: AxisSpec,
    /// Series in drawing order.
    pub series: Vec<SeriesSpec>,
    /// Horizontal reference lines, drawn beneath the series.
    pub reference_lines: Vec<ReferenceLineSpec>,
    /// Text annotations, drawn last.
    pub annotations: Vec<Annotation>,
    /// Legend placement.
    pub legend: LegendPosition,
}

impl PanelSpec {
    /// Series of the panel that appear in the legend.
    pub fn legend_entries(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.series
            .iter()
            .filter_map(|s| s.label.as_deref().map(|label| (label, s.color)))
    }

    /// Finds a labelled series.
    pub fn series_labelled(&self, label: &str) -> Option<&SeriesSpec> {
        self.series
            .iter()
            .find(|s| s.label.as_deref() == Some(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_kind_display() {
        assert_eq!(PanelKind::Trend.to_string(), "trend");
        assert_eq!(PanelKind::Variance.to_string(), "variance");
    }

    #[test]
    fn test_bar_edges() {
        let bar = Bar {
            x: 1.0,
            width: 0.5,
            height: 2.0,
        };
        assert_eq!(bar.left(), 0.75);
        assert_eq!(bar.right(), 1.25);
    }

    #[test]
    fn test_geometry_len() {
        let line = SeriesGeometry::Line {
            points: vec![(0.0, 1.0), (1.0, 2.0)],
            markers: true,
        };
        assert_eq!(line.len(), 2);
        assert!(SeriesGeometry::Bars { bars: vec![] }.is_empty());
    }
}
