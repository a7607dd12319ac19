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

//! Rendering surfaces: where figures turn into image files.
//!
//! [`RenderSurface`] is the seam between the deterministic report pipeline
//! and the drawing library. [`PlottersSurface`] draws with `plotters` onto a
//! bitmap (PNG) or SVG backend; tests substitute their own surface.

use crate::error::{RenderError, Result};
use crate::figure::{Figure, ImageFormat, RenderSettings};
use lightbench_chart::{Anchor, LegendPosition, PanelSpec, SeriesGeometry};
use plotters::coord::Shift;
use plotters::element::{ErrorBar, Polygon};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Family every text style draws with.
pub const FONT_FAMILY: &str = "sans-serif";

/// DejaVu Sans, registered under [`FONT_FAMILY`] for glyph layout and
/// rasterisation.
static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

static FONT_REGISTRATION: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Registers the embedded font with plotters. Runs once per process; later
/// calls return the first outcome.
pub fn register_embedded_font() -> Result<()> {
    FONT_REGISTRATION
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, EMBEDDED_FONT)
                .map_err(|_| "embedded font data is not a valid TrueType font".to_string())
        })
        .clone()
        .map_err(|message| RenderError::Font {
            family: FONT_FAMILY.to_string(),
            message,
        })
}

/// Something that can draw a [`Figure`] to a destination path.
pub trait RenderSurface {
    /// Draws `figure` to `target` using `settings`.
    ///
    /// # Errors
    ///
    /// [`RenderError`] if the figure cannot be drawn or written.
    fn render(&mut self, figure: &Figure, settings: &RenderSettings, target: &Path) -> Result<()>;

    /// Releases anything held across figures. Called exactly once after the
    /// last figure, whether or not earlier figures failed.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Draws figures with `plotters`.
///
/// Text is laid out and, for PNG, rasterised with the embedded DejaVu Sans,
/// so output does not depend on fonts installed on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlottersSurface;

impl PlottersSurface {
    /// Creates the surface.
    pub fn new() -> Self {
        Self
    }
}

impl RenderSurface for PlottersSurface {
    fn render(&mut self, figure: &Figure, settings: &RenderSettings, target: &Path) -> Result<()> {
        figure.validate()?;
        settings.validate()?;
        register_embedded_font()?;

        let size = figure.pixel_size(settings);
        let metrics = Metrics::new(settings);
        debug!(
            "Drawing figure '{}' ({}x{} px, {}) to {}",
            figure.name,
            size.0,
            size.1,
            settings.format,
            target.display()
        );

        match settings.format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(target, size).into_drawing_area();
                draw_figure(&root, figure, &metrics)
                    .map_err(|e| RenderError::backend(&figure.name, e))
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(target, size).into_drawing_area();
                draw_figure(&root, figure, &metrics)
                    .map_err(|e| RenderError::backend(&figure.name, e))
            }
        }
    }
}

type DrawResult<T, DB> =
    std::result::Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Pixel sizes derived from typographic sizes at the target resolution.
struct Metrics {
    settings: RenderSettings,
    title: u32,
    caption: u32,
    axis: u32,
    tick: u32,
    legend: u32,
    annotation: u32,
    margin: u32,
    x_label_area: u32,
    y_label_area: u32,
    line: u32,
    thin: u32,
    marker: u32,
    whisker: u32,
    legend_len: i32,
}

impl Metrics {
    fn new(settings: &RenderSettings) -> Self {
        let px = |points: f64| settings.points_to_pixels(points);
        Self {
            settings: *settings,
            title: px(16.0),
            caption: px(12.0),
            axis: px(11.0),
            tick: px(9.0),
            legend: px(9.0),
            annotation: px(9.0),
            margin: px(8.0),
            x_label_area: px(36.0),
            y_label_area: px(48.0),
            line: px(2.0),
            thin: px(1.0),
            marker: px(3.0),
            whisker: px(4.0),
            legend_len: px(18.0) as i32,
        }
    }

    fn stroke(&self, points: u32) -> u32 {
        self.settings.points_to_pixels(f64::from(points))
    }

    fn font(&self, size: u32) -> TextStyle<'static> {
        (FONT_FAMILY, size).into_font().color(&BLACK)
    }
}

fn rgb(color: lightbench_chart::Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    metrics: &Metrics,
) -> DrawResult<(), DB> {
    root.fill(&WHITE)?;
    let body = root.titled(&figure.title, metrics.font(metrics.title))?;

    let areas = body.split_evenly((figure.panels.len(), 1));
    for (area, panel) in areas.iter().zip(&figure.panels) {
        draw_panel(area, panel, metrics)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &PanelSpec,
    metrics: &Metrics,
) -> DrawResult<(), DB> {
    let x = panel.x_axis.range;
    let y = panel.y_axis.range;

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, metrics.font(metrics.caption))
        .margin(metrics.margin)
        .x_label_area_size(metrics.x_label_area)
        .y_label_area_size(metrics.y_label_area)
        .build_cartesian_2d(x.min..x.max, y.min..y.max)?;

    let ticks = panel.x_axis.ticks.as_deref();
    let x_formatter = |value: &f64| match ticks {
        Some(ticks) => ticks
            .iter()
            .find(|tick| (tick.value - value).abs() < 1e-6)
            .map(|tick| tick.label.clone())
            .unwrap_or_default(),
        None => format!("{:.0}", value),
    };
    let y_formatter = |value: &f64| format!("{:.1}", value);

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(panel.x_axis.label.as_str())
        .y_desc(panel.y_axis.label.as_str())
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .label_style(metrics.font(metrics.tick))
        .axis_desc_style(metrics.font(metrics.axis));
    if let Some(ticks) = ticks {
        mesh.x_labels(ticks.len()).disable_x_mesh();
    }
    mesh.draw()?;

    for line in &panel.reference_lines {
        // Lines outside the visible range are not drawn.
        if !y.contains(line.value) {
            continue;
        }
        let style = rgb(line.color)
            .mix(line.opacity)
            .stroke_width(metrics.stroke(line.width));
        let segments = if line.dashed {
            dash_segments(x.min, x.max, x.span() / 80.0)
        } else {
            vec![(x.min, x.max)]
        };
        chart.draw_series(
            segments.into_iter().map(|(from, to)| {
                PathElement::new(vec![(from, line.value), (to, line.value)], style)
            }),
        )?;
    }

    let legend_len = metrics.legend_len;
    for series in &panel.series {
        let color = rgb(series.color).mix(series.opacity);
        match &series.geometry {
            SeriesGeometry::Line { points, markers } => {
                let stroke = color.stroke_width(metrics.line);
                let anno = chart.draw_series(LineSeries::new(points.iter().copied(), stroke))?;
                if let Some(label) = &series.label {
                    anno.label(label.as_str()).legend(move |(lx, ly)| {
                        PathElement::new(vec![(lx, ly), (lx + legend_len, ly)], stroke)
                    });
                }
                if *markers {
                    chart.draw_series(
                        points
                            .iter()
                            .map(|&point| Circle::new(point, metrics.marker, color.filled())),
                    )?;
                }
            }
            SeriesGeometry::Bars { bars } => {
                let fill = color.filled();
                let anno = chart.draw_series(bars.iter().map(|bar| {
                    Rectangle::new([(bar.left(), 0.0), (bar.right(), bar.height)], fill)
                }))?;
                if let Some(label) = &series.label {
                    anno.label(label.as_str())
                        .legend(move |(lx, ly)| legend_swatch(lx, ly, legend_len, fill));
                }
            }
            SeriesGeometry::Band { spans } => {
                if spans.is_empty() {
                    continue;
                }
                let mut outline: Vec<(f64, f64)> = spans.iter().map(|s| (s.x, s.high)).collect();
                outline.extend(spans.iter().rev().map(|s| (s.x, s.low)));
                let fill = color.filled();
                let anno = chart.draw_series(std::iter::once(Polygon::new(outline, fill)))?;
                if let Some(label) = &series.label {
                    anno.label(label.as_str())
                        .legend(move |(lx, ly)| legend_swatch(lx, ly, legend_len, fill));
                }
            }
            SeriesGeometry::ErrorBars { bars } => {
                let stroke = color.stroke_width(metrics.thin);
                let whisker = metrics.whisker;
                chart.draw_series(bars.iter().map(|bar| {
                    ErrorBar::new_vertical(bar.x, bar.low, bar.mid, bar.high, stroke, whisker)
                }))?;
            }
        }
    }

    for note in &panel.annotations {
        if !(x.contains(note.x) && y.contains(note.y)) {
            continue;
        }
        let pos = match note.anchor {
            Anchor::RightBottom => Pos::new(HPos::Right, VPos::Bottom),
            Anchor::CenterBottom => Pos::new(HPos::Center, VPos::Bottom),
        };
        let style = (FONT_FAMILY, metrics.annotation)
            .into_font()
            .color(&rgb(note.color))
            .pos(pos);
        chart.draw_series(std::iter::once(Text::new(
            note.text.clone(),
            (note.x, note.y),
            style,
        )))?;
    }

    if panel.legend != LegendPosition::Hidden && panel.legend_entries().next().is_some() {
        let position = match panel.legend {
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            _ => SeriesLabelPosition::UpperLeft,
        };
        chart
            .configure_series_labels()
            .position(position)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(metrics.font(metrics.legend))
            .draw()?;
    }

    Ok(())
}

fn legend_swatch(x: i32, y: i32, len: i32, fill: ShapeStyle) -> Rectangle<(i32, i32)> {
    Rectangle::new([(x, y - len / 4), (x + len, y + len / 4)], fill)
}

/// Splits `[start, end]` into dashes of length `dash` separated by equal gaps.
fn dash_segments(start: f64, end: f64, dash: f64) -> Vec<(f64, f64)> {
    if !(dash > 0.0) || !(end > start) {
        return vec![(start, end)];
    }
    let mut segments = Vec::new();
    let mut from = start;
    while from < end {
        segments.push((from, (from + dash).min(end)));
        from += dash * 2.0;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_segments_cover_range() {
        let segments = dash_segments(0.0, 10.0, 1.0);
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], (0.0, 1.0));
        assert_eq!(segments[4], (8.0, 9.0));
    }

    #[test]
    fn test_dash_segments_degenerate() {
        assert_eq!(dash_segments(0.0, 10.0, 0.0), vec![(0.0, 10.0)]);
        assert_eq!(dash_segments(5.0, 5.0, 1.0), vec![(5.0, 5.0)]);
    }

    #[test]
    fn test_metrics_scale_with_dpi() {
        let low = Metrics::new(&RenderSettings::default().with_dpi(72));
        let high = Metrics::new(&RenderSettings::default().with_dpi(300));
        assert_eq!(low.title, 16);
        assert!(high.title > low.title);
        assert_eq!(low.stroke(2), 2);
    }

    #[test]
    fn test_embedded_font_registers() {
        assert!(register_embedded_font().is_ok());
        assert!(register_embedded_font().is_ok());
    }
}
