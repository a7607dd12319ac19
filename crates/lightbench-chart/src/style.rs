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

//! Style configuration passed explicitly into the composer.
//!
//! Per-mode styling (colour, horizontal offset in the variance panel) is a
//! lookup table keyed by mode label. Modes without an entry take colours
//! from `fallback_palette` by their position in the table, so a new render
//! technique shows up without any configuration.

use crate::error::{ChartError, Result};
use lightbench_core::RenderMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Largest accepted `annotation_precision`.
pub const MAX_ANNOTATION_PRECISION: usize = 6;

/// Default frame-rate targets for trend reference lines.
pub const DEFAULT_FPS_TARGETS: [f64; 3] = [60.0, 30.0, 15.0];

/// An sRGB colour, written as `#rrggbb` or a basic colour name in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Mid grey.
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    /// Basic green.
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    /// Basic orange.
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    /// Basic red.
    pub const RED: Color = Color::rgb(255, 0, 0);

    /// Creates a colour from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`, `rrggbb` or one of `black`, `gray`/`grey`, `green`,
    /// `orange`, `red`, `blue`.
    ///
    /// ```
    /// use lightbench_chart::Color;
    ///
    /// assert_eq!(Color::parse("#3498db").unwrap(), Color::rgb(0x34, 0x98, 0xdb));
    /// assert_eq!(Color::parse("orange").unwrap(), Color::ORANGE);
    /// assert!(Color::parse("#12345").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "gray" | "grey" => return Ok(Self::GRAY),
            "green" => return Ok(Self::GREEN),
            "orange" => return Ok(Self::ORANGE),
            "red" => return Ok(Self::RED),
            "blue" => return Ok(Self::rgb(0, 0, 255)),
            _ => {}
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChartError::invalid_style(
                "color",
                format!("expected #rrggbb or a colour name, got '{}'", text),
            ));
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::rgb(r, g, b)),
            _ => Err(ChartError::invalid_style(
                "color",
                format!("invalid hex colour '{}'", text),
            )),
        }
    }

    /// Formats as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Styling of one render mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeStyle {
    /// Series colour.
    pub color: Color,
    /// Horizontal shift, in light-count units, applied in the variance panel.
    #[serde(default)]
    pub x_offset: f64,
}

impl ModeStyle {
    /// Creates a mode style.
    pub fn new(color: Color, x_offset: f64) -> Self {
        Self { color, x_offset }
    }
}

/// A horizontal constant-value annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    /// Y value of the line.
    pub value: f64,
    /// Text drawn at the right edge of the chart.
    pub label: String,
    /// Line and label colour.
    #[serde(default = "default_reference_color")]
    pub color: Color,
}

fn default_reference_color() -> Color {
    Color::GRAY
}

impl ReferenceLine {
    /// Creates a reference line.
    pub fn new(value: f64, label: impl Into<String>, color: Color) -> Self {
        Self {
            value,
            label: label.into(),
            color,
        }
    }

    /// Frame-time threshold of a target frame rate: `1000 / fps` ms,
    /// labelled `"{fps} FPS"`.
    ///
    /// ```
    /// use lightbench_chart::{Color, ReferenceLine};
    ///
    /// let line = ReferenceLine::frame_rate(60.0, Color::GREEN);
    /// assert!((line.value - 16.6667).abs() < 1e-3);
    /// assert_eq!(line.label, "60 FPS");
    /// ```
    pub fn frame_rate(fps: f64, color: Color) -> Self {
        Self::new(1000.0 / fps, format!("{} FPS", fps), color)
    }
}

/// Explicit `(min, max)` bounds of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl AxisRange {
    /// Creates a range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies within the range, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn validate(&self, parameter: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ChartError::invalid_style(
                parameter,
                format!("expected finite min < max, got ({}, {})", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Optional per-panel axis overrides; `None` means data-driven.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOverrides {
    /// Trend panel x axis (light count).
    pub trend_x: Option<AxisRange>,
    /// Trend panel y axis (frame time).
    pub trend_y: Option<AxisRange>,
    /// Comparison panel y axis (speedup factor).
    pub comparison_y: Option<AxisRange>,
    /// Variance panel x axis (light count).
    pub variance_x: Option<AxisRange>,
    /// Variance panel y axis (frame time).
    pub variance_y: Option<AxisRange>,
}

impl AxisOverrides {
    fn validate(&self) -> Result<()> {
        let named = [
            ("axis_ranges.trend_x", self.trend_x),
            ("axis_ranges.trend_y", self.trend_y),
            ("axis_ranges.comparison_y", self.comparison_y),
            ("axis_ranges.variance_x", self.variance_x),
            ("axis_ranges.variance_y", self.variance_y),
        ];
        for (name, range) in named {
            if let Some(range) = range {
                range.validate(name)?;
            }
        }
        Ok(())
    }
}

/// Style configuration for every panel kind.
///
/// ```
/// use lightbench_chart::{Color, ModeStyle, StyleConfig};
///
/// let style = StyleConfig::default()
///     .with_mode_style("tiled", ModeStyle::new(Color::parse("#9b59b6").unwrap(), 400.0))
///     .with_frame_rate_targets(&[144.0, 60.0])
///     .with_annotation_precision(2);
///
/// assert_eq!(style.reference_lines.len(), 2);
/// assert_eq!(style.x_offset_for("tiled"), 400.0);
/// assert!(style.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Colour and offset per mode label.
    pub mode_styles: BTreeMap<RenderMode, ModeStyle>,
    /// Colours for modes missing from `mode_styles`, by table position.
    pub fallback_palette: Vec<Color>,
    /// Horizontal reference lines in the trend panel, drawn in order.
    pub reference_lines: Vec<ReferenceLine>,
    /// Explicit axis bounds.
    pub axis_ranges: AxisOverrides,
    /// Decimal places of bar value labels.
    pub annotation_precision: usize,
    /// Fraction of a comparison group slot covered by its bars, in (0, 1].
    pub bar_group_width: f64,
    /// Multiplier applied to the largest data value for default axis bounds.
    pub headroom: f64,
    /// Gap between a bar top and its label, as a fraction of the y range.
    pub bar_label_lift: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let mut mode_styles = BTreeMap::new();
        mode_styles.insert(
            RenderMode::new("naive"),
            ModeStyle::new(Color::rgb(0xe7, 0x4c, 0x3c), -200.0),
        );
        mode_styles.insert(
            RenderMode::new("forward+"),
            ModeStyle::new(Color::rgb(0x34, 0x98, 0xdb), 0.0),
        );
        mode_styles.insert(
            RenderMode::new("clustered deferred"),
            ModeStyle::new(Color::rgb(0x2e, 0xcc, 0x71), 200.0),
        );

        Self {
            mode_styles,
            fallback_palette: vec![
                Color::rgb(0x9b, 0x59, 0xb6),
                Color::rgb(0xf3, 0x9c, 0x12),
                Color::rgb(0x1a, 0xbc, 0x9c),
                Color::rgb(0x34, 0x49, 0x5e),
                Color::rgb(0xd3, 0x54, 0x00),
            ],
            reference_lines: frame_rate_lines(&DEFAULT_FPS_TARGETS),
            axis_ranges: AxisOverrides::default(),
            annotation_precision: 1,
            bar_group_width: 0.7,
            headroom: 1.1,
            bar_label_lift: 0.02,
        }
    }
}

/// Reference lines for frame-rate targets, coloured green, orange, red in
/// turn.
pub fn frame_rate_lines(targets: &[f64]) -> Vec<ReferenceLine> {
    const CYCLE: [Color; 3] = [Color::GREEN, Color::ORANGE, Color::RED];
    targets
        .iter()
        .enumerate()
        .map(|(i, &fps)| ReferenceLine::frame_rate(fps, CYCLE[i % CYCLE.len()]))
        .collect()
}

impl StyleConfig {
    /// Sets the style of one mode.
    pub fn with_mode_style(mut self, mode: impl Into<RenderMode>, style: ModeStyle) -> Self {
        self.mode_styles.insert(mode.into(), style);
        self
    }

    /// Appends a reference line.
    pub fn with_reference_line(mut self, line: ReferenceLine) -> Self {
        self.reference_lines.push(line);
        self
    }

    /// Replaces the reference lines with frame-rate targets.
    pub fn with_frame_rate_targets(mut self, targets: &[f64]) -> Self {
        self.reference_lines = frame_rate_lines(targets);
        self
    }

    /// Sets the axis overrides.
    pub fn with_axis_ranges(mut self, ranges: AxisOverrides) -> Self {
        self.axis_ranges = ranges;
        self
    }

    /// Sets the decimal places of bar labels.
    pub fn with_annotation_precision(mut self, precision: usize) -> Self {
        self.annotation_precision = precision;
        self
    }

    /// Sets the default-axis headroom multiplier.
    pub fn with_headroom(mut self, headroom: f64) -> Self {
        self.headroom = headroom;
        self
    }

    /// Colour of a mode at position `index` in the table.
    pub fn color_for(&self, mode: &str, index: usize) -> Color {
        match self.mode_styles.get(mode) {
            Some(style) => style.color,
            None if !self.fallback_palette.is_empty() => {
                self.fallback_palette[index % self.fallback_palette.len()]
            }
            None => Color::GRAY,
        }
    }

    /// Variance-panel offset of a mode; zero when unstyled.
    pub fn x_offset_for(&self, mode: &str) -> f64 {
        self.mode_styles
            .get(mode)
            .map(|style| style.x_offset)
            .unwrap_or(0.0)
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// [`ChartError::InvalidStyle`] naming the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        if self.annotation_precision > MAX_ANNOTATION_PRECISION {
            return Err(ChartError::invalid_style(
                "annotation_precision",
                format!("must be at most {}", MAX_ANNOTATION_PRECISION),
            ));
        }
        if !(self.bar_group_width > 0.0 && self.bar_group_width <= 1.0) {
            return Err(ChartError::invalid_style(
                "bar_group_width",
                "must be in (0, 1]",
            ));
        }
        if !(self.headroom.is_finite() && self.headroom >= 1.0) {
            return Err(ChartError::invalid_style("headroom", "must be at least 1.0"));
        }
        if !(self.bar_label_lift.is_finite() && self.bar_label_lift >= 0.0) {
            return Err(ChartError::invalid_style(
                "bar_label_lift",
                "must be a non-negative number",
            ));
        }
        for line in &self.reference_lines {
            if !line.value.is_finite() {
                return Err(ChartError::invalid_style(
                    "reference_lines",
                    format!("'{}' has a non-finite value", line.label),
                ));
            }
        }
        for (mode, style) in &self.mode_styles {
            if !style.x_offset.is_finite() {
                return Err(ChartError::invalid_style(
                    "mode_styles",
                    format!("'{}' has a non-finite x_offset", mode),
                ));
            }
        }
        self.axis_ranges.validate()
    }
}
