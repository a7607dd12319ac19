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

//! Figures: panels that share one output artifact.

use crate::error::{RenderError, Result};
use lightbench_chart::PanelSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default output resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Largest accepted resolution.
pub const MAX_DPI: u32 = 1200;

/// Largest accepted figure edge, in inches.
pub const MAX_FIGURE_INCHES: f64 = 100.0;

/// Image encoding of rendered figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Raster PNG.
    #[default]
    Png,
    /// Vector SVG.
    Svg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(RenderError::InvalidSettings {
                parameter: "format".to_string(),
                reason: format!("unknown image format '{}', expected png or svg", other),
            }),
        }
    }
}

/// Resolution and encoding shared by every figure of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Dots per inch.
    pub dpi: u32,
    /// Image encoding.
    pub format: ImageFormat,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            format: ImageFormat::Png,
        }
    }
}

impl RenderSettings {
    /// Sets the resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Sets the encoding.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Checks the resolution is in `1..=MAX_DPI`.
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(RenderError::InvalidSettings {
                parameter: "dpi".to_string(),
                reason: format!("must be between 1 and {}, got {}", MAX_DPI, self.dpi),
            });
        }
        Ok(())
    }

    /// Converts a size in typographic points to pixels at this resolution,
    /// never less than one pixel.
    pub fn points_to_pixels(&self, points: f64) -> u32 {
        ((points * f64::from(self.dpi) / 72.0).round() as u32).max(1)
    }
}

/// One or more panels stacked vertically in one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Base file name, without extension.
    pub name: String,
    /// Title drawn above all panels.
    pub title: String,
    /// Panels, top to bottom.
    pub panels: Vec<PanelSpec>,
    /// Width in inches.
    pub width_in: f64,
    /// Height in inches.
    pub height_in: f64,
}

impl Figure {
    /// Creates a 12 × 6 inch figure.
    pub fn new(name: impl Into<String>, title: impl Into<String>, panels: Vec<PanelSpec>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            panels,
            width_in: 12.0,
            height_in: 6.0,
        }
    }

    /// Sets the physical size.
    pub fn with_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.width_in = width_in;
        self.height_in = height_in;
        self
    }

    /// File name for the given encoding, e.g. `performance_variance.png`.
    pub fn file_name(&self, format: ImageFormat) -> String {
        format!("{}.{}", self.name, format.extension())
    }

    /// Pixel dimensions at the given resolution.
    ///
    /// ```
    /// use lightbench_report::{Figure, RenderSettings};
    ///
    /// let figure = Figure::new("variance", "Variance", Vec::new());
    /// assert_eq!(figure.pixel_size(&RenderSettings::default()), (3600, 1800));
    /// ```
    pub fn pixel_size(&self, settings: &RenderSettings) -> (u32, u32) {
        let dpi = f64::from(settings.dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Checks the figure can be drawn.
    ///
    /// # Errors
    ///
    /// - [`RenderError::EmptyFigure`] if there are no panels
    /// - [`RenderError::InvalidSettings`] if a dimension is not in
    ///   `(0, MAX_FIGURE_INCHES]`
    pub fn validate(&self) -> Result<()> {
        if self.panels.is_empty() {
            return Err(RenderError::EmptyFigure {
                figure: self.name.clone(),
            });
        }
        for (parameter, value) in [("width_in", self.width_in), ("height_in", self.height_in)] {
            if !(value > 0.0 && value <= MAX_FIGURE_INCHES) {
                return Err(RenderError::InvalidSettings {
                    parameter: parameter.to_string(),
                    reason: format!(
                        "figure '{}' must be in (0, {}] inches, got {}",
                        self.name, MAX_FIGURE_INCHES, value
                    ),
                });
            }
        }
        Ok(())
    }
}
