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

//! Report configuration files.
//!
//! A YAML (`.yaml`, `.yml`) or JSON (`.json`) document supplying style,
//! render settings, figure names and pipeline defaults. Every field is
//! optional; command-line flags override file values.

use crate::error::CliError;
use lightbench_chart::StyleConfig;
use lightbench_report::RenderSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One output figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Base file name.
    pub name: String,
    /// Title drawn above the panels.
    pub title: String,
    /// Width in inches.
    #[serde(default = "default_width")]
    pub width_in: f64,
    /// Height in inches.
    #[serde(default = "default_height")]
    pub height_in: f64,
}

fn default_width() -> f64 {
    12.0
}

fn default_height() -> f64 {
    6.0
}

/// Names and sizes of the two report figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiguresConfig {
    /// Trend and comparison panels.
    pub comparison: FigureConfig,
    /// Variance panel.
    pub variance: FigureConfig,
}

impl Default for FiguresConfig {
    fn default() -> Self {
        Self {
            comparison: FigureConfig {
                name: "performance_comparison".to_string(),
                title: "WebGPU Rendering Performance Comparison".to_string(),
                width_in: 12.0,
                height_in: 10.0,
            },
            variance: FigureConfig {
                name: "performance_variance".to_string(),
                title: "Frame Time Variance Analysis".to_string(),
                width_in: 12.0,
                height_in: 6.0,
            },
        }
    }
}

/// Everything a configuration file can set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Baseline mode for speedups.
    pub baseline: Option<String>,
    /// Light count the summary reports on.
    pub highlight: Option<u32>,
    /// Frame-rate targets; replaces `style.reference_lines` when set.
    pub fps: Option<Vec<f64>>,
    /// Chart styling.
    pub style: StyleConfig,
    /// Resolution and encoding.
    pub render: RenderSettings,
    /// Figure names and sizes.
    pub figures: FiguresConfig,
}

impl ReportConfig {
    /// Reads a configuration file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// - [`CliError::Io`] if the file cannot be read
    /// - [`CliError::Config`] if the extension is unknown or parsing fails
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&text).map_err(|e| CliError::config(path, e))
            }
            Some("json") => serde_json::from_str(&text).map_err(|e| CliError::config(path, e)),
            _ => Err(CliError::config(
                path,
                "unsupported extension, expected .yaml, .yml or .json",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightbench_report::ImageFormat;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_yaml_config() {
        let file = write_temp(
            ".yaml",
            r#"
baseline: forward+
fps: [144, 60]
render:
  dpi: 150
  format: png
figures:
  variance:
    name: spread
    title: Spread
style:
  annotation_precision: 2
"#,
        );

        let config = ReportConfig::load(file.path()).unwrap();
        assert_eq!(config.baseline.as_deref(), Some("forward+"));
        assert_eq!(config.fps, Some(vec![144.0, 60.0]));
        assert_eq!(config.render.dpi, 150);
        assert_eq!(config.render.format, ImageFormat::Png);
        assert_eq!(config.figures.variance.name, "spread");
        assert_eq!(config.figures.variance.width_in, 12.0);
        assert_eq!(config.figures.comparison.name, "performance_comparison");
        assert_eq!(config.style.annotation_precision, 2);
    }

    #[test]
    fn test_json_config() {
        let file = write_temp(".json", r#"{"highlight": 2500, "render": {"dpi": 72}}"#);
        let config = ReportConfig::load(file.path()).unwrap();
        assert_eq!(config.highlight, Some(2500));
        assert_eq!(config.render.dpi, 72);
        assert_eq!(config.render.format, ImageFormat::Png);
    }

    #[test]
    fn test_unknown_extension() {
        let file = write_temp(".toml", "baseline = 'naive'");
        let err = ReportConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let file = write_temp(".yml", "render: [unclosed");
        assert!(matches!(
            ReportConfig::load(file.path()),
            Err(CliError::Config { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ReportConfig::load(Path::new("/nonexistent/lightbench.yaml")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
