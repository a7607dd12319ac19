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

//! Style configuration read from YAML and JSON documents.

use lightbench_chart::{AxisRange, Color, StyleConfig};

#[test]
fn test_yaml_partial_config_keeps_defaults() {
    let yaml = r##"
annotation_precision: 2
mode_styles:
  tiled:
    color: "#9b59b6"
    x_offset: 400
  naive:
    color: red
reference_lines:
  - value: 8.333
    label: 120 FPS
    color: green
axis_ranges:
  comparison_y:
    min: 0
    max: 12
"##;

    let style: StyleConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(style.validate().is_ok());

    assert_eq!(style.annotation_precision, 2);
    assert_eq!(style.headroom, 1.1);
    assert_eq!(style.bar_group_width, 0.7);

    assert_eq!(style.color_for("tiled", 0), Color::rgb(0x9b, 0x59, 0xb6));
    assert_eq!(style.x_offset_for("tiled"), 400.0);
    assert_eq!(style.color_for("naive", 0), Color::RED);
    assert_eq!(style.x_offset_for("naive"), 0.0);
    // A supplied map replaces the default one.
    assert_eq!(style.color_for("forward+", 0), style.fallback_palette[0]);

    assert_eq!(style.reference_lines.len(), 1);
    assert_eq!(style.reference_lines[0].label, "120 FPS");
    assert_eq!(
        style.axis_ranges.comparison_y,
        Some(AxisRange::new(0.0, 12.0))
    );
    assert_eq!(style.axis_ranges.trend_y, None);
}

#[test]
fn test_json_round_trip() {
    let style = StyleConfig::default().with_annotation_precision(3);
    let json = serde_json::to_string(&style).unwrap();
    assert!(json.contains("\"#e74c3c\""));

    let parsed: StyleConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.mode_styles, style.mode_styles);
    assert_eq!(parsed.annotation_precision, 3);
    assert_eq!(parsed.reference_lines.len(), 3);
    for (a, b) in parsed.reference_lines.iter().zip(&style.reference_lines) {
        assert_eq!(a.label, b.label);
        assert!((a.value - b.value).abs() < 1e-9);
    }
}

#[test]
fn test_bad_colour_is_rejected() {
    let json = r##"{"mode_styles": {"naive": {"color": "#zzzzzz"}}}"##;
    let err = serde_json::from_str::<StyleConfig>(json).unwrap_err();
    assert!(err.to_string().contains("color"));
}

#[test]
fn test_reference_line_colour_defaults_to_gray() {
    let yaml = "reference_lines:\n  - value: 10\n    label: budget\n";
    let style: StyleConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(style.reference_lines[0].color, Color::GRAY);
}
