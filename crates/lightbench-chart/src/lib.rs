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

//! Chart panel composition for lightbench reports.
//!
//! Turns a [`BenchmarkTable`](lightbench_core::BenchmarkTable) and its
//! derived speedup series into declarative [`PanelSpec`]s:
//!
//! - **Trend**: average frame time per mode, with frame-rate reference lines
//! - **Comparison**: grouped speedup bars with value labels and a parity line
//! - **Variance**: average lines inside shaded min/max bands
//!
//! Styling is an explicit [`StyleConfig`] value. Modes are looked up by
//! label, so adding a render technique needs no code change here.
//!
//! # Examples
//!
//! ```
//! use lightbench_chart::{compose, PanelKind, StyleConfig};
//! use lightbench_core::{derive_speedups, BenchmarkTable, IntegrityPolicy, Sample};
//!
//! let table = BenchmarkTable::from_samples(
//!     vec![
//!         Sample::new("naive", 1000, 20.0, 18.0, 22.0),
//!         Sample::new("forward+", 1000, 10.0, 9.0, 11.0),
//!     ],
//!     IntegrityPolicy::Lenient,
//! )
//! .unwrap()
//! .table;
//! let derived = derive_speedups(&table, "naive").unwrap();
//!
//! let style = StyleConfig::default();
//! let panels = compose(&table, &derived.series, &style, &PanelKind::ALL).unwrap();
//! assert_eq!(panels.len(), 3);
//! assert_eq!(panels[1].annotations[0].text, "2.0x");
//! ```

pub mod compose;
pub mod error;
pub mod panel;
pub mod style;

pub use compose::{compose, compose_panel, comparison_panel, trend_panel, variance_panel};
pub use error::{ChartError, Result};
pub use panel::{
    Anchor, Annotation, AxisSpec, Bar, BandSpan, ErrorBarSpec, LegendPosition, PanelKind,
    PanelSpec, ReferenceLineSpec, SeriesGeometry, SeriesSpec, Tick,
};
pub use style::{
    frame_rate_lines, AxisOverrides, AxisRange, Color, ModeStyle, ReferenceLine, StyleConfig,
    DEFAULT_FPS_TARGETS, MAX_ANNOTATION_PRECISION,
};
