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

//! Figure rendering and text summaries for lightbench reports.
//!
//! - [`Figure`] groups composed panels into one image artifact
//! - [`RenderSurface`] draws a figure; [`PlottersSurface`] does so with
//!   `plotters` as PNG or SVG
//! - [`Summary`] formats per-mode frame times and pairwise speedups at a
//!   highlight light count, plus everything the pipeline set aside
//! - [`ReportEmitter`] renders every figure and writes the summary, carrying
//!   on past per-artifact failures

pub mod emitter;
pub mod error;
pub mod figure;
pub mod summary;
pub mod surface;

pub use emitter::{ArtifactFailure, EmitOutcome, ReportArtifact, ReportEmitter, SUMMARY_ARTIFACT};
pub use error::{RenderError, Result};
pub use figure::{Figure, ImageFormat, RenderSettings, DEFAULT_DPI, MAX_DPI, MAX_FIGURE_INCHES};
pub use summary::{export_json, ModeStats, PairSpeedup, Summary, DEFAULT_SUMMARY_PRECISION};
pub use surface::{register_embedded_font, PlottersSurface, RenderSurface, FONT_FAMILY};
