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

//! Benchmark data model, CSV loading and derived metrics for lightbench.
//!
//! # Features
//!
//! - **Loader**: validates the fixed five-column benchmark schema and builds
//!   an indexed [`BenchmarkTable`]
//! - **Integrity policy**: rows breaking `min <= avg <= max` are excluded
//!   with a warning (lenient, default) or abort the load (strict)
//! - **Metric deriver**: per-mode speedup factors against a baseline and
//!   min/max variance bands
//! - **Writer**: canonical CSV output, frame times fixed to 3 decimals
//!
//! # Examples
//!
//! ```
//! use lightbench_core::{derive_speedups, load_str, LoadConfig};
//!
//! let csv = "\
//! Render Mode,Number of Lights,Average Frame Time (ms),Min Frame Time (ms),Max Frame Time (ms)
//! naive,1000,20.0,18.0,22.0
//! forward+,1000,10.0,9.0,11.0
//! clustered deferred,1000,5.0,4.5,5.5
//! ";
//!
//! let outcome = load_str(csv, &LoadConfig::default()).unwrap();
//! let derived = derive_speedups(&outcome.table, "naive").unwrap();
//!
//! assert_eq!(derived.series.len(), 2);
//! assert_eq!(derived.series[1].factor_at(1000), Some(4.0));
//! ```

pub mod derive;
pub mod error;
pub mod loader;
pub mod mode;
pub mod sample;
pub mod table;
pub mod writer;

pub use derive::{
    derive_speedups, speedup_between, speedup_factor, variance_bands, BandPoint, Derivation,
    DerivedSeries, SpeedupPoint, VarianceBand,
};
pub use error::{CoreError, ExcludedRow, IntegrityViolation, InvalidMetric, Result};
pub use loader::{
    load_path, load_reader, load_str, IntegrityPolicy, LoadConfig, LoadOutcome, COLUMNS,
    DEFAULT_MAX_ROWS,
};
pub use mode::RenderMode;
pub use sample::Sample;
pub use table::{BenchmarkTable, GridGap};
pub use writer::{to_csv_string, write_csv, FRAME_TIME_PRECISION};
