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

//! Summary command: text or JSON summary without rendering.

use super::DEFAULT_BASELINE;
use crate::error::CliError;
use crate::pipeline;
use lightbench_report::{Summary, DEFAULT_SUMMARY_PRECISION};
use std::io::{self, Write};
use std::path::PathBuf;

/// Inputs of [`summary`].
#[derive(Debug, Clone, Default)]
pub struct SummaryOptions {
    /// Benchmark CSV.
    pub input: PathBuf,
    /// Baseline mode, `naive` when unset.
    pub baseline: Option<String>,
    /// Summary light count, the largest in the table when unset.
    pub highlight: Option<u32>,
    /// Decimal places.
    pub precision: Option<usize>,
    /// Abort on integrity violations instead of excluding rows.
    pub strict: bool,
    /// Print JSON instead of text.
    pub json: bool,
}

/// Prints the performance summary of a benchmark CSV.
///
/// # Errors
///
/// Returns `Err` if the input cannot be loaded, the baseline is missing,
/// the highlight light count is not in the table, or stdout is closed.
pub fn summary(options: SummaryOptions) -> Result<(), CliError> {
    let loaded = pipeline::load(&options.input, options.strict)?;
    let table = &loaded.table;
    pipeline::check_highlight(table, options.highlight)?;

    let baseline = options.baseline.as_deref().unwrap_or(DEFAULT_BASELINE);
    let derivation = pipeline::derive(table, baseline)?;

    let summary = Summary::new(table, options.highlight)
        .with_excluded(loaded.excluded.clone())
        .with_undefined(derivation.invalid)
        .with_precision(options.precision.unwrap_or(DEFAULT_SUMMARY_PRECISION));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if options.json {
        let json = summary.to_json().map_err(|e| CliError::InvalidInput(e.to_string()))?;
        writeln!(out, "{}", json)
    } else {
        summary.write_text(&mut out)
    };
    written
        .and_then(|()| out.flush())
        .map_err(|e| CliError::io_error("<stdout>", e))
}
