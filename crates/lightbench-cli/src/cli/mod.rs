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

//! CLI command definitions and argument parsing.

use crate::commands::{self, ReportOptions, SummaryOptions};
use crate::error::CliError;
use clap::{Subcommand, ValueEnum};
use lightbench_report::ImageFormat;
use std::path::PathBuf;

/// Image encoding accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Raster PNG
    Png,
    /// Vector SVG
    Svg,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Svg => ImageFormat::Svg,
        }
    }
}

/// Top-level commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use lightbench_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Render charts and print the performance summary
    ///
    /// Loads the benchmark CSV, derives speedups against the baseline mode,
    /// renders the comparison and variance figures into the output directory
    /// and prints the summary to stdout.
    Report {
        /// Benchmark CSV
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Baseline render mode for speedups [default: naive]
        #[arg(short, long)]
        baseline: Option<String>,

        /// Directory receiving the figures
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Target frame rates drawn as reference lines [default: 60 30 15]
        #[arg(long, num_args = 1..)]
        fps: Option<Vec<f64>>,

        /// Light count the summary reports on [default: largest]
        #[arg(long)]
        highlight: Option<u32>,

        /// Image format [default: png]
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Resolution in dots per inch [default: 300]
        #[arg(long)]
        dpi: Option<u32>,

        /// Decimal places of bar labels and summary numbers [default: 1]
        #[arg(long)]
        precision: Option<usize>,

        /// Fail on rows breaking min <= avg <= max instead of excluding them
        #[arg(short, long)]
        strict: bool,

        /// Skip the variance figure
        #[arg(long)]
        no_variance: bool,

        /// YAML or JSON configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Also write the summary as JSON
        #[arg(long, value_name = "FILE")]
        summary_json: Option<PathBuf>,
    },

    /// Print the performance summary only
    Summary {
        /// Benchmark CSV
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Baseline render mode for speedups [default: naive]
        #[arg(short, long)]
        baseline: Option<String>,

        /// Light count the summary reports on [default: largest]
        #[arg(long)]
        highlight: Option<u32>,

        /// Decimal places [default: 1]
        #[arg(long)]
        precision: Option<usize>,

        /// Fail on rows breaking min <= avg <= max instead of excluding them
        #[arg(short, long)]
        strict: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check a benchmark CSV without rendering
    ///
    /// Lists excluded rows and missing grid cells. In strict mode any
    /// excluded row is an error.
    Validate {
        /// Benchmark CSV
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Fail if any row would be excluded
        #[arg(short, long)]
        strict: bool,
    },
}

impl Commands {
    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns the [`CliError`] that stopped the command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Report {
                input,
                baseline,
                output_dir,
                fps,
                highlight,
                format,
                dpi,
                precision,
                strict,
                no_variance,
                config,
                summary_json,
            } => commands::report(ReportOptions {
                input,
                output_dir,
                baseline,
                fps,
                highlight,
                format: format.map(ImageFormat::from),
                dpi,
                precision,
                strict,
                no_variance,
                config,
                summary_json,
            }),
            Commands::Summary {
                input,
                baseline,
                highlight,
                precision,
                strict,
                json,
            } => commands::summary(SummaryOptions {
                input,
                baseline,
                highlight,
                precision,
                strict,
                json,
            }),
            Commands::Validate { input, strict } => commands::validate(&input, strict),
        }
    }
}
