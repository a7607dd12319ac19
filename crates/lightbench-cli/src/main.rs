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

//! lightbench command line interface

use clap::Parser;
use lightbench_cli::cli::Commands;
use lightbench_cli::logging;
use std::process::ExitCode;

/// lightbench - render benchmark reports
///
/// Turns a CSV of per-mode frame times into speedup charts, variance charts
/// and a textual performance summary.
///
/// # Examples
///
/// ```bash
/// # Full report into ./charts
/// lightbench report results.csv --output-dir charts
///
/// # Summary at 2500 lights against forward+
/// lightbench summary results.csv --baseline forward+ --highlight 2500
///
/// # Fail CI on corrupt rows
/// lightbench validate results.csv --strict
/// ```
#[derive(Parser)]
#[command(name = "lightbench")]
#[command(author, version, about = "lightbench - render benchmark reports", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
