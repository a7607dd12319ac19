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

//! Logging setup for the binary.

use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity level: `-q` gives `error`, none gives
/// `info`, `-v` gives `debug`, `-vv` and above give `trace`.
pub fn default_directive(verbose: u8, quiet: bool) -> String {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    ["lightbench", "lightbench_core", "lightbench_chart", "lightbench_report", "lightbench_cli"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the
/// verbosity flags.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_levels() {
        assert!(default_directive(0, false).starts_with("lightbench=info"));
        assert!(default_directive(1, false).contains("lightbench_core=debug"));
        assert!(default_directive(3, false).contains("=trace"));
        assert!(default_directive(2, true).contains("lightbench_report=error"));
    }
}
