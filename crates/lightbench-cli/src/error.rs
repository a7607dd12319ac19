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

//! Structured error types for the lightbench CLI.

use lightbench_chart::ChartError;
use lightbench_core::CoreError;
use lightbench_report::RenderError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a CLI command.
///
/// Per-artifact and per-row problems are reported as warnings and do not
/// surface here.
///
/// # Examples
///
/// ```rust,no_run
/// use lightbench_cli::error::CliError;
///
/// fn read(path: &str) -> Result<String, CliError> {
///     std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug)]
pub enum CliError {
    /// A file could not be read or written.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error.
        path: PathBuf,
        /// The error message.
        message: String,
    },

    /// Loading or deriving failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Style configuration or composition failed.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// Render settings are invalid.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The configuration file could not be parsed.
    #[error("Invalid configuration file '{path}': {message}")]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A command-line value does not fit the data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Figures were requested and none was produced.
    #[error("No figure could be produced ({failed} failed)")]
    NoArtifacts {
        /// Number of failed figures.
        failed: usize,
    },

    /// Strict validation found rows that would be excluded.
    #[error("{excluded} row(s) failed integrity checks")]
    Rejected {
        /// Number of offending rows.
        excluded: usize,
    },
}

impl CliError {
    /// Creates an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    pub fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
