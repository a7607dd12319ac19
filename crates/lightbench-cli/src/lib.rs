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

//! lightbench CLI library: argument parsing and command execution.
//!
//! # Commands
//!
//! - **report**: render the comparison and variance figures and print the
//!   performance summary
//! - **summary**: print the performance summary only, as text or JSON
//! - **validate**: check a benchmark CSV and list excluded rows and grid gaps
//!
//! # Exit codes
//!
//! `0` on success, including a report where some figures failed; `1` when
//! the input, baseline or settings are unusable, or when every figure failed.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use error::CliError;
