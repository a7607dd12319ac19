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

//! Validate command: schema, type and integrity checks without rendering.

use crate::error::CliError;
use crate::pipeline;
use std::path::Path;

/// Validates a benchmark CSV and prints what a report would set aside.
///
/// The file is always loaded leniently so that every offending row is
/// listed. In strict mode any excluded row makes the command fail.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, violates the schema or a type,
/// or, in strict mode, has any excluded row.
///
/// # Output
///
/// Prints to stdout:
/// - Sample, mode and light-count totals
/// - Each excluded row with its line number
/// - Each missing `(mode, light count)` cell
pub fn validate(input: &Path, strict: bool) -> Result<(), CliError> {
    let loaded = pipeline::load(input, false)?;
    let table = &loaded.table;

    println!("{}", input.display());
    println!("  Samples: {}", table.len());
    println!(
        "  Modes: {}",
        table
            .modes()
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  Light counts: {}",
        table
            .light_counts()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    if loaded.excluded.is_empty() {
        println!("  Excluded rows: none");
    } else {
        println!("  Excluded rows ({}):", loaded.excluded.len());
        for row in &loaded.excluded {
            println!("    - {}", row);
        }
    }

    let gaps = table.grid_gaps();
    if gaps.is_empty() {
        println!("  Grid: complete");
    } else {
        println!("  Grid gaps ({}):", gaps.len());
        for gap in &gaps {
            println!("    - {}", gap);
        }
    }

    if strict && !loaded.excluded.is_empty() {
        return Err(CliError::Rejected {
            excluded: loaded.excluded.len(),
        });
    }
    if strict {
        println!("  Mode: strict (no row may be excluded)");
    }
    Ok(())
}
