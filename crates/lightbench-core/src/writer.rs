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

//! Write a [`BenchmarkTable`] back out in the canonical CSV layout.

use crate::error::Result;
use crate::loader::COLUMNS;
use crate::table::BenchmarkTable;
use csv::WriterBuilder;
use std::io::Write;

/// Decimal places used for frame times in written CSV.
pub const FRAME_TIME_PRECISION: usize = 3;

/// Writes the table as canonical CSV, one row per sample in load order.
pub fn write_csv<W: Write>(table: &BenchmarkTable, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(COLUMNS)?;

    for sample in table.samples() {
        writer.write_record([
            sample.mode.as_str().to_string(),
            sample.light_count.to_string(),
            format!("{:.*}", FRAME_TIME_PRECISION, sample.avg_frame_time_ms),
            format!("{:.*}", FRAME_TIME_PRECISION, sample.min_frame_time_ms),
            format!("{:.*}", FRAME_TIME_PRECISION, sample.max_frame_time_ms),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Renders the table as a canonical CSV string.
///
/// ```
/// use lightbench_core::{to_csv_string, IntegrityPolicy, BenchmarkTable, Sample};
///
/// let outcome = BenchmarkTable::from_samples(
///     vec![Sample::new("naive", 500, 12.5, 11.0, 14.25)],
///     IntegrityPolicy::Lenient,
/// )
/// .unwrap();
///
/// let csv = to_csv_string(&outcome.table).unwrap();
/// assert!(csv.ends_with("naive,500,12.500,11.000,14.250\n"));
/// ```
pub fn to_csv_string(table: &BenchmarkTable) -> Result<String> {
    let mut buffer = Vec::with_capacity(64 * (table.len() + 1));
    write_csv(table, &mut buffer)?;
    // Every field written above is valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
