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

//! A single measured benchmark observation.

use crate::error::IntegrityViolation;
use crate::mode::RenderMode;
use serde::Serialize;

/// One `(mode, light count)` measurement with its frame-time statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Render technique.
    pub mode: RenderMode,
    /// Number of lights in the scene (independent variable).
    pub light_count: u32,
    /// Mean frame time in milliseconds.
    pub avg_frame_time_ms: f64,
    /// Fastest observed frame in milliseconds.
    pub min_frame_time_ms: f64,
    /// Slowest observed frame in milliseconds.
    pub max_frame_time_ms: f64,
}

impl Sample {
    /// Creates a sample without checking its invariants.
    ///
    /// Use [`Sample::check`] or load through a [`crate::BenchmarkTable`] to
    /// enforce `min <= avg <= max`.
    pub fn new(
        mode: impl Into<RenderMode>,
        light_count: u32,
        avg_frame_time_ms: f64,
        min_frame_time_ms: f64,
        max_frame_time_ms: f64,
    ) -> Self {
        Self {
            mode: mode.into(),
            light_count,
            avg_frame_time_ms,
            min_frame_time_ms,
            max_frame_time_ms,
        }
    }

    /// Aggregates raw per-frame captures into a sample.
    ///
    /// Returns `None` when `frame_times` is empty or contains a negative or
    /// non-finite value.
    ///
    /// ```
    /// use lightbench_core::Sample;
    ///
    /// let sample = Sample::from_frame_times("naive", 500, &[16.0, 18.0, 20.0]).unwrap();
    /// assert_eq!(sample.avg_frame_time_ms, 18.0);
    /// assert_eq!(sample.min_frame_time_ms, 16.0);
    /// assert_eq!(sample.max_frame_time_ms, 20.0);
    /// ```
    pub fn from_frame_times(
        mode: impl Into<RenderMode>,
        light_count: u32,
        frame_times: &[f64],
    ) -> Option<Self> {
        if frame_times.is_empty() || frame_times.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return None;
        }

        let sum: f64 = frame_times.iter().sum();
        let min = frame_times.iter().copied().fold(f64::INFINITY, f64::min);
        let max = frame_times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // Rounding in the sum can push the mean a hair outside [min, max].
        let avg = (sum / frame_times.len() as f64).clamp(min, max);

        Some(Self::new(mode, light_count, avg, min, max))
    }

    /// Checks `min <= avg <= max`.
    pub fn check(&self) -> Result<(), IntegrityViolation> {
        if self.min_frame_time_ms <= self.avg_frame_time_ms
            && self.avg_frame_time_ms <= self.max_frame_time_ms
        {
            Ok(())
        } else {
            Err(IntegrityViolation::FrameTimeOrder {
                min: self.min_frame_time_ms,
                avg: self.avg_frame_time_ms,
                max: self.max_frame_time_ms,
            })
        }
    }

    /// Width of the min–max range.
    pub fn spread_ms(&self) -> f64 {
        self.max_frame_time_ms - self.min_frame_time_ms
    }

    /// Average frames per second implied by the mean frame time.
    pub fn avg_fps(&self) -> Option<f64> {
        (self.avg_frame_time_ms > 0.0).then(|| 1000.0 / self.avg_frame_time_ms)
    }
}
