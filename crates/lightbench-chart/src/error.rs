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

//! Error types for chart composition.

use crate::panel::PanelKind;
use thiserror::Error;

/// Errors produced while composing chart panels.
///
/// # Examples
///
/// ```
/// use lightbench_chart::{ChartError, PanelKind};
///
/// let err = ChartError::EmptySeries {
///     panel: PanelKind::Trend,
///     series: "naive".to_string(),
/// };
/// assert_eq!(err.to_string(), "Series 'naive' in trend panel has no points");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// A requested series has nothing to draw.
    #[error("Series '{series}' in {panel} panel has no points")]
    EmptySeries {
        /// Panel being composed.
        panel: PanelKind,
        /// Series label, or `<none>` when the panel has no series at all.
        series: String,
    },

    /// A style parameter is out of range.
    #[error("Invalid style parameter '{parameter}': {reason}")]
    InvalidStyle {
        /// Parameter name.
        parameter: String,
        /// Why it is invalid.
        reason: String,
    },
}

/// Result alias for chart composition.
pub type Result<T> = std::result::Result<T, ChartError>;

impl ChartError {
    /// Creates an [`ChartError::InvalidStyle`].
    pub fn invalid_style(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidStyle {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_style_display() {
        let err = ChartError::invalid_style("headroom", "must be at least 1.0");
        assert_eq!(
            err.to_string(),
            "Invalid style parameter 'headroom': must be at least 1.0"
        );
    }

    #[test]
    fn test_empty_series_display() {
        let err = ChartError::EmptySeries {
            panel: PanelKind::Comparison,
            series: "<none>".to_string(),
        };
        assert!(err.to_string().contains("comparison panel"));
    }
}
