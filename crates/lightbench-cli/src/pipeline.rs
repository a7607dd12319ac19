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

//! Load → derive → compose stages shared by the commands.

use crate::config::FigureConfig;
use crate::error::CliError;
use lightbench_chart::{compose_panel, PanelKind, StyleConfig};
use lightbench_core::{
    derive_speedups, load_path, BenchmarkTable, Derivation, IntegrityPolicy, LoadConfig,
    LoadOutcome,
};
use lightbench_report::Figure;
use std::path::Path;
use tracing::{debug, warn};

/// Loads a benchmark CSV and warns about every excluded row and grid gap.
pub fn load(input: &Path, strict: bool) -> Result<LoadOutcome, CliError> {
    let policy = if strict {
        IntegrityPolicy::Strict
    } else {
        IntegrityPolicy::Lenient
    };
    let outcome = load_path(input, &LoadConfig::default().with_integrity(policy))?;

    for gap in outcome.table.grid_gaps() {
        warn!("Incomplete grid: {}", gap);
    }
    debug!(
        "Loaded {} samples ({} modes, {} light counts) from {}",
        outcome.table.len(),
        outcome.table.modes().len(),
        outcome.table.light_counts().len(),
        input.display()
    );
    Ok(outcome)
}

/// Derives speedups against `baseline`.
pub fn derive(table: &BenchmarkTable, baseline: &str) -> Result<Derivation, CliError> {
    Ok(derive_speedups(table, baseline)?)
}

/// Checks that an explicit highlight light count exists in the table.
pub fn check_highlight(table: &BenchmarkTable, highlight: Option<u32>) -> Result<(), CliError> {
    match highlight {
        Some(count) if !table.light_counts().contains(&count) => {
            Err(CliError::InvalidInput(format!(
                "highlight light count {} is not in the table (available: {})",
                count,
                table
                    .light_counts()
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )))
        }
        _ => Ok(()),
    }
}

/// A figure whose panels could not be composed.
#[derive(Debug)]
pub struct SkippedFigure {
    /// Figure name.
    pub name: String,
    /// Composition errors, one per failed panel.
    pub reasons: Vec<String>,
}

/// Composes each figure's panels.
///
/// A panel that fails to compose is left out of its figure with a warning;
/// a figure left with no panels is skipped.
pub fn build_figures(
    table: &BenchmarkTable,
    derivation: &Derivation,
    style: &StyleConfig,
    plan: &[(&FigureConfig, &[PanelKind])],
) -> (Vec<Figure>, Vec<SkippedFigure>) {
    let mut figures = Vec::with_capacity(plan.len());
    let mut skipped = Vec::new();

    for (config, kinds) in plan {
        let mut panels = Vec::with_capacity(kinds.len());
        let mut reasons = Vec::new();
        for &kind in kinds.iter() {
            match compose_panel(kind, table, &derivation.series, style) {
                Ok(panel) => panels.push(panel),
                Err(e) => {
                    warn!("Leaving {} panel out of '{}': {}", kind, config.name, e);
                    reasons.push(e.to_string());
                }
            }
        }

        if panels.is_empty() {
            skipped.push(SkippedFigure {
                name: config.name.clone(),
                reasons,
            });
        } else {
            figures.push(
                Figure::new(config.name.clone(), config.title.clone(), panels)
                    .with_size(config.width_in, config.height_in),
            );
        }
    }

    (figures, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FiguresConfig;
    use lightbench_core::Sample;

    fn table(samples: Vec<Sample>) -> BenchmarkTable {
        BenchmarkTable::from_samples(samples, IntegrityPolicy::Lenient)
            .unwrap()
            .table
    }

    #[test]
    fn test_highlight_must_exist() {
        let t = table(vec![Sample::new("naive", 1000, 2.0, 1.0, 3.0)]);
        assert!(check_highlight(&t, None).is_ok());
        assert!(check_highlight(&t, Some(1000)).is_ok());
        let err = check_highlight(&t, Some(2000)).unwrap_err();
        assert!(err.to_string().contains("available: 1000"));
    }

    #[test]
    fn test_failed_panel_is_left_out() {
        // forward+ shares no light count with the baseline, so its speedup
        // series is empty and the comparison panel cannot be drawn.
        let t = table(vec![
            Sample::new("naive", 1000, 20.0, 18.0, 22.0),
            Sample::new("forward+", 2000, 10.0, 9.0, 11.0),
        ]);
        let derivation = derive(&t, "naive").unwrap();
        let figures = FiguresConfig::default();
        let both = [PanelKind::Trend, PanelKind::Comparison];
        let comparison_only = [PanelKind::Comparison];
        let plan: Vec<(&FigureConfig, &[PanelKind])> = vec![
            (&figures.comparison, &both[..]),
            (&figures.variance, &comparison_only[..]),
        ];

        let (built, skipped) = build_figures(&t, &derivation, &StyleConfig::default(), &plan);

        assert_eq!(built.len(), 1);
        assert_eq!(built[0].panels.len(), 1);
        assert_eq!(built[0].panels[0].kind, PanelKind::Trend);
        assert_eq!(built[0].width_in, 12.0);
        assert_eq!(built[0].height_in, 10.0);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].name, "performance_variance");
        assert!(skipped[0].reasons[0].contains("has no points"));
    }
}
