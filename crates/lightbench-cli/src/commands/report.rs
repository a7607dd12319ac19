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

//! Report command: the full load → derive → compose → emit pipeline.

use super::DEFAULT_BASELINE;
use crate::config::ReportConfig;
use crate::error::CliError;
use crate::pipeline;
use lightbench_chart::PanelKind;
use lightbench_report::{
    export_json, ImageFormat, PlottersSurface, ReportArtifact, ReportEmitter, Summary,
};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

/// Inputs of [`report`]; `None` fields fall back to the configuration file,
/// then to built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Benchmark CSV.
    pub input: PathBuf,
    /// Directory receiving the figures.
    pub output_dir: PathBuf,
    /// Baseline mode.
    pub baseline: Option<String>,
    /// Frame-rate targets for reference lines.
    pub fps: Option<Vec<f64>>,
    /// Summary light count.
    pub highlight: Option<u32>,
    /// Image encoding.
    pub format: Option<ImageFormat>,
    /// Resolution.
    pub dpi: Option<u32>,
    /// Decimal places of labels and summary numbers.
    pub precision: Option<usize>,
    /// Abort on integrity violations instead of excluding rows.
    pub strict: bool,
    /// Skip the variance figure.
    pub no_variance: bool,
    /// Configuration file.
    pub config: Option<PathBuf>,
    /// Also write the summary as JSON here.
    pub summary_json: Option<PathBuf>,
}

/// Runs the full pipeline and writes figures plus the text summary.
///
/// # Errors
///
/// Returns `Err` if:
/// - The configuration or input cannot be read or is malformed
/// - The baseline is absent or every speedup is undefined
/// - Style or render settings are invalid
/// - Every requested figure failed
///
/// A figure that fails while others succeed is reported as a warning.
pub fn report(options: ReportOptions) -> Result<(), CliError> {
    let config = match &options.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    let mut style = config.style.clone();
    if let Some(fps) = options.fps.as_ref().or(config.fps.as_ref()) {
        if fps.iter().any(|&rate| !(rate > 0.0 && rate.is_finite())) {
            return Err(CliError::InvalidInput(
                "frame-rate targets must be positive".to_string(),
            ));
        }
        style = style.with_frame_rate_targets(fps);
    }
    if let Some(precision) = options.precision {
        style = style.with_annotation_precision(precision);
    }
    style.validate()?;

    let mut settings = config.render;
    if let Some(format) = options.format {
        settings = settings.with_format(format);
    }
    if let Some(dpi) = options.dpi {
        settings = settings.with_dpi(dpi);
    }
    settings.validate()?;

    let baseline = options
        .baseline
        .or(config.baseline)
        .unwrap_or_else(|| DEFAULT_BASELINE.to_string());
    let highlight = options.highlight.or(config.highlight);

    let loaded = pipeline::load(&options.input, options.strict)?;
    let table = &loaded.table;
    pipeline::check_highlight(table, highlight)?;
    let derivation = pipeline::derive(table, &baseline)?;

    let comparison_panels = [PanelKind::Trend, PanelKind::Comparison];
    let variance_panels = [PanelKind::Variance];
    let mut plan = vec![(&config.figures.comparison, &comparison_panels[..])];
    if !options.no_variance {
        plan.push((&config.figures.variance, &variance_panels[..]));
    }
    let (figures, skipped) = pipeline::build_figures(table, &derivation, &style, &plan);

    let summary = Summary::new(table, highlight)
        .with_excluded(loaded.excluded.clone())
        .with_undefined(derivation.invalid.clone())
        .with_precision(style.annotation_precision);

    let mut emitter =
        ReportEmitter::new(PlottersSurface::new(), &options.output_dir).with_settings(settings);
    let outcome = {
        let stdout = io::stdout();
        let mut sink = stdout.lock();
        emitter.emit(&figures, &summary, &mut sink)
    };

    println!();
    for artifact in &outcome.artifacts {
        if let ReportArtifact::Image { path, .. } = artifact {
            println!("Chart saved to {}", path.display());
        }
    }
    for figure in &skipped {
        eprintln!(
            "Warning: figure '{}' skipped: {}",
            figure.name,
            figure.reasons.join("; ")
        );
    }
    for failure in &outcome.failures {
        eprintln!("Warning: {} failed: {}", failure.artifact, failure.error);
    }

    if let Some(path) = &options.summary_json {
        match export_json(&summary, path) {
            Ok(()) => info!("Summary JSON written to {}", path.display()),
            Err(e) => {
                warn!("Summary JSON was not written: {}", e);
                eprintln!("Warning: {}", CliError::io_error(path, e));
            }
        }
    }

    let produced = outcome.image_paths().count();
    let failed = skipped.len()
        + outcome
            .failures
            .iter()
            .filter(|f| f.artifact != lightbench_report::SUMMARY_ARTIFACT)
            .count();
    if produced == 0 && failed > 0 {
        return Err(CliError::NoArtifacts { failed });
    }
    Ok(())
}
