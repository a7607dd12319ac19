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

//! The report emitter: renders every figure, then writes the text summary.
//!
//! A failure on one artifact is recorded and the remaining artifacts are
//! still attempted. The text sink is flushed and the surface finished on
//! every path.

use crate::error::{RenderError, Result};
use crate::figure::{Figure, RenderSettings};
use crate::summary::Summary;
use crate::surface::RenderSurface;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Artifact name used for the text summary in failures.
pub const SUMMARY_ARTIFACT: &str = "summary";

/// An output that was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportArtifact {
    /// A rendered figure.
    Image {
        /// Figure name.
        figure: String,
        /// File written.
        path: PathBuf,
    },
    /// The text summary written to the sink.
    Summary {
        /// Number of lines written.
        lines: usize,
    },
}

/// An output that could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactFailure {
    /// Figure name, or [`SUMMARY_ARTIFACT`].
    pub artifact: String,
    /// What went wrong.
    pub error: RenderError,
}

/// Result of one [`ReportEmitter::emit`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmitOutcome {
    /// Produced artifacts, in emission order.
    pub artifacts: Vec<ReportArtifact>,
    /// Failed artifacts, in emission order.
    pub failures: Vec<ArtifactFailure>,
}

impl EmitOutcome {
    /// Returns true if nothing failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Paths of rendered images.
    pub fn image_paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.artifacts.iter().filter_map(|artifact| match artifact {
            ReportArtifact::Image { path, .. } => Some(path.as_path()),
            ReportArtifact::Summary { .. } => None,
        })
    }

    /// Returns true if images were requested and none was produced.
    pub fn all_images_failed(&self) -> bool {
        self.image_paths().next().is_none()
            && self
                .failures
                .iter()
                .any(|failure| failure.artifact != SUMMARY_ARTIFACT)
    }
}

/// Renders figures into an output directory through a [`RenderSurface`].
///
/// # Examples
///
/// ```no_run
/// use lightbench_report::{Figure, PlottersSurface, ReportEmitter, Summary};
/// # fn figures() -> Vec<Figure> { Vec::new() }
/// # fn summary() -> Summary { unimplemented!() }
///
/// let mut emitter = ReportEmitter::new(PlottersSurface::new(), "reports");
/// let outcome = emitter.emit(&figures(), &summary(), &mut std::io::stdout());
/// for failure in &outcome.failures {
///     eprintln!("{}: {}", failure.artifact, failure.error);
/// }
/// ```
#[derive(Debug)]
pub struct ReportEmitter<S> {
    surface: S,
    output_dir: PathBuf,
    settings: RenderSettings,
}

impl<S: RenderSurface> ReportEmitter<S> {
    /// Creates an emitter with default [`RenderSettings`].
    pub fn new(surface: S, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            surface,
            output_dir: output_dir.into(),
            settings: RenderSettings::default(),
        }
    }

    /// Sets the render settings.
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Render settings in use.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Destination of a figure: `<output_dir>/<name>.<ext>`.
    pub fn target_for(&self, figure: &Figure) -> PathBuf {
        self.output_dir.join(figure.file_name(self.settings.format))
    }

    /// Consumes the emitter, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Renders every figure in order, then writes `summary` to `sink`.
    ///
    /// Never fails as a whole: per-artifact errors are collected in
    /// [`EmitOutcome::failures`].
    pub fn emit<W: Write + ?Sized>(
        &mut self,
        figures: &[Figure],
        summary: &Summary,
        sink: &mut W,
    ) -> EmitOutcome {
        let mut outcome = EmitOutcome::default();
        let prepared = self.prepare();
        let mut seen = HashSet::new();

        for figure in figures {
            let target = self.target_for(figure);
            let result = prepared
                .clone()
                .and_then(|()| check_unique(figure, &mut seen))
                .and_then(|()| self.surface.render(figure, &self.settings, &target));

            match result {
                Ok(()) => {
                    info!("Figure '{}' saved to {}", figure.name, target.display());
                    outcome.artifacts.push(ReportArtifact::Image {
                        figure: figure.name.clone(),
                        path: target,
                    });
                }
                Err(error) => {
                    warn!("Figure '{}' was not produced: {}", figure.name, error);
                    outcome.failures.push(ArtifactFailure {
                        artifact: figure.name.clone(),
                        error,
                    });
                }
            }
        }

        let written = summary.write_text(sink);
        let flushed = sink.flush();
        match written.and(flushed) {
            Ok(()) => {
                let lines = summary.to_string().lines().count();
                debug!("Summary written ({} lines)", lines);
                outcome.artifacts.push(ReportArtifact::Summary { lines });
            }
            Err(e) => {
                warn!("Summary was not written: {}", e);
                outcome.failures.push(ArtifactFailure {
                    artifact: SUMMARY_ARTIFACT.to_string(),
                    error: RenderError::io_error(SUMMARY_ARTIFACT, e),
                });
            }
        }

        if let Err(error) = self.surface.finish() {
            warn!("Rendering surface did not shut down cleanly: {}", error);
            outcome.failures.push(ArtifactFailure {
                artifact: "surface".to_string(),
                error,
            });
        }

        outcome
    }

    fn prepare(&self) -> Result<()> {
        self.settings.validate()?;
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| RenderError::io_error(&self.output_dir, e))
    }
}

fn check_unique<'a>(figure: &'a Figure, seen: &mut HashSet<&'a str>) -> Result<()> {
    if seen.insert(figure.name.as_str()) {
        Ok(())
    } else {
        Err(RenderError::InvalidSettings {
            parameter: "name".to_string(),
            reason: format!("figure name '{}' is used more than once", figure.name),
        })
    }
}
