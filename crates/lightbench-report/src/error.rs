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

//! Error types for figure rendering and report emission.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while rendering or emitting one artifact.
///
/// Every variant is local to a single artifact; the emitter records it and
/// moves on to the next one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The output destination could not be created or written.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// The drawing backend failed.
    #[error("Rendering figure '{figure}' failed: {message}")]
    Backend {
        /// Figure name.
        figure: String,
        /// Backend error message.
        message: String,
    },

    /// A figure with no panels was submitted.
    #[error("Figure '{figure}' has no panels")]
    EmptyFigure {
        /// Figure name.
        figure: String,
    },

    /// The embedded font could not be registered with the drawing library.
    #[error("Font '{family}' is unavailable: {message}")]
    Font {
        /// Font family name.
        family: String,
        /// Why registration failed.
        message: String,
    },

    /// Render settings are out of range.
    #[error("Invalid render setting '{parameter}': {reason}")]
    InvalidSettings {
        /// Setting name.
        parameter: String,
        /// Why it is invalid.
        reason: String,
    },
}

/// Result alias for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;

impl RenderError {
    /// Creates an [`RenderError::Io`] from a path and an I/O error.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a [`RenderError::Backend`] from any displayable backend error.
    pub fn backend(figure: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::Backend {
            figure: figure.into(),
            message: source.to_string(),
        }
    }
}
