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

//! Render mode labels.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Label of a benchmarked render technique, e.g. `naive` or `forward+`.
///
/// The set of modes is open: any non-empty label found in the input is a
/// mode. Labels compare exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderMode(String);

impl RenderMode {
    /// Creates a mode from a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the raw label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the label with the first letter of every word capitalized,
    /// for legends and summaries (`clustered deferred` → `Clustered Deferred`).
    ///
    /// ```
    /// use lightbench_core::RenderMode;
    ///
    /// assert_eq!(RenderMode::new("forward+").title(), "Forward+");
    /// assert_eq!(RenderMode::new("clustered deferred").title(), "Clustered Deferred");
    /// ```
    pub fn title(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut at_word_start = true;
        for ch in self.0.chars() {
            if ch.is_alphabetic() {
                if at_word_start {
                    out.extend(ch.to_uppercase());
                } else {
                    out.extend(ch.to_lowercase());
                }
                at_word_start = false;
            } else {
                out.push(ch);
                at_word_start = true;
            }
        }
        out
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RenderMode {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for RenderMode {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Borrow<str> for RenderMode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RenderMode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(RenderMode::new("naive").title(), "Naive");
        assert_eq!(RenderMode::new("FORWARD+").title(), "Forward+");
        assert_eq!(RenderMode::new("tiled-deferred").title(), "Tiled-Deferred");
    }

    #[test]
    fn test_borrow_lookup() {
        let mut set = std::collections::HashSet::new();
        set.insert(RenderMode::new("naive"));
        assert!(set.contains("naive"));
        assert!(!set.contains("Naive"));
    }
}
