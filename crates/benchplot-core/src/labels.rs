// Dweve benchplot - Benchmark throughput charts
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

//! Display labels and palette keys for method identifiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default marker identifying parallel variants.
pub const DEFAULT_PARALLEL_MARKER: &str = "_Parallel";

/// Default caption drawn next to the parallel separator.
pub const DEFAULT_PARALLEL_LABEL: &str = "Parallel";

/// Exact display override for a base method name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAlias {
    /// Text shown on the axis.
    pub label: String,
    /// Palette key.
    pub color: String,
}

/// Rewrites `<prefix><variant>` into `<label_prefix><variant>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRule {
    /// Prefix matched against the base method.
    pub prefix: String,
    /// Replacement prepended to the variant.
    pub label_prefix: String,
    /// Palette key for every match.
    pub color: String,
}

/// Resolved label of one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodLabel {
    /// Text shown on the axis.
    pub label: String,
    /// Palette key.
    pub color_key: String,
    /// Whether the method is a parallel variant.
    pub is_parallel: bool,
}

/// Rules turning method identifiers into display labels.
///
/// Resolution order: exact alias, then the first matching prefix rule, then
/// suffix stripping. The parallel marker is removed before any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelRules {
    /// Substring marking parallel variants.
    pub parallel_marker: String,
    /// Separator caption for the parallel group.
    pub parallel_label: String,
    /// Exact base-name overrides.
    pub aliases: BTreeMap<String, LabelAlias>,
    /// Prefix rewrites.
    pub prefixes: Vec<PrefixRule>,
    /// Suffixes removed from the label (e.g. `_Hardcoded`).
    pub strip_suffixes: Vec<String>,
}

impl Default for LabelRules {
    fn default() -> Self {
        Self {
            parallel_marker: DEFAULT_PARALLEL_MARKER.to_string(),
            parallel_label: DEFAULT_PARALLEL_LABEL.to_string(),
            aliases: BTreeMap::new(),
            prefixes: Vec::new(),
            strip_suffixes: Vec::new(),
        }
    }
}

impl LabelRules {
    /// Returns true if `method` is a parallel variant.
    pub fn is_parallel(&self, method: &str) -> bool {
        !self.parallel_marker.is_empty() && method.contains(&self.parallel_marker)
    }

    /// Returns a copy with `overrides` layered over the aliases.
    pub fn with_aliases(&self, overrides: &BTreeMap<String, LabelAlias>) -> Self {
        let mut rules = self.clone();
        rules
            .aliases
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        rules
    }

    /// Resolves the label and palette key of a method.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchplot_core::labels::{LabelRules, PrefixRule};
    ///
    /// let rules = LabelRules {
    ///     prefixes: vec![PrefixRule {
    ///         prefix: "Flame_".to_string(),
    ///         label_prefix: "FlameCsv ".to_string(),
    ///         color: "FlameCsv".to_string(),
    ///     }],
    ///     strip_suffixes: vec!["_Hardcoded".to_string()],
    ///     ..Default::default()
    /// };
    ///
    /// let flame = rules.resolve("Flame_Tokenize_Parallel");
    /// assert_eq!(flame.label, "FlameCsv Tokenize");
    /// assert_eq!(flame.color_key, "FlameCsv");
    /// assert!(flame.is_parallel);
    ///
    /// let sep = rules.resolve("Sep_Hardcoded");
    /// assert_eq!(sep.label, "Sep");
    /// assert_eq!(sep.color_key, "Sep");
    /// ```
    pub fn resolve(&self, method: &str) -> MethodLabel {
        let is_parallel = self.is_parallel(method);
        let base = if self.parallel_marker.is_empty() {
            method.to_string()
        } else {
            method.replace(&self.parallel_marker, "")
        };

        if let Some(alias) = self.aliases.get(&base) {
            return MethodLabel {
                label: alias.label.clone(),
                color_key: alias.color.clone(),
                is_parallel,
            };
        }

        if let Some((rule, variant)) = self
            .prefixes
            .iter()
            .find_map(|r| base.strip_prefix(r.prefix.as_str()).map(|v| (r, v)))
        {
            return MethodLabel {
                label: format!("{}{}", rule.label_prefix, variant),
                color_key: rule.color.clone(),
                is_parallel,
            };
        }

        let stripped = self
            .strip_suffixes
            .iter()
            .filter(|s| !s.is_empty())
            .fold(base, |name, suffix| name.replace(suffix.as_str(), ""));

        MethodLabel {
            label: stripped.clone(),
            color_key: stripped,
            is_parallel,
        }
    }
}
