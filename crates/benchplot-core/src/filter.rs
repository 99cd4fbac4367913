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

//! Parameter filters selecting the rows of one chart.

use crate::error::{BenchplotError, Result};
use crate::table::{canonicalize_parameter, BenchmarkRow, BenchmarkTable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One accepted raw value of a parameter and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValue {
    /// Raw value as written in the export.
    pub value: String,
    /// Human-readable label used in titles and filenames.
    pub label: String,
}

/// A parameter column and the values to chart it by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Column name.
    pub name: String,
    /// Values in display order.
    pub values: Vec<ParameterValue>,
}

impl ParameterSpec {
    /// Creates a spec from `(value, label)` pairs.
    pub fn new(name: impl Into<String>, values: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            values: values
                .iter()
                .map(|(value, label)| ParameterValue {
                    value: (*value).to_string(),
                    label: (*label).to_string(),
                })
                .collect(),
        }
    }
}

/// A single `parameter == value` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    /// Parameter column.
    pub parameter: String,
    /// Required canonical value.
    pub value: String,
    /// Display label for the value.
    pub label: String,
}

/// Conjunction of equality conditions, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterFilter {
    terms: Vec<FilterTerm>,
}

impl ParameterFilter {
    /// Creates an empty filter that accepts every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition. The value is canonicalized like table cells.
    pub fn with(mut self, parameter: impl Into<String>, value: &str, label: impl Into<String>) -> Self {
        self.terms.push(FilterTerm {
            parameter: parameter.into(),
            value: canonicalize_parameter(value),
            label: label.into(),
        });
        self
    }

    /// Builds every combination of the given parameter values.
    ///
    /// The first parameter varies slowest. With no parameters a single empty
    /// filter is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchplot_core::filter::{ParameterFilter, ParameterSpec};
    ///
    /// let specs = vec![
    ///     ParameterSpec::new("Quoted", &[("False", "Unquoted"), ("True", "Quoted")]),
    ///     ParameterSpec::new("Async", &[("False", "Sync"), ("True", "Async")]),
    /// ];
    /// let combos = ParameterFilter::combinations(&specs);
    /// assert_eq!(combos.len(), 4);
    /// assert_eq!(combos[1].labels(), vec!["Unquoted", "Async"]);
    /// ```
    pub fn combinations(specs: &[ParameterSpec]) -> Vec<ParameterFilter> {
        specs.iter().fold(vec![ParameterFilter::new()], |acc, spec| {
            acc.iter()
                .flat_map(|filter| {
                    spec.values
                        .iter()
                        .map(move |v| filter.clone().with(spec.name.clone(), &v.value, v.label.clone()))
                })
                .collect()
        })
    }

    /// Conditions in order.
    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    /// Returns true if the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Canonical value required for `parameter`, if constrained.
    pub fn value_of(&self, parameter: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|t| t.parameter == parameter)
            .map(|t| t.value.as_str())
    }

    /// Display labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.label.as_str()).collect()
    }

    /// Checks that every constrained parameter is a column of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`BenchplotError::UnknownFilterParameter`] for the first
    /// unknown parameter.
    pub fn validate(&self, table: &BenchmarkTable) -> Result<()> {
        match self.terms.iter().find(|t| !table.has_parameter(&t.parameter)) {
            Some(term) => Err(BenchplotError::UnknownFilterParameter {
                parameter: term.parameter.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Returns true if `row` satisfies every condition.
    pub fn matches(&self, row: &BenchmarkRow) -> bool {
        self.terms
            .iter()
            .all(|t| row.parameter(&t.parameter) == Some(t.value.as_str()))
    }

    /// Rows of `table` satisfying the filter, in table order.
    ///
    /// # Errors
    ///
    /// Fails like [`ParameterFilter::validate`].
    pub fn apply<'a>(&self, table: &'a BenchmarkTable) -> Result<Vec<&'a BenchmarkRow>> {
        self.validate(table)?;
        Ok(table.rows().iter().filter(|row| self.matches(row)).collect())
    }

    /// Filename suffix built from the display labels.
    ///
    /// Labels are slugified and joined with `_`.
    pub fn file_suffix(&self) -> String {
        self.terms
            .iter()
            .map(|t| slugify(&t.label))
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Title decoration, e.g. ` (Quoted, Async)`; empty without conditions.
    pub fn title_suffix(&self) -> String {
        if self.terms.is_empty() {
            String::new()
        } else {
            format!(" ({})", self.labels().join(", "))
        }
    }
}

impl fmt::Display for ParameterFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", term.parameter, term.value)?;
        }
        Ok(())
    }
}

/// Lowercases and replaces spaces with underscores.
pub fn slugify(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}
