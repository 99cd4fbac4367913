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

//! Loading and normalizing benchmark export tables.
//!
//! Each export is a delimited table whose first column holds the method
//! identifier, followed by a unit-tagged mean column, an optional
//! unit-tagged allocation column and any number of parameter columns.
//! Loading converts all of this into a [`BenchmarkTable`] whose timings are
//! in seconds and allocations in bytes.

use crate::error::{BenchplotError, Result};
use crate::parse::parse_in_unit;
use crate::units::{resolve_units, ResolvedUnits};
use csv::{ReaderBuilder, Trim};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix character marking hidden or internal benchmarks.
pub const HIDDEN_PREFIX: char = '_';

/// One measured configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    /// Method identifier with decorative prefixes removed.
    pub method: String,
    /// Parameter name to canonical string value.
    pub parameters: BTreeMap<String, String>,
    /// Mean time in seconds.
    pub mean_seconds: Option<f64>,
    /// Allocated memory in bytes.
    pub allocated_bytes: Option<f64>,
}

impl BenchmarkRow {
    /// Creates a row without parameters.
    pub fn new(method: impl Into<String>, mean_seconds: Option<f64>, allocated_bytes: Option<f64>) -> Self {
        Self {
            method: normalize_method(&method.into()),
            parameters: BTreeMap::new(),
            mean_seconds,
            allocated_bytes,
        }
    }

    /// Adds a parameter value, canonicalizing it.
    pub fn with_parameter(mut self, name: impl Into<String>, value: &str) -> Self {
        self.parameters.insert(name.into(), canonicalize_parameter(value));
        self
    }

    /// Returns the canonical value of a parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

/// Ordered rows sharing one parameter schema.
#[derive(Debug, Clone)]
pub struct BenchmarkTable {
    source: PathBuf,
    parameter_columns: Vec<String>,
    units: Option<ResolvedUnits>,
    rows: Vec<BenchmarkRow>,
}

impl BenchmarkTable {
    /// Builds a table from already-normalized rows.
    ///
    /// # Errors
    ///
    /// Returns [`BenchplotError::MissingParameterColumn`] if a row lacks one
    /// of `parameter_columns`.
    pub fn from_rows(
        source: impl Into<PathBuf>,
        parameter_columns: Vec<String>,
        rows: Vec<BenchmarkRow>,
    ) -> Result<Self> {
        let source = source.into();
        for row in &rows {
            if let Some(missing) = parameter_columns
                .iter()
                .find(|c| !row.parameters.contains_key(c.as_str()))
            {
                return Err(BenchplotError::MissingParameterColumn {
                    path: source,
                    column: missing.clone(),
                });
            }
        }
        Ok(Self {
            source,
            parameter_columns,
            units: None,
            rows,
        })
    }

    /// Path the table was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Parameter column names, in configuration order.
    pub fn parameter_columns(&self) -> &[String] {
        &self.parameter_columns
    }

    /// Returns true if `name` is a parameter column.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameter_columns.iter().any(|c| c == name)
    }

    /// Units detected at load time (absent for tables built from rows).
    pub fn units(&self) -> Option<&ResolvedUnits> {
        self.units.as_ref()
    }

    /// Rows in file order.
    pub fn rows(&self) -> &[BenchmarkRow] {
        &self.rows
    }

    /// Mutable access for the memory merge.
    pub(crate) fn rows_mut(&mut self) -> &mut [BenchmarkRow] {
        &mut self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows without allocation data.
    pub fn missing_memory(&self) -> usize {
        self.rows.iter().filter(|r| r.allocated_bytes.is_none()).count()
    }

    /// Drops rows whose method contains every substring of any pattern.
    ///
    /// Returns the number of rows removed.
    pub fn exclude_methods(&mut self, patterns: &[Vec<String>]) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| {
            !patterns
                .iter()
                .filter(|p| !p.is_empty())
                .any(|p| p.iter().all(|needle| row.method.contains(needle.as_str())))
        });
        before - self.rows.len()
    }
}

/// Options for loading an export.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Parameter columns to carry on each row.
    pub parameter_columns: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            parameter_columns: Vec::new(),
        }
    }
}

impl LoadOptions {
    /// Sets the parameter columns.
    pub fn with_parameters<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// Loads and normalizes an export file.
///
/// # Errors
///
/// Fails if the file cannot be opened, the CSV is malformed, no timing
/// column is recognized, or a configured parameter column is missing.
pub fn load_table(path: impl AsRef<Path>, options: &LoadOptions) -> Result<BenchmarkTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| BenchplotError::io(path, e))?;
    read_table(file, path, options)
}

/// Reads and normalizes an export from any reader.
///
/// `source` is only used for error messages and [`BenchmarkTable::source`].
///
/// # Examples
///
/// ```
/// use benchplot_core::table::{read_table, LoadOptions};
///
/// let data = "Method,Async,Mean [ms],Allocated [kB]\n_Sep,False,\"1,000\",2\n";
/// let options = LoadOptions::default().with_parameters(["Async"]);
/// let table = read_table(data.as_bytes(), "report.csv", &options).unwrap();
///
/// let row = &table.rows()[0];
/// assert_eq!(row.method, "Sep");
/// assert_eq!(row.parameter("Async"), Some("False"));
/// assert_eq!(row.mean_seconds, Some(1.0));
/// assert_eq!(row.allocated_bytes, Some(2048.0));
/// ```
pub fn read_table<R: Read>(reader: R, source: impl AsRef<Path>, options: &LoadOptions) -> Result<BenchmarkTable> {
    let source = source.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let units = resolve_units(&headers, source)?;

    let index_of = |name: &str| headers.iter().position(|h| h.trim() == name);
    let timing_idx = index_of(&units.timing.column).ok_or_else(|| {
        BenchplotError::MissingRequiredColumn {
            path: source.to_path_buf(),
            columns: headers.join(", "),
        }
    })?;
    let memory_idx = units.memory.as_ref().and_then(|m| index_of(&m.column));

    let mut parameter_idx = Vec::with_capacity(options.parameter_columns.len());
    for column in &options.parameter_columns {
        let idx = index_of(column).ok_or_else(|| BenchplotError::MissingParameterColumn {
            path: source.to_path_buf(),
            column: column.clone(),
        })?;
        parameter_idx.push((column.clone(), idx));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let method = normalize_method(cell(0));
        if method.is_empty() {
            continue;
        }

        let parameters = parameter_idx
            .iter()
            .map(|(name, idx)| (name.clone(), canonicalize_parameter(cell(*idx))))
            .collect();

        rows.push(BenchmarkRow {
            method,
            parameters,
            mean_seconds: parse_in_unit(cell(timing_idx), units.timing.unit),
            allocated_bytes: match (memory_idx, &units.memory) {
                (Some(idx), Some(spec)) => parse_in_unit(cell(idx), spec.unit),
                _ => None,
            },
        });
    }

    debug!(
        path = %source.display(),
        rows = rows.len(),
        timing = units.timing.unit.symbol(),
        memory = units.memory.as_ref().map(|m| m.unit.symbol()).unwrap_or("none"),
        "loaded benchmark table"
    );

    Ok(BenchmarkTable {
        source: source.to_path_buf(),
        parameter_columns: options.parameter_columns.clone(),
        units: Some(units),
        rows,
    })
}

/// Removes decorative prefix characters from a method identifier.
pub fn normalize_method(raw: &str) -> String {
    raw.trim().trim_start_matches(HIDDEN_PREFIX).to_string()
}

/// Canonical string form of a parameter cell.
///
/// Boolean-like values are spelled `True` / `False` regardless of how the
/// export wrote them; everything else is kept verbatim (trimmed, unquoted).
///
/// # Examples
///
/// ```
/// use benchplot_core::table::canonicalize_parameter;
///
/// assert_eq!(canonicalize_parameter("true"), "True");
/// assert_eq!(canonicalize_parameter("FALSE"), "False");
/// assert_eq!(canonicalize_parameter("Utf8"), "Utf8");
/// ```
pub fn canonicalize_parameter(raw: &str) -> String {
    let value = raw.trim().trim_matches('"').trim();
    if value.eq_ignore_ascii_case("true") {
        "True".to_string()
    } else if value.eq_ignore_ascii_case("false") {
        "False".to_string()
    } else {
        value.to_string()
    }
}
