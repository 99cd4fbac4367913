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

//! Back-filling allocation data from another measurement run.
//!
//! Some runs (or platforms) do not record allocations. When a second run of
//! the same benchmark has them, rows are joined on a normalized method name
//! plus the full parameter mapping and the missing values are copied over.

use crate::table::{BenchmarkRow, BenchmarkTable};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Alias pairs collapsed by the merge join key.
///
/// Runs occasionally name the same variant differently (for example a
/// `FlameCsv_Reflection` method in one run is plain `FlameCsv` in another).
#[derive(Debug, Clone, Default)]
pub struct MethodAliases {
    aliases: BTreeMap<String, String>,
}

impl MethodAliases {
    /// Creates an empty alias set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an alias mapping `from` onto `to`.
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    /// Join key name for a method.
    pub fn normalize<'a>(&'a self, method: &'a str) -> &'a str {
        self.aliases.get(method).map(String::as_str).unwrap_or(method)
    }
}

impl FromIterator<(String, String)> for MethodAliases {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            aliases: iter.into_iter().collect(),
        }
    }
}

/// Outcome counters of a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Rows that received allocation data.
    pub filled: usize,
    /// Rows still missing allocation data afterwards.
    pub unmatched: usize,
    /// Rows that already had allocation data and were left alone.
    pub kept: usize,
}

type JoinKey = (String, Vec<(String, String)>);

fn join_key(row: &BenchmarkRow, aliases: &MethodAliases) -> JoinKey {
    (
        aliases.normalize(&row.method).to_string(),
        row.parameters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    )
}

/// Fills missing `allocated_bytes` in `primary` from `secondary`.
///
/// Rows that already carry allocation data are never overwritten. Rows of
/// `secondary` are eligible regardless of whether their mean time was
/// measured; the first matching row with allocation data wins.
///
/// # Examples
///
/// ```
/// use benchplot_core::merge::{merge_memory, MethodAliases};
/// use benchplot_core::table::{BenchmarkRow, BenchmarkTable};
///
/// let mut primary = BenchmarkTable::from_rows(
///     "AVX2/report.csv",
///     vec![],
///     vec![BenchmarkRow::new("FlameCsv_Reflection", Some(0.5), None)],
/// )
/// .unwrap();
/// let secondary = BenchmarkTable::from_rows(
///     "Neon/report.csv",
///     vec![],
///     vec![BenchmarkRow::new("FlameCsv", None, Some(4096.0))],
/// )
/// .unwrap();
///
/// let aliases = MethodAliases::new().with("FlameCsv_Reflection", "FlameCsv");
/// let stats = merge_memory(&mut primary, &secondary, &aliases);
/// assert_eq!(stats.filled, 1);
/// assert_eq!(primary.rows()[0].allocated_bytes, Some(4096.0));
/// ```
pub fn merge_memory(
    primary: &mut BenchmarkTable,
    secondary: &BenchmarkTable,
    aliases: &MethodAliases,
) -> MergeStats {
    let mut lookup: HashMap<JoinKey, f64> = HashMap::new();
    for row in secondary.rows() {
        if let Some(bytes) = row.allocated_bytes {
            lookup.entry(join_key(row, aliases)).or_insert(bytes);
        }
    }

    let mut stats = MergeStats::default();
    for row in primary.rows_mut() {
        if row.allocated_bytes.is_some() {
            stats.kept += 1;
            continue;
        }
        match lookup.get(&join_key(row, aliases)) {
            Some(&bytes) => {
                row.allocated_bytes = Some(bytes);
                stats.filled += 1;
            }
            None => stats.unmatched += 1,
        }
    }

    debug!(
        primary = %primary.source().display(),
        secondary = %secondary.source().display(),
        filled = stats.filled,
        unmatched = stats.unmatched,
        kept = stats.kept,
        "merged allocation data"
    );

    stats
}
