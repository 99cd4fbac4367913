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

//! Grouping and ordering of measured rows into chart entries.
//!
//! Two independent policies exist:
//!
//! - [`GroupingPolicy::Parallel`] splits rows into sequential and parallel
//!   groups, each sorted by throughput, with a separator between them.
//! - [`GroupingPolicy::CaseSensitivity`] keeps the variants of each method
//!   adjacent, orders methods by their best throughput and places the
//!   ignore-case variant before the case-sensitive one.
//!
//! Output order is bottom-to-top, so ascending order puts the largest
//! throughput at the top of the chart.

use crate::chart::{ChartEntry, Hatch};
use crate::labels::LabelRules;
use crate::throughput::Measured;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// How rows of one chart are grouped and ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GroupingPolicy {
    /// Sequential group on top, parallel group below, separator between.
    #[default]
    Parallel,
    /// Variants of a method kept together, ranked by best throughput.
    CaseSensitivity {
        /// Boolean-like parameter column set for ignore-case variants.
        column: String,
    },
}

impl GroupingPolicy {
    /// Parameter column the policy reads, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            GroupingPolicy::Parallel => None,
            GroupingPolicy::CaseSensitivity { column } => Some(column),
        }
    }

    /// Orders measured rows into chart entries.
    pub fn arrange(&self, measured: Vec<Measured<'_>>, rules: &LabelRules) -> Vec<ChartEntry> {
        match self {
            GroupingPolicy::Parallel => arrange_parallel(measured, rules),
            GroupingPolicy::CaseSensitivity { column } => {
                arrange_case_sensitivity(measured, column, rules)
            }
        }
    }
}

fn by_throughput(a: &Measured<'_>, b: &Measured<'_>) -> Ordering {
    a.throughput.total_cmp(&b.throughput)
}

fn entry(measured: &Measured<'_>, rules: &LabelRules) -> ChartEntry {
    let label = rules.resolve(&measured.row.method);
    let mut entry = ChartEntry::bar(label.label, measured.throughput, label.color_key)
        .with_allocation(measured.row.allocated_bytes);
    entry.is_parallel_variant = label.is_parallel;
    entry.hatch = label.is_parallel.then_some(Hatch::Dots);
    entry
}

/// Parallel/sequential split.
///
/// Each group is stable-sorted by ascending throughput. When both groups
/// are non-empty the result is `parallel..., separator, sequential...`.
pub fn arrange_parallel(measured: Vec<Measured<'_>>, rules: &LabelRules) -> Vec<ChartEntry> {
    let (mut parallel, mut sequential): (Vec<_>, Vec<_>) = measured
        .into_iter()
        .partition(|m| rules.is_parallel(&m.row.method));
    parallel.sort_by(by_throughput);
    sequential.sort_by(by_throughput);

    let mut entries = Vec::with_capacity(parallel.len() + sequential.len() + 1);
    entries.extend(parallel.iter().map(|m| entry(m, rules)));
    if !parallel.is_empty() && !sequential.is_empty() {
        entries.push(ChartEntry::separator(rules.parallel_label.clone()));
    }
    entries.extend(sequential.iter().map(|m| entry(m, rules)));
    entries
}

/// Case-sensitivity ranking.
///
/// Methods are ranked by their maximum throughput (ties broken by method
/// name); within a method the ignore-case variant comes first, then the
/// case-sensitive one, each by descending throughput. No separators are
/// inserted.
pub fn arrange_case_sensitivity(
    measured: Vec<Measured<'_>>,
    column: &str,
    rules: &LabelRules,
) -> Vec<ChartEntry> {
    let mut best: HashMap<&str, f64> = HashMap::new();
    for m in &measured {
        let slot = best.entry(m.row.method.as_str()).or_insert(f64::NEG_INFINITY);
        *slot = slot.max(m.throughput);
    }

    let mut methods: Vec<(&str, f64)> = best.into_iter().collect();
    methods.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    let rank: HashMap<&str, usize> = methods
        .iter()
        .enumerate()
        .map(|(i, (method, _))| (*method, i))
        .collect();

    let ignores_case = |m: &Measured<'_>| m.row.parameter(column) == Some("True");

    let mut ordered: Vec<&Measured<'_>> = measured.iter().collect();
    ordered.sort_by(|a, b| {
        rank[a.row.method.as_str()]
            .cmp(&rank[b.row.method.as_str()])
            .then_with(|| ignores_case(b).cmp(&ignores_case(a)))
            .then_with(|| b.throughput.total_cmp(&a.throughput))
    });

    ordered
        .into_iter()
        .map(|m| {
            let mut e = entry(m, rules);
            let ignore = ignores_case(m);
            e.display_label = format!(
                "{} ({})",
                e.display_label,
                if ignore { "ignore case" } else { "case-sensitive" }
            );
            if ignore {
                e.hatch = Some(Hatch::Diagonal);
            }
            e
        })
        .collect()
}
