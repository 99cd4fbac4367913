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

//! Filter, throughput and grouping steps assembled into one chart.

use crate::chart::{highlight_min_allocation, Chart};
use crate::error::{BenchplotError, Result};
use crate::filter::ParameterFilter;
use crate::grouping::GroupingPolicy;
use crate::labels::LabelRules;
use crate::table::BenchmarkTable;
use crate::throughput::{compute_throughput, Baseline};

/// Per-benchmark settings for building charts.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    /// Benchmark title without parameter labels.
    pub title: String,
    /// Optional second title line.
    pub subtitle: Option<String>,
    /// Display unit label.
    pub unit: String,
    /// Quantity divided by mean time.
    pub baseline: Baseline,
    /// Throughput is divided by this for display.
    pub divisor: f64,
    /// Decimal places of throughput annotations.
    pub decimal_places: usize,
    /// Grouping policy.
    pub grouping: GroupingPolicy,
    /// Label rules.
    pub labels: LabelRules,
}

impl ChartSpec {
    /// Creates a spec with divisor 1, one decimal place and parallel grouping.
    pub fn new(title: impl Into<String>, unit: impl Into<String>, baseline: Baseline) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            unit: unit.into(),
            baseline,
            divisor: 1.0,
            decimal_places: 1,
            grouping: GroupingPolicy::default(),
            labels: LabelRules::default(),
        }
    }

    /// Sets the display divisor.
    pub fn with_divisor(mut self, divisor: f64) -> Self {
        self.divisor = divisor;
        self
    }

    /// Sets the decimal places.
    pub fn with_decimal_places(mut self, places: usize) -> Self {
        self.decimal_places = places;
        self
    }

    /// Sets the subtitle.
    pub fn with_subtitle(mut self, subtitle: Option<String>) -> Self {
        self.subtitle = subtitle;
        self
    }

    /// Sets the grouping policy.
    pub fn with_grouping(mut self, grouping: GroupingPolicy) -> Self {
        self.grouping = grouping;
        self
    }

    /// Sets the label rules.
    pub fn with_labels(mut self, labels: LabelRules) -> Self {
        self.labels = labels;
        self
    }
}

/// Builds the chart for one filter combination.
///
/// # Errors
///
/// - [`BenchplotError::UnresolvedBaseline`] if the baseline cannot be
///   resolved for `filter` (checked before any row is looked at).
/// - [`BenchplotError::UnknownFilterParameter`] or
///   [`BenchplotError::MissingParameterColumn`] if the filter or grouping
///   column is not part of the table.
/// - [`BenchplotError::NoMatchingRows`] if no row with a measured mean time
///   matches; callers report this as a skip.
///
/// # Examples
///
/// ```
/// use benchplot_core::filter::ParameterFilter;
/// use benchplot_core::pipeline::{build_chart, ChartSpec};
/// use benchplot_core::table::{BenchmarkRow, BenchmarkTable};
/// use benchplot_core::throughput::Baseline;
///
/// let table = BenchmarkTable::from_rows(
///     "report.csv",
///     vec![],
///     vec![
///         BenchmarkRow::new("A", Some(0.010), None),
///         BenchmarkRow::new("B_Parallel", Some(0.005), None),
///     ],
/// )
/// .unwrap();
/// let spec = ChartSpec::new("Parsing", "records/s", Baseline::Constant(1000.0));
/// let chart = build_chart(&table, &ParameterFilter::new(), &spec).unwrap();
///
/// let labels: Vec<_> = chart.entries.iter().map(|e| e.display_label.as_str()).collect();
/// assert_eq!(labels, vec!["B", "Parallel", "A"]);
/// ```
pub fn build_chart(table: &BenchmarkTable, filter: &ParameterFilter, spec: &ChartSpec) -> Result<Chart> {
    let baseline = spec.baseline.resolve(filter)?;

    if let Some(column) = spec.grouping.column() {
        if !table.has_parameter(column) {
            return Err(BenchplotError::MissingParameterColumn {
                path: table.source().to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let rows = filter.apply(table)?;
    let measured = compute_throughput(rows, baseline, spec.divisor);
    if measured.is_empty() {
        return Err(BenchplotError::NoMatchingRows {
            filter: filter.to_string(),
        });
    }

    let mut entries = spec.grouping.arrange(measured, &spec.labels);
    highlight_min_allocation(&mut entries);

    Ok(Chart {
        title: format!("{}{}", spec.title, filter.title_suffix()),
        subtitle: spec.subtitle.clone(),
        unit: spec.unit.clone(),
        decimal_places: spec.decimal_places,
        entries,
    })
}
