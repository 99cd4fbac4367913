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

//! Throughput derivation from mean times.

use crate::error::{BenchplotError, Result};
use crate::filter::ParameterFilter;
use crate::table::{canonicalize_parameter, BenchmarkRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference quantity divided by mean time to get throughput.
///
/// In configuration files a constant is a plain number, and a
/// parameter-dependent baseline is an object with exactly one parameter
/// key: `{"Quoted": {"False": 65536, "True": 100000}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBaseline", into = "RawBaseline")]
pub enum Baseline {
    /// Same quantity for every filter combination.
    Constant(f64),
    /// Quantity looked up by the active value of one parameter.
    PerParameterValue {
        /// Parameter the quantity depends on.
        parameter: String,
        /// Canonical parameter value to quantity.
        values: BTreeMap<String, f64>,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawBaseline {
    Constant(f64),
    Keyed(BTreeMap<String, BTreeMap<String, f64>>),
}

impl TryFrom<RawBaseline> for Baseline {
    type Error = String;

    fn try_from(raw: RawBaseline) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawBaseline::Constant(v) => Ok(Baseline::Constant(v)),
            RawBaseline::Keyed(map) => {
                if map.len() != 1 {
                    return Err(format!(
                        "parameter-dependent baseline must name exactly one parameter, found {}",
                        map.len()
                    ));
                }
                let (parameter, values) = map.into_iter().next().ok_or("empty baseline")?;
                Ok(Baseline::per_parameter(parameter, values))
            }
        }
    }
}

impl From<Baseline> for RawBaseline {
    fn from(baseline: Baseline) -> Self {
        match baseline {
            Baseline::Constant(v) => RawBaseline::Constant(v),
            Baseline::PerParameterValue { parameter, values } => {
                RawBaseline::Keyed(BTreeMap::from([(parameter, values)]))
            }
        }
    }
}

impl Baseline {
    /// Builds a parameter-dependent baseline, canonicalizing the value keys.
    pub fn per_parameter<I, K>(parameter: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        Baseline::PerParameterValue {
            parameter: parameter.into(),
            values: values
                .into_iter()
                .map(|(k, v)| (canonicalize_parameter(k.as_ref()), v))
                .collect(),
        }
    }

    /// Resolves the quantity for one filter combination.
    ///
    /// # Errors
    ///
    /// Returns [`BenchplotError::UnresolvedBaseline`] when the baseline is
    /// parameter-dependent and the filter does not constrain that parameter,
    /// or constrains it to a value with no entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchplot_core::filter::ParameterFilter;
    /// use benchplot_core::throughput::Baseline;
    ///
    /// let baseline = Baseline::per_parameter("Quoted", [("False", 65536.0), ("True", 100000.0)]);
    /// let filter = ParameterFilter::new().with("Quoted", "True", "Quoted");
    /// assert_eq!(baseline.resolve(&filter).unwrap(), 100000.0);
    ///
    /// let unrelated = ParameterFilter::new().with("Async", "True", "Async");
    /// assert!(baseline.resolve(&unrelated).is_err());
    /// ```
    pub fn resolve(&self, filter: &ParameterFilter) -> Result<f64> {
        match self {
            Baseline::Constant(v) => Ok(*v),
            Baseline::PerParameterValue { parameter, values } => filter
                .value_of(parameter)
                .and_then(|value| values.get(value))
                .copied()
                .ok_or_else(|| BenchplotError::UnresolvedBaseline {
                    parameter: parameter.clone(),
                    filter: filter.to_string(),
                }),
        }
    }
}

/// A row with its computed throughput.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measured<'a> {
    /// Source row.
    pub row: &'a BenchmarkRow,
    /// Throughput in display units.
    pub throughput: f64,
}

/// Computes `(baseline / mean_seconds) / divisor` for each row.
///
/// Rows without a positive mean time are left out entirely rather than
/// charted as zero.
///
/// # Examples
///
/// ```
/// use benchplot_core::table::BenchmarkRow;
/// use benchplot_core::throughput::compute_throughput;
///
/// let rows = [
///     BenchmarkRow::new("A", Some(0.010), None),
///     BenchmarkRow::new("B", None, Some(64.0)),
/// ];
/// let measured = compute_throughput(&rows, 1000.0, 1.0);
/// assert_eq!(measured.len(), 1);
/// assert_eq!(measured[0].throughput, 100_000.0);
/// ```
pub fn compute_throughput<'a, I>(rows: I, baseline: f64, divisor: f64) -> Vec<Measured<'a>>
where
    I: IntoIterator<Item = &'a BenchmarkRow>,
{
    rows.into_iter()
        .filter_map(|row| {
            let mean = row.mean_seconds.filter(|m| *m > 0.0)?;
            let throughput = (baseline / mean) / divisor;
            (throughput.is_finite() && throughput >= 0.0).then_some(Measured { row, throughput })
        })
        .collect()
}
