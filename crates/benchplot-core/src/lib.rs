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

//! Benchmark export normalization and throughput chart model.
//!
//! This crate turns micro-benchmark exports (one row per method and
//! parameter combination, unit-tagged mean and allocation columns) into
//! ordered chart entries ready for a renderer.
//!
//! # Pipeline
//!
//! ```text
//! export ──► units + parse ──► table ──► merge (optional)
//!        ──► filter ──► throughput ──► grouping ──► ChartRenderer
//! ```
//!
//! - [`units`]: picks the timing and memory columns from unit-tagged headers
//! - [`parse`]: forgiving numeric cell parser
//! - [`table`]: loads an export into a [`BenchmarkTable`]
//! - [`merge`]: fills missing allocations from another run
//! - [`filter`]: parameter filters and their combinations
//! - [`throughput`]: baselines and throughput computation
//! - [`grouping`]: parallel and case-sensitivity ordering policies
//! - [`chart`]: chart entries, the [`ChartRenderer`] trait, output naming
//! - [`style`]: palette and light/dark themes
//!
//! # Example
//!
//! ```
//! use benchplot_core::{build_chart, Baseline, ChartSpec, LoadOptions, ParameterFilter};
//!
//! let export = "\
//! Method,Async,Mean [ms],Allocated [kB]
//! _Sep,False,10,4
//! _Sep_Parallel,False,5,8
//! ";
//! let options = LoadOptions::default().with_parameters(["Async"]);
//! let table = benchplot_core::read_table(export.as_bytes(), "report.csv", &options).unwrap();
//!
//! let spec = ChartSpec::new("Reading", "records/s", Baseline::Constant(1000.0));
//! let filter = ParameterFilter::new().with("Async", "False", "Sync");
//! let chart = build_chart(&table, &filter, &spec).unwrap();
//!
//! assert_eq!(chart.title, "Reading (Sync)");
//! assert_eq!(chart.entries.len(), 3); // parallel bar, separator, sequential bar
//! ```

pub mod chart;
mod error;
pub mod filter;
pub mod grouping;
pub mod labels;
pub mod merge;
pub mod parse;
pub mod pipeline;
pub mod style;
pub mod table;
pub mod throughput;
pub mod units;

pub use chart::{Chart, ChartEntry, ChartRenderer, Hatch};
pub use error::{BenchplotError, Result};
pub use filter::{ParameterFilter, ParameterSpec, ParameterValue};
pub use grouping::GroupingPolicy;
pub use labels::{LabelAlias, LabelRules, PrefixRule};
pub use merge::{merge_memory, MergeStats, MethodAliases};
pub use pipeline::{build_chart, ChartSpec};
pub use style::{Color, Palette, Theme, ThemeName};
pub use table::{load_table, read_table, BenchmarkRow, BenchmarkTable, LoadOptions};
pub use throughput::{compute_throughput, Baseline};
