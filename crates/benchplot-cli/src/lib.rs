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


//! benchplot command-line library.
//!
//! # Commands
//!
//! - **render**: render throughput charts for every configured benchmark
//! - **inspect**: show detected units and normalized rows of one export
//! - **default-config**: print the built-in configuration
//! - **completion**: generate shell completion scripts
//!
//! # Configuration
//!
//! See [`config::PlotConfig`]. The render loop itself lives in [`driver`]
//! and accepts any [`benchplot_core::ChartRenderer`]; the binary uses
//! [`benchplot_svg::SvgRenderer`].
//!
//! # Examples
//!
//! ```no_run
//! use benchplot_cli::config::PlotConfig;
//! use benchplot_cli::driver::{run, RenderOptions};
//! use benchplot_svg::SvgRenderer;
//!
//! # fn main() -> Result<(), benchplot_cli::error::CliError> {
//! let config = PlotConfig::load("benchplot.json")?;
//! let options = RenderOptions {
//!     root: "BenchmarkResults".into(),
//!     ..Default::default()
//! };
//! let summary = run(&config, &options, &SvgRenderer::new())?;
//! println!("{} charts written", summary.charts);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
