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


//! CLI command definitions and argument parsing.
//!
//! - [`chart`]: chart commands (render, inspect, default-config)
//! - [`utility`]: utility commands (completion)

mod chart;
mod utility;

use crate::error::CliError;
use clap::{Parser, Subcommand};

pub use chart::ChartCommands;
pub use utility::UtilityCommands;

/// benchplot - Benchmark throughput charts
///
/// Turns micro-benchmark CSV exports into horizontal throughput bar charts.
///
/// # Examples
///
/// ```bash
/// # Render every configured chart under the current directory
/// benchplot render
///
/// # Render only the reading charts, in parallel, with debug logs
/// benchplot render --root BenchmarkResults --only reading --parallel -v
///
/// # Check what the loader makes of one export
/// benchplot inspect AVX2/ReadObjects-report.csv --param Async
/// ```
#[derive(Parser)]
#[command(name = "benchplot")]
#[command(author, version, about = "benchplot - Benchmark throughput charts", long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands enum.
#[derive(Subcommand)]
pub enum Commands {
    // Chart commands - flattened to appear at top level
    #[command(flatten)]
    Chart(ChartCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns the command's [`CliError`].
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Chart(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
