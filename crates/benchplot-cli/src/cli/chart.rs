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


//! Chart commands.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;
use std::path::PathBuf;

/// Commands that read exports and produce charts.
#[derive(Subcommand)]
pub enum ChartCommands {
    /// Render throughput charts
    ///
    /// Processes every configured benchmark in every source directory and
    /// writes one chart per parameter combination and theme next to the
    /// export.
    Render {
        /// Configuration file (defaults to <ROOT>/benchplot.json, then the built-in one)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory holding the source directories
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        root: PathBuf,

        /// Only benchmarks whose title contains this text
        #[arg(long, value_name = "TITLE")]
        only: Option<String>,

        /// Process tables in parallel
        #[arg(short, long)]
        parallel: bool,
    },

    /// Show detected units and normalized rows of one export
    Inspect {
        /// Export file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Parameter column to show (repeatable)
        #[arg(long = "param", value_name = "NAME")]
        params: Vec<String>,

        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Print the built-in configuration as JSON
    DefaultConfig,
}

impl ChartCommands {
    /// Execute the chart command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            ChartCommands::Render {
                config,
                root,
                only,
                parallel,
            } => commands::render(config.as_deref(), &root, only, parallel),
            ChartCommands::Inspect {
                file,
                params,
                delimiter,
            } => commands::inspect(&file, &params, delimiter),
            ChartCommands::DefaultConfig => commands::default_config(),
        }
    }
}
