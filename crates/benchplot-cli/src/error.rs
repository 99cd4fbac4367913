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


//! Error type of the command-line interface.

use benchplot_core::BenchplotError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by `benchplot` commands.
///
/// # Examples
///
/// ```rust,no_run
/// use benchplot_cli::error::CliError;
///
/// fn read(path: &str) -> Result<String, CliError> {
///     std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug)]
pub enum CliError {
    /// The configuration file could not be parsed.
    #[error("Invalid configuration file '{path}': {message}")]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Error from the chart pipeline.
    #[error(transparent)]
    Core(#[from] BenchplotError),

    /// I/O failure outside the pipeline (config reads, stdout).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// Some charts could not be produced; details were logged.
    #[error("{failed} of {total} benchmark tables failed")]
    TablesFailed {
        /// Tables that failed.
        failed: usize,
        /// Tables attempted.
        total: usize,
    },

    /// Invalid command-line input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Creates an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a configuration parse error.
    pub fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
