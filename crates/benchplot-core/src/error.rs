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

//! Error types for the chart pipeline.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, BenchplotError>;

/// Pipeline error types.
///
/// Parse failures inside individual cells and unmatched merge joins are not
/// errors: they are represented as missing values on the row.
///
/// # Examples
///
/// ```
/// use benchplot_core::BenchplotError;
///
/// let err = BenchplotError::UnresolvedBaseline {
///     parameter: "Quoted".to_string(),
///     filter: "Async=False".to_string(),
/// };
/// assert!(err.to_string().contains("Quoted"));
/// assert!(!err.is_skip());
/// ```
#[derive(Debug, Error)]
pub enum BenchplotError {
    /// No recognized timing column exists in the table.
    #[error("Missing required column in '{path}': no recognized timing column among [{columns}]")]
    MissingRequiredColumn {
        /// Table that failed to load.
        path: PathBuf,
        /// Headers that were present, comma separated.
        columns: String,
    },

    /// A configured parameter column is absent from the table.
    #[error("Missing parameter column '{column}' in '{path}'")]
    MissingParameterColumn {
        /// Table that failed to load.
        path: PathBuf,
        /// Parameter column name.
        column: String,
    },

    /// A filter references a parameter the table does not carry.
    #[error("Filter parameter '{parameter}' is not a column of the table")]
    UnknownFilterParameter {
        /// Parameter name used by the filter.
        parameter: String,
    },

    /// A parameter-dependent baseline has no value for the active filter.
    #[error("Could not resolve throughput baseline from parameter '{parameter}' for filter [{filter}]")]
    UnresolvedBaseline {
        /// Parameter the baseline is keyed on.
        parameter: String,
        /// Active filter, rendered as `name=value` pairs.
        filter: String,
    },

    /// A filter combination left no usable rows.
    #[error("No rows with a measured mean time match filter [{filter}]")]
    NoMatchingRows {
        /// Active filter, rendered as `name=value` pairs.
        filter: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration for '{parameter}': {reason}")]
    InvalidConfig {
        /// Configuration entry at fault.
        parameter: String,
        /// Why it was rejected.
        reason: String,
    },

    /// I/O failure while reading a table or writing a chart.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// Error from the underlying CSV reader.
    #[error("CSV library error: {0}")]
    Csv(#[from] csv::Error),

    /// The renderer could not produce the artifact.
    #[error("Render error for '{path}': {message}")]
    Render {
        /// Output path.
        path: PathBuf,
        /// Renderer message.
        message: String,
    },
}

impl BenchplotError {
    /// Builds an [`BenchplotError::Io`] from a path and an I/O error.
    pub fn io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Builds an [`BenchplotError::InvalidConfig`].
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for conditions reported as informational skips.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::NoMatchingRows { .. })
    }

    /// Returns true for errors that must stop the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedBaseline { .. } | Self::InvalidConfig { .. }
        )
    }
}
