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


//! Render command - charts for every configured benchmark

use crate::config::{PlotConfig, DEFAULT_CONFIG_FILE};
use crate::driver::{self, RenderOptions};
use crate::error::CliError;
use benchplot_svg::SvgRenderer;
use std::path::Path;
use tracing::info;

/// Renders every configured chart below `root`.
///
/// The configuration is read from `config` if given, else from
/// `<root>/benchplot.json` if present, else the built-in default is used.
///
/// # Errors
///
/// Fails on configuration errors and fatal pipeline errors, and with
/// [`CliError::TablesFailed`] after the run if any table failed.
///
/// # Examples
///
/// ```no_run
/// use benchplot_cli::commands::render;
/// use std::path::Path;
///
/// # fn main() -> Result<(), benchplot_cli::error::CliError> {
/// render(None, Path::new("BenchmarkResults"), None, true)?;
/// # Ok(())
/// # }
/// ```
pub fn render(
    config: Option<&Path>,
    root: &Path,
    only: Option<String>,
    parallel: bool,
) -> Result<(), CliError> {
    let config = match config {
        Some(path) => PlotConfig::load(path)?,
        None => {
            let candidate = root.join(DEFAULT_CONFIG_FILE);
            if candidate.exists() {
                PlotConfig::load(&candidate)?
            } else {
                info!("no {} under {}, using built-in configuration", DEFAULT_CONFIG_FILE, root.display());
                let config = PlotConfig::default();
                config.validate()?;
                config
            }
        }
    };

    let options = RenderOptions {
        root: root.to_path_buf(),
        only,
        parallel,
    };
    let summary = driver::run(&config, &options, &SvgRenderer::new())?;

    if summary.failed > 0 {
        return Err(CliError::TablesFailed {
            failed: summary.failed,
            total: summary.tables,
        });
    }
    Ok(())
}
