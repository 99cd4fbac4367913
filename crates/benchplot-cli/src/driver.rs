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


//! Outer render loop over source directories and benchmark kinds.
//!
//! Every `(source directory, benchmark kind)` pair is an independent job:
//! load the export, drop excluded methods, back-fill allocations from the
//! memory source, then build and render one chart per filter combination
//! and theme. Jobs run serially by default or on the rayon pool.
//!
//! Error handling per job:
//!
//! - a missing export is logged and skipped;
//! - a combination without measured rows is logged and skipped;
//! - table-level failures (missing columns, I/O, malformed CSV) are logged,
//!   counted and do not stop the other jobs;
//! - fatal errors (baseline resolution, configuration) abort the run.

use crate::config::{BenchmarkKind, PlotConfig};
use crate::error::CliError;
use benchplot_core::chart::output_path;
use benchplot_core::{build_chart, load_table, merge_memory, BenchplotError, ChartRenderer};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

/// Options of one render run.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Directory the configured source directories are relative to.
    pub root: PathBuf,
    /// Only kinds whose title contains this text (case-insensitive).
    pub only: Option<String>,
    /// Run jobs on the rayon thread pool.
    pub parallel: bool,
}

/// Counters of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Jobs whose export was found.
    pub tables: usize,
    /// Jobs that failed.
    pub failed: usize,
    /// Jobs skipped because the export does not exist.
    pub missing: usize,
    /// Files written.
    pub charts: usize,
    /// Filter combinations without measured rows.
    pub skipped: usize,
}

impl RunSummary {
    fn add(&mut self, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Missing => self.missing += 1,
            JobOutcome::Rendered { charts, skipped } => {
                self.tables += 1;
                self.charts += charts;
                self.skipped += skipped;
            }
        }
    }
}

#[derive(Debug)]
struct Job<'a> {
    dir: &'a str,
    kind: &'a BenchmarkKind,
}

#[derive(Debug)]
enum JobOutcome {
    Missing,
    Rendered { charts: usize, skipped: usize },
}

/// Runs every job of `config`.
///
/// # Errors
///
/// Returns the first fatal error. No job starts after it; with
/// `parallel`, jobs already running on other threads still finish.
/// Table-level failures are only counted in [`RunSummary::failed`];
/// callers decide how to report them.
pub fn run<'a>(
    config: &'a PlotConfig,
    options: &RenderOptions,
    renderer: &dyn ChartRenderer,
) -> Result<RunSummary, CliError> {
    let only = options.only.as_ref().map(|s| s.to_lowercase());
    let jobs: Vec<Job<'a>> = config
        .source_dirs
        .iter()
        .flat_map(|dir| {
            config
                .benchmarks
                .iter()
                .filter(|kind| {
                    only.as_ref()
                        .map_or(true, |needle| kind.title.to_lowercase().contains(needle))
                })
                .map(move |kind| Job { dir, kind })
        })
        .collect();

    info!(jobs = jobs.len(), parallel = options.parallel, "starting render run");

    // Set by the first fatal error; jobs not yet started are dropped.
    let aborted = AtomicBool::new(false);
    let execute = |job: Job<'a>| -> Option<(Job<'a>, Result<JobOutcome, BenchplotError>)> {
        if aborted.load(Ordering::Relaxed) {
            return None;
        }
        let result = run_job(config, &options.root, &job, renderer);
        if matches!(&result, Err(e) if e.is_fatal()) {
            aborted.store(true, Ordering::Relaxed);
        }
        Some((job, result))
    };

    let results: Vec<_> = if options.parallel {
        jobs.into_par_iter().map(execute).collect()
    } else {
        jobs.into_iter().map(execute).collect()
    };

    let mut summary = RunSummary::default();
    for (job, result) in results.into_iter().flatten() {
        match result {
            Ok(outcome) => summary.add(&outcome),
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                error!(dir = job.dir, file = %job.kind.file, "{}", e);
                summary.tables += 1;
                summary.failed += 1;
            }
        }
    }

    info!(
        tables = summary.tables,
        charts = summary.charts,
        failed = summary.failed,
        missing = summary.missing,
        skipped = summary.skipped,
        "render run finished"
    );
    Ok(summary)
}

fn run_job(
    config: &PlotConfig,
    root: &Path,
    job: &Job<'_>,
    renderer: &dyn ChartRenderer,
) -> Result<JobOutcome, BenchplotError> {
    let kind = job.kind;
    let path = root.join(job.dir).join(&kind.file);
    if !path.exists() {
        info!(path = %path.display(), "skipping, file not found");
        return Ok(JobOutcome::Missing);
    }

    let load = kind.load_options(config.delimiter_byte());
    let mut table = load_table(&path, &load)?;
    let excluded = table.exclude_methods(&kind.exclude);
    if excluded > 0 {
        debug!(path = %path.display(), excluded, "excluded methods");
    }

    if let Some(memory_dir) = config.memory_source.as_deref() {
        let memory_path = root.join(memory_dir).join(&kind.file);
        if memory_dir != job.dir && memory_path.exists() {
            let mut secondary = load_table(&memory_path, &load)?;
            secondary.exclude_methods(&kind.exclude);
            merge_memory(&mut table, &secondary, &config.merge_aliases());
        }
    }

    let spec = kind.chart_spec(&config.labels, config.subtitle(job.dir));
    let mut charts = 0;
    let mut skipped = 0;
    for filter in kind.filters() {
        let chart = match build_chart(&table, &filter, &spec) {
            Ok(chart) => chart,
            Err(e) if e.is_skip() => {
                info!(path = %path.display(), filter = %filter, "skipping, no matching rows");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        for theme in &config.themes {
            let out = output_path(&path, &kind.title, &filter, *theme, renderer.extension());
            renderer.render(&chart, &theme.theme(), &config.palette, &out)?;
            info!(path = %out.display(), "saved chart");
            charts += 1;
        }
    }

    Ok(JobOutcome::Rendered { charts, skipped })
}
