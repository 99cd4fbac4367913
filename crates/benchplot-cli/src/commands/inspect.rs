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


//! Inspect command - unit detection and normalized rows of one export

use crate::error::CliError;
use benchplot_core::chart::format_allocation;
use benchplot_core::{load_table, BenchmarkRow, LoadOptions};
use colored::Colorize;
use std::path::Path;

/// Prints the detected units and the normalized rows of an export.
///
/// # Arguments
///
/// * `file` - Export to read
/// * `params` - Parameter columns to carry on each row
/// * `delimiter` - Field delimiter, must be ASCII
///
/// # Errors
///
/// Returns `Err` if the delimiter is not ASCII or the export cannot be
/// loaded (unreadable file, no recognized timing column, missing parameter
/// column).
///
/// # Examples
///
/// ```no_run
/// use benchplot_cli::commands::inspect;
/// use std::path::Path;
///
/// # fn main() -> Result<(), benchplot_cli::error::CliError> {
/// inspect(Path::new("AVX2/ReadObjects-report.csv"), &["Async".to_string()], ',')?;
/// # Ok(())
/// # }
/// ```
pub fn inspect(file: &Path, params: &[String], delimiter: char) -> Result<(), CliError> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| CliError::InvalidInput(format!("delimiter '{}' is not ASCII", delimiter)))?;
    let options = LoadOptions {
        delimiter,
        parameter_columns: params.to_vec(),
    };
    let table = load_table(file, &options)?;

    println!("{}", "Benchmark Table".bold().underline());
    println!();
    println!("{}  {}", "Source:".cyan(), file.display());
    if let Some(units) = table.units() {
        println!(
            "{}  {} ({})",
            "Timing:".cyan(),
            units.timing.column,
            units.timing.unit.symbol()
        );
        match &units.memory {
            Some(memory) => println!("{}  {} ({})", "Memory:".cyan(), memory.column, memory.unit.symbol()),
            None => println!("{}  {}", "Memory:".cyan(), "none".dimmed()),
        }
    }
    if !params.is_empty() {
        println!("{}  [{}]", "Parameters:".cyan(), params.join(", "));
    }
    println!(
        "{}  {} ({} without allocation data)",
        "Rows:".cyan(),
        table.len(),
        table.missing_memory()
    );

    println!();
    for row in table.rows() {
        print_row(row);
    }

    Ok(())
}

fn print_row(row: &BenchmarkRow) {
    let params = row
        .parameters
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ");
    let mean = row
        .mean_seconds
        .map(|s| format!("{:.4} ms", s * 1000.0))
        .unwrap_or_else(|| "NA".to_string());
    let alloc = row
        .allocated_bytes
        .map(format_allocation)
        .unwrap_or_else(|| "NA".to_string());

    if params.is_empty() {
        println!("  {}  mean={}  allocated={}", row.method.green(), mean, alloc);
    } else {
        println!(
            "  {} [{}]  mean={}  allocated={}",
            row.method.green(),
            params,
            mean,
            alloc
        );
    }
}
