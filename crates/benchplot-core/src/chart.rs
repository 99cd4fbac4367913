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

//! Renderable chart model and the renderer contract.
//!
//! Entries are ordered bottom-to-top: index 0 is the lowest bar.

use crate::error::Result;
use crate::filter::{slugify, ParameterFilter};
use crate::style::{Palette, Theme, ThemeName};
use std::path::{Path, PathBuf};

const BYTES_PER_KB: f64 = 1024.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Fill pattern drawn over a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hatch {
    /// Small circles; marks parallel variants.
    Dots,
    /// Diagonal lines; marks ignore-case variants.
    Diagonal,
}

/// One renderable bar, or a zero-height separator between groups.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    /// Axis label; for separators, the caption of the group below.
    pub display_label: String,
    /// Bar length in display units (0 for separators).
    pub throughput: f64,
    /// Palette key.
    pub color_key: String,
    /// Whether the row is a parallel variant.
    pub is_parallel_variant: bool,
    /// Optional fill pattern.
    pub hatch: Option<Hatch>,
    /// Allocation in bytes, if known.
    pub allocated_bytes: Option<f64>,
    /// Formatted allocation, if known.
    pub allocated_display: Option<String>,
    /// Set on the entry (or near-equal entries) with the smallest allocation.
    pub is_min_allocation: bool,
    /// Spacer rather than a measurement.
    pub is_separator: bool,
}

impl ChartEntry {
    /// Creates a measurement entry.
    pub fn bar(display_label: impl Into<String>, throughput: f64, color_key: impl Into<String>) -> Self {
        Self {
            display_label: display_label.into(),
            throughput,
            color_key: color_key.into(),
            is_parallel_variant: false,
            hatch: None,
            allocated_bytes: None,
            allocated_display: None,
            is_min_allocation: false,
            is_separator: false,
        }
    }

    /// Creates a separator with a caption for the group below it.
    pub fn separator(caption: impl Into<String>) -> Self {
        Self {
            display_label: caption.into(),
            throughput: 0.0,
            color_key: String::new(),
            is_parallel_variant: false,
            hatch: None,
            allocated_bytes: None,
            allocated_display: None,
            is_min_allocation: false,
            is_separator: true,
        }
    }

    /// Attaches an allocation and its formatted text.
    pub fn with_allocation(mut self, bytes: Option<f64>) -> Self {
        self.allocated_bytes = bytes;
        self.allocated_display = bytes.map(format_allocation);
        self
    }
}

/// Everything a renderer needs for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Title including parameter labels.
    pub title: String,
    /// Optional second title line.
    pub subtitle: Option<String>,
    /// Throughput unit label, e.g. `million records/s`.
    pub unit: String,
    /// Decimal places for throughput annotations.
    pub decimal_places: usize,
    /// Entries bottom-to-top.
    pub entries: Vec<ChartEntry>,
}

impl Chart {
    /// X axis caption.
    pub fn axis_label(&self) -> String {
        format!("Throughput ({})", self.unit)
    }

    /// Formats a throughput value with the chart's precision.
    pub fn format_throughput(&self, value: f64) -> String {
        format!("{:.*}", self.decimal_places, value)
    }

    /// Largest bar length, 0 when there are no bars.
    pub fn max_throughput(&self) -> f64 {
        self.bars().map(|e| e.throughput).fold(0.0, f64::max)
    }

    /// Non-separator entries.
    pub fn bars(&self) -> impl Iterator<Item = &ChartEntry> {
        self.entries.iter().filter(|e| !e.is_separator)
    }
}

/// Drawing backend for charts.
///
/// Implementations must draw one horizontal bar per non-separator entry,
/// render separators as a dashed divider with their caption, annotate each
/// bar with its formatted throughput past the bar end, and annotate known
/// allocations in a fixed column right of the plot, emphasizing entries
/// flagged [`ChartEntry::is_min_allocation`].
pub trait ChartRenderer: Send + Sync {
    /// File extension of produced artifacts, without the dot.
    fn extension(&self) -> &str;

    /// Draws `chart` and writes it to `path`.
    fn render(&self, chart: &Chart, theme: &Theme, palette: &Palette, path: &Path) -> Result<()>;
}

/// Formats an allocation with an adaptive unit.
///
/// MB when at least one megabyte, KB when at least one kilobyte, bytes
/// otherwise.
///
/// # Examples
///
/// ```
/// use benchplot_core::chart::format_allocation;
///
/// assert_eq!(format_allocation(3.5 * 1024.0 * 1024.0), "3.5 MB");
/// assert_eq!(format_allocation(2048.0), "2 KB");
/// assert_eq!(format_allocation(312.0), "312 B");
/// ```
pub fn format_allocation(bytes: f64) -> String {
    let mb = bytes / BYTES_PER_MB;
    if mb >= 1.0 {
        format!("{:.1} MB", mb)
    } else if bytes / BYTES_PER_KB >= 1.0 {
        format!("{:.0} KB", bytes / BYTES_PER_KB)
    } else {
        format!("{:.0} B", bytes)
    }
}

/// Near-equality used for minimum highlighting.
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 + 1e-5 * b.abs()
}

/// Flags the entries with the smallest known allocation.
///
/// Separators and entries without allocation data are never flagged.
pub fn highlight_min_allocation(entries: &mut [ChartEntry]) {
    let min = entries
        .iter()
        .filter(|e| !e.is_separator)
        .filter_map(|e| e.allocated_bytes)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.min(v))));

    for entry in entries.iter_mut() {
        entry.is_min_allocation = match (min, entry.allocated_bytes) {
            (Some(min), Some(bytes)) if !entry.is_separator => is_close(bytes, min),
            _ => false,
        };
    }
}

/// File name for one chart: `<title>_<labels>_<theme>.<ext>`.
///
/// The label segment is omitted when the filter is empty.
pub fn output_file_name(title: &str, filter: &ParameterFilter, theme: ThemeName, extension: &str) -> String {
    let suffix = filter.file_suffix();
    let mut parts = vec![slugify(title)];
    if !suffix.is_empty() {
        parts.push(suffix);
    }
    parts.push(theme.as_str().to_string());
    format!("{}.{}", parts.join("_"), extension)
}

/// Output path next to the input table.
pub fn output_path(
    input: &Path,
    title: &str,
    filter: &ParameterFilter,
    theme: ThemeName,
    extension: &str,
) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join(output_file_name(title, filter, theme, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_allocation_boundaries() {
        assert_eq!(format_allocation(1024.0 * 1024.0), "1.0 MB");
        assert_eq!(format_allocation(1024.0 * 1024.0 - 1.0), "1024 KB");
        assert_eq!(format_allocation(1024.0), "1 KB");
        assert_eq!(format_allocation(1023.0), "1023 B");
        assert_eq!(format_allocation(0.0), "0 B");
    }

    #[test]
    fn test_highlight_minimum() {
        let mut entries = vec![
            ChartEntry::bar("A", 1.0, "A").with_allocation(Some(4096.0)),
            ChartEntry::separator("Parallel"),
            ChartEntry::bar("B", 2.0, "B").with_allocation(Some(1024.0)),
            ChartEntry::bar("C", 3.0, "C").with_allocation(None),
        ];
        highlight_min_allocation(&mut entries);
        let flags: Vec<_> = entries.iter().map(|e| e.is_min_allocation).collect();
        assert_eq!(flags, vec![false, false, true, false]);
    }

    #[test]
    fn test_highlight_ties() {
        let mut entries = vec![
            ChartEntry::bar("A", 1.0, "A").with_allocation(Some(1024.0)),
            ChartEntry::bar("B", 2.0, "B").with_allocation(Some(1024.0 + 1e-9)),
            ChartEntry::bar("C", 2.0, "C").with_allocation(Some(2048.0)),
        ];
        highlight_min_allocation(&mut entries);
        assert!(entries[0].is_min_allocation);
        assert!(entries[1].is_min_allocation);
        assert!(!entries[2].is_min_allocation);
    }

    #[test]
    fn test_highlight_without_memory() {
        let mut entries = vec![ChartEntry::bar("A", 1.0, "A")];
        highlight_min_allocation(&mut entries);
        assert!(!entries[0].is_min_allocation);
    }

    #[test]
    fn test_output_names() {
        let filter = ParameterFilter::new()
            .with("Quoted", "True", "Quoted")
            .with("Async", "False", "Sync");
        assert_eq!(
            output_file_name("Enumerating CSV fields", &filter, ThemeName::Dark, "svg"),
            "enumerating_csv_fields_quoted_sync_dark.svg"
        );
        assert_eq!(
            output_file_name("Sum the value of one column", &ParameterFilter::new(), ThemeName::Light, "svg"),
            "sum_the_value_of_one_column_light.svg"
        );

        let path = output_path(
            Path::new("AVX2/report.csv"),
            "Writing objects",
            &ParameterFilter::new().with("Async", "True", "Async"),
            ThemeName::Light,
            "svg",
        );
        assert_eq!(path, PathBuf::from("AVX2/writing_objects_async_light.svg"));
    }

    #[test]
    fn test_chart_helpers() {
        let chart = Chart {
            title: "T".to_string(),
            subtitle: None,
            unit: "MB/s".to_string(),
            decimal_places: 2,
            entries: vec![
                ChartEntry::bar("A", 1.5, "A"),
                ChartEntry::separator("Parallel"),
                ChartEntry::bar("B", 4.25, "B"),
            ],
        };
        assert_eq!(chart.axis_label(), "Throughput (MB/s)");
        assert_eq!(chart.format_throughput(4.256), "4.26");
        assert_eq!(chart.max_throughput(), 4.25);
        assert_eq!(chart.bars().count(), 2);
    }

    proptest! {
        #[test]
        fn prop_flagged_entries_are_minimal(allocs in prop::collection::vec(prop::option::of(0.0f64..1e9), 1..16)) {
            let mut entries: Vec<_> = allocs
                .iter()
                .enumerate()
                .map(|(i, a)| ChartEntry::bar(format!("M{i}"), 1.0, "M").with_allocation(*a))
                .collect();
            highlight_min_allocation(&mut entries);

            let known: Vec<f64> = allocs.iter().flatten().copied().collect();
            let flagged: Vec<&ChartEntry> = entries.iter().filter(|e| e.is_min_allocation).collect();
            prop_assert_eq!(flagged.is_empty(), known.is_empty());
            for entry in flagged {
                let bytes = entry.allocated_bytes.unwrap();
                for other in &known {
                    prop_assert!(bytes <= *other || is_close(bytes, *other));
                }
            }
        }
    }
}
