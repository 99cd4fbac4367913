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

//! Unit detection from unit-tagged column headers.
//!
//! Benchmark exports encode the unit of a numeric column in its header,
//! e.g. `Mean [μs]` or `Allocated [kB]`. Timing values are converted to
//! seconds and memory values to bytes.

use crate::error::{BenchplotError, Result};
use std::path::Path;

const BYTES_PER_KB: f64 = 1024.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Physical unit a numeric column is encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Milliseconds.
    Milliseconds,
    /// Microseconds.
    Microseconds,
    /// Nanoseconds.
    Nanoseconds,
    /// Megabytes (1024 * 1024 bytes).
    Megabytes,
    /// Kilobytes (1024 bytes).
    Kilobytes,
    /// Bytes.
    Bytes,
}

impl Unit {
    /// Divisor that turns a raw value into the canonical unit.
    ///
    /// `canonical = raw / divisor`. Memory units have a fractional divisor
    /// because bytes are smaller than the encoded unit.
    pub fn divisor(self) -> f64 {
        match self {
            Unit::Milliseconds => 1_000.0,
            Unit::Microseconds => 1_000_000.0,
            Unit::Nanoseconds => 1_000_000_000.0,
            Unit::Megabytes => 1.0 / BYTES_PER_MB,
            Unit::Kilobytes => 1.0 / BYTES_PER_KB,
            Unit::Bytes => 1.0,
        }
    }

    /// Converts a raw value to seconds or bytes.
    pub fn to_canonical(self, raw: f64) -> f64 {
        raw / self.divisor()
    }

    /// Short unit symbol as it appears in headers.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Milliseconds => "ms",
            Unit::Microseconds => "μs",
            Unit::Nanoseconds => "ns",
            Unit::Megabytes => "MB",
            Unit::Kilobytes => "kB",
            Unit::Bytes => "B",
        }
    }
}

/// Header spellings for the mean timing column.
///
/// Both the Greek mu (U+03BC) and the micro sign (U+00B5) occur in the wild,
/// as does the ASCII fallback `us`.
const TIMING_HEADERS: &[(&str, Unit)] = &[
    ("Mean [ms]", Unit::Milliseconds),
    ("Mean [\u{03bc}s]", Unit::Microseconds),
    ("Mean [\u{00b5}s]", Unit::Microseconds),
    ("Mean [us]", Unit::Microseconds),
    ("Mean [ns]", Unit::Nanoseconds),
];

/// Header spellings for the allocated memory column.
const MEMORY_HEADERS: &[(&str, Unit)] = &[
    ("Allocated [MB]", Unit::Megabytes),
    ("Allocated [kB]", Unit::Kilobytes),
    ("Allocated [B]", Unit::Bytes),
];

/// A numeric column and the unit it is encoded in.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSpec {
    /// Header as it appears in the table.
    pub column: String,
    /// Unit the column is encoded in.
    pub unit: Unit,
}

impl UnitSpec {
    /// Divisor to the canonical unit.
    pub fn divisor(&self) -> f64 {
        self.unit.divisor()
    }
}

/// Timing and memory columns chosen for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUnits {
    /// Mean timing column (always present).
    pub timing: UnitSpec,
    /// Allocated memory column, if the export has one.
    pub memory: Option<UnitSpec>,
}

/// Picks the timing and memory columns from a table's headers.
///
/// A missing memory column is not an error; it means the table is a
/// candidate for the cross-dataset memory merge.
///
/// # Errors
///
/// Returns [`BenchplotError::MissingRequiredColumn`] naming `path` when no
/// recognized timing header is present.
///
/// # Examples
///
/// ```
/// use benchplot_core::units::{resolve_units, Unit};
///
/// let headers = ["Method", "Mean [ns]", "Allocated [kB]"];
/// let units = resolve_units(&headers, "report.csv").unwrap();
/// assert_eq!(units.timing.unit, Unit::Nanoseconds);
/// assert_eq!(units.memory.unwrap().unit, Unit::Kilobytes);
/// ```
pub fn resolve_units<S: AsRef<str>>(headers: &[S], path: impl AsRef<Path>) -> Result<ResolvedUnits> {
    let timing = find_column(headers, TIMING_HEADERS).ok_or_else(|| {
        BenchplotError::MissingRequiredColumn {
            path: path.as_ref().to_path_buf(),
            columns: headers
                .iter()
                .map(|h| h.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }
    })?;
    let memory = find_column(headers, MEMORY_HEADERS);

    Ok(ResolvedUnits { timing, memory })
}

fn find_column<S: AsRef<str>>(headers: &[S], known: &[(&str, Unit)]) -> Option<UnitSpec> {
    known.iter().find_map(|(name, unit)| {
        headers
            .iter()
            .any(|h| h.as_ref().trim() == *name)
            .then(|| UnitSpec {
                column: (*name).to_string(),
                unit: *unit,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_spellings() {
        let cases = [
            ("Mean [ms]", Unit::Milliseconds),
            ("Mean [μs]", Unit::Microseconds),
            ("Mean [µs]", Unit::Microseconds),
            ("Mean [us]", Unit::Microseconds),
            ("Mean [ns]", Unit::Nanoseconds),
        ];
        for (header, unit) in cases {
            let units = resolve_units(&["Method", header], "t.csv").unwrap();
            assert_eq!(units.timing.unit, unit, "header {header}");
            assert_eq!(units.timing.column, header);
            assert!(units.memory.is_none());
        }
    }

    #[test]
    fn test_micro_spellings_are_equivalent() {
        assert_eq!(Unit::Microseconds.to_canonical(24_387.6), 24_387.6 / 1_000_000.0);
        let greek = resolve_units(&["Mean [μs]"], "a.csv").unwrap();
        let micro = resolve_units(&["Mean [µs]"], "b.csv").unwrap();
        assert_eq!(greek.timing.divisor(), micro.timing.divisor());
    }

    #[test]
    fn test_memory_units_to_bytes() {
        assert_eq!(Unit::Megabytes.to_canonical(2.0), 2.0 * 1024.0 * 1024.0);
        assert_eq!(Unit::Kilobytes.to_canonical(3.5), 3.5 * 1024.0);
        assert_eq!(Unit::Bytes.to_canonical(17.0), 17.0);
    }

    #[test]
    fn test_missing_timing_column() {
        let err = resolve_units(&["Method", "Median", "Allocated [B]"], "AVX2/x.csv").unwrap_err();
        match err {
            BenchplotError::MissingRequiredColumn { path, columns } => {
                assert_eq!(path, Path::new("AVX2/x.csv"));
                assert!(columns.contains("Median"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_headers_are_trimmed() {
        let units = resolve_units(&[" Mean [ms] ", "Allocated [MB]"], "t.csv").unwrap();
        assert_eq!(units.timing.unit, Unit::Milliseconds);
        assert_eq!(units.memory.unwrap().unit, Unit::Megabytes);
    }
}
