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

//! Forgiving numeric cell parser.

use crate::units::Unit;

/// Sentinel used by exports for "not available".
pub const NA_SENTINEL: &str = "NA";

/// Parses a raw measurement cell.
///
/// Wrapping quotes and thousands separators are removed before conversion,
/// so `"24,387.6"` reads as `24387.6`. Empty cells, the `NA` sentinel,
/// non-numeric text and non-finite results all yield `None`; this never
/// fails.
///
/// # Examples
///
/// ```
/// use benchplot_core::parse::parse_measurement;
///
/// assert_eq!(parse_measurement("\"24,387.6\""), Some(24387.6));
/// assert_eq!(parse_measurement("NA"), None);
/// assert_eq!(parse_measurement("n/a ms"), None);
/// ```
pub fn parse_measurement(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_matches('"').trim();
    if trimmed.is_empty() || trimmed == NA_SENTINEL {
        return None;
    }

    let cleaned: String = trimmed.chars().filter(|&c| c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a cell and converts it to the canonical unit.
pub fn parse_in_unit(raw: &str, unit: Unit) -> Option<f64> {
    parse_measurement(raw).map(|v| unit.to_canonical(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_measurement("10"), Some(10.0));
        assert_eq!(parse_measurement(" 3.25 "), Some(3.25));
        assert_eq!(parse_measurement("-1.5"), Some(-1.5));
        assert_eq!(parse_measurement("1e3"), Some(1000.0));
    }

    #[test]
    fn test_thousands_separators_and_quotes() {
        assert_eq!(parse_measurement("1,234,567.25"), Some(1_234_567.25));
        assert_eq!(parse_measurement("\"1,024\""), Some(1024.0));
        assert_eq!(parse_measurement("\"7\""), Some(7.0));
    }

    #[test]
    fn test_missing_markers() {
        assert_eq!(parse_measurement(""), None);
        assert_eq!(parse_measurement("   "), None);
        assert_eq!(parse_measurement("NA"), None);
        assert_eq!(parse_measurement("\"NA\""), None);
        assert_eq!(parse_measurement("-"), None);
        assert_eq!(parse_measurement("?"), None);
        assert_eq!(parse_measurement("12.3 ms"), None);
        assert_eq!(parse_measurement("NaN"), None);
        assert_eq!(parse_measurement("inf"), None);
    }

    #[test]
    fn test_parse_in_unit() {
        assert_eq!(parse_in_unit("10", Unit::Milliseconds), Some(10.0 / 1_000.0));
        assert_eq!(parse_in_unit("2", Unit::Kilobytes), Some(2048.0));
        assert_eq!(parse_in_unit("NA", Unit::Nanoseconds), None);
    }

    proptest! {
        #[test]
        fn prop_idempotent_on_canonical_floats(v in -1.0e12f64..1.0e12) {
            let first = parse_measurement(&v.to_string()).unwrap();
            prop_assert_eq!(first, v);
            prop_assert_eq!(parse_measurement(&first.to_string()), Some(first));
        }

        #[test]
        fn prop_never_panics(s in ".{0,32}") {
            let _ = parse_measurement(&s);
        }

        #[test]
        fn prop_alphabetic_garbage_is_missing(s in "[g-zG-Z]{1,12}") {
            prop_assume!(!s.eq_ignore_ascii_case("inf") && !s.eq_ignore_ascii_case("infinity")
                && !s.eq_ignore_ascii_case("nan"));
            prop_assert_eq!(parse_measurement(&s), None);
        }

        #[test]
        fn prop_unit_conversion_matches_divisor(v in 0.0f64..1.0e9, idx in 0usize..6) {
            let unit = [
                Unit::Milliseconds,
                Unit::Microseconds,
                Unit::Nanoseconds,
                Unit::Megabytes,
                Unit::Kilobytes,
                Unit::Bytes,
            ][idx];
            prop_assert_eq!(parse_in_unit(&v.to_string(), unit), Some(v / unit.divisor()));
        }
    }
}
