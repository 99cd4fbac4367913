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


//! Run configuration.
//!
//! Configuration is a JSON document deserialized into [`PlotConfig`]. Any
//! field left out takes its default; `benchplot default-config` prints the
//! built-in configuration as a starting point.

use crate::error::CliError;
use benchplot_core::labels::LabelAlias;
use benchplot_core::{
    BenchplotError, Baseline, ChartSpec, Color, GroupingPolicy, LabelRules, LoadOptions,
    MethodAliases, Palette, ParameterFilter, ParameterSpec, PrefixRule, ThemeName,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Default configuration file name looked up under the root directory.
pub const DEFAULT_CONFIG_FILE: &str = "benchplot.json";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Directories, relative to the root, holding one run each.
    pub source_dirs: Vec<String>,
    /// Directory whose tables supply allocation data to the others.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_source: Option<String>,
    /// Second title line per source directory.
    #[serde(default)]
    pub subtitles: BTreeMap<String, String>,
    /// Themes to render.
    #[serde(default = "default_themes")]
    pub themes: Vec<ThemeName>,
    /// Palette shared by all charts.
    #[serde(default)]
    pub palette: Palette,
    /// Display label rules shared by all charts.
    #[serde(default)]
    pub labels: LabelRules,
    /// Method names collapsed when joining allocation data.
    #[serde(default)]
    pub method_aliases: BTreeMap<String, String>,
    /// Field delimiter of the exports.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Benchmark kinds to chart.
    pub benchmarks: Vec<BenchmarkKind>,
}

/// One benchmark export and how to chart it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkKind {
    /// Export file name inside each source directory.
    pub file: String,
    /// Chart title.
    pub title: String,
    /// Quantity divided by mean time.
    pub baseline: Baseline,
    /// Display unit label.
    pub unit: String,
    /// Throughput is divided by this for display.
    #[serde(default = "default_divisor")]
    pub divisor: f64,
    /// Decimal places of throughput annotations.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,
    /// Parameters charted by, in title and filename order.
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    /// Grouping policy.
    #[serde(default)]
    pub grouping: GroupingPolicy,
    /// Substring sets; a method containing every substring of one set is dropped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<Vec<String>>,
    /// Label aliases layered over the shared ones.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, LabelAlias>,
}

fn default_themes() -> Vec<ThemeName> {
    vec![ThemeName::Light, ThemeName::Dark]
}

fn default_delimiter() -> char {
    ','
}

fn default_divisor() -> f64 {
    1.0
}

fn default_decimal_places() -> usize {
    1
}

impl PlotConfig {
    /// Reads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// [`CliError::Io`] if the file cannot be read, [`CliError::Config`] if
    /// it is not valid configuration JSON, and [`BenchplotError::InvalidConfig`]
    /// (wrapped) if [`PlotConfig::validate`] rejects it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?;
        let config: PlotConfig =
            serde_json::from_str(&text).map_err(|e| CliError::config(path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty JSON form.
    pub fn to_json(&self) -> Result<String, CliError> {
        serde_json::to_string_pretty(self).map_err(|e| CliError::InvalidInput(e.to_string()))
    }

    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<(), BenchplotError> {
        if self.source_dirs.is_empty() {
            return Err(BenchplotError::invalid_config(
                "source_dirs",
                "at least one source directory is required",
            ));
        }
        if self.themes.is_empty() {
            return Err(BenchplotError::invalid_config("themes", "at least one theme is required"));
        }
        if !self.delimiter.is_ascii() {
            return Err(BenchplotError::invalid_config(
                "delimiter",
                format!("'{}' is not a single-byte character", self.delimiter),
            ));
        }
        for kind in &self.benchmarks {
            kind.validate()?;
        }
        Ok(())
    }

    /// Delimiter as a byte; [`PlotConfig::validate`] guarantees it is ASCII.
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }

    /// Alias set for the allocation merge.
    pub fn merge_aliases(&self) -> MethodAliases {
        self.method_aliases
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Subtitle configured for a source directory.
    pub fn subtitle(&self, dir: &str) -> Option<String> {
        self.subtitles.get(dir).cloned()
    }
}

impl BenchmarkKind {
    /// Checks the kind's own invariants.
    pub fn validate(&self) -> Result<(), BenchplotError> {
        let field = |name: &str| format!("{}.{}", self.title, name);

        if !(self.divisor.is_finite() && self.divisor > 0.0) {
            return Err(BenchplotError::invalid_config(
                field("divisor"),
                format!("must be a positive number, got {}", self.divisor),
            ));
        }

        let mut names = HashSet::new();
        for spec in &self.parameters {
            if spec.values.is_empty() {
                return Err(BenchplotError::invalid_config(
                    field(&spec.name),
                    "parameter lists no values",
                ));
            }
            if !names.insert(spec.name.as_str()) {
                return Err(BenchplotError::invalid_config(field(&spec.name), "parameter listed twice"));
            }
        }

        match &self.baseline {
            Baseline::Constant(v) if !(v.is_finite() && *v > 0.0) => {
                return Err(BenchplotError::invalid_config(
                    field("baseline"),
                    format!("must be a positive number, got {}", v),
                ));
            }
            Baseline::Constant(_) => {}
            Baseline::PerParameterValue { parameter, .. } => {
                if !names.contains(parameter.as_str()) {
                    return Err(BenchplotError::invalid_config(
                        field("baseline"),
                        format!("depends on '{}', which is not a charted parameter", parameter),
                    ));
                }
                for filter in self.filters() {
                    self.baseline.resolve(&filter).map_err(|_| {
                        BenchplotError::invalid_config(
                            field("baseline"),
                            format!("no value for [{}]", filter),
                        )
                    })?;
                }
            }
        }

        if let GroupingPolicy::CaseSensitivity { column } = &self.grouping {
            if column.trim().is_empty() {
                return Err(BenchplotError::invalid_config(field("grouping"), "column is empty"));
            }
        }

        let mut suffixes = HashSet::new();
        for filter in self.filters() {
            if !suffixes.insert(filter.file_suffix()) {
                return Err(BenchplotError::invalid_config(
                    field("parameters"),
                    format!("labels of [{}] repeat the file name of another combination", filter),
                ));
            }
        }

        Ok(())
    }

    /// Every filter combination, first parameter varying slowest.
    pub fn filters(&self) -> Vec<ParameterFilter> {
        ParameterFilter::combinations(&self.parameters)
    }

    /// Columns to load: the charted parameters plus the grouping column.
    pub fn load_options(&self, delimiter: u8) -> LoadOptions {
        let mut columns: Vec<String> = self.parameters.iter().map(|p| p.name.clone()).collect();
        if let Some(column) = self.grouping.column() {
            if !columns.iter().any(|c| c == column) {
                columns.push(column.to_string());
            }
        }
        LoadOptions {
            delimiter,
            parameter_columns: columns,
        }
    }

    /// Chart settings for this kind under the shared label rules.
    pub fn chart_spec(&self, labels: &LabelRules, subtitle: Option<String>) -> ChartSpec {
        ChartSpec::new(self.title.clone(), self.unit.clone(), self.baseline.clone())
            .with_divisor(self.divisor)
            .with_decimal_places(self.decimal_places)
            .with_subtitle(subtitle)
            .with_grouping(self.grouping.clone())
            .with_labels(labels.with_aliases(&self.aliases))
    }
}

fn sync_async() -> ParameterSpec {
    ParameterSpec::new("Async", &[("False", "Sync"), ("True", "Async")])
}

fn alias(label: &str, color: &str) -> LabelAlias {
    LabelAlias {
        label: label.to_string(),
        color: color.to_string(),
    }
}

fn flame_prefix(prefix: &str) -> PrefixRule {
    PrefixRule {
        prefix: prefix.to_string(),
        label_prefix: "FlameCsv ".to_string(),
        color: "FlameCsv".to_string(),
    }
}

impl Default for PlotConfig {
    /// The CSV library comparison charts.
    fn default() -> Self {
        let palette = [
            ("FlameCsv", Color::rgb(0xFF, 0x6B, 0x6B)),
            ("Sep", Color::rgb(0x4E, 0xCD, 0x72)),
            ("Sylvan", Color::rgb(0x45, 0xB7, 0xD1)),
            ("CsvHelper", Color::rgb(0xED, 0xFF, 0x7A)),
            ("RecordParser", Color::rgb(0xD8, 0x98, 0xD6)),
        ]
        .into_iter()
        .fold(Palette::default(), |p, (key, color)| p.with(key, color));

        let mut aliases = BTreeMap::new();
        for prefix in ["Flame_", "FlameCsv_"] {
            aliases.insert(format!("{prefix}SrcGen"), alias("FlameCsv SourceGen", "FlameCsv"));
            aliases.insert(format!("{prefix}Reflection"), alias("FlameCsv Reflection", "FlameCsv"));
        }
        let labels = LabelRules {
            aliases,
            prefixes: vec![flame_prefix("Flame_"), flame_prefix("FlameCsv_")],
            strip_suffixes: vec!["_Hardcoded".to_string()],
            ..LabelRules::default()
        };

        let subtitles = [
            ("AVX2", "AMD Ryzen 7 3700X"),
            ("ARM", "Apple M4 Max 16c"),
            ("Neon", "Apple M4 Max 16c"),
            ("AVX512", "AMD Ryzen 7 PRO 7840U"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let records = |file: &str, title: &str, baseline: Baseline, parameters: Vec<ParameterSpec>| BenchmarkKind {
            file: file.to_string(),
            title: title.to_string(),
            baseline,
            unit: "million records/s".to_string(),
            divisor: 1_000_000.0,
            decimal_places: 2,
            parameters,
            grouping: GroupingPolicy::Parallel,
            exclude: Vec::new(),
            aliases: BTreeMap::new(),
        };

        let mut read_objects = records(
            "FlameCsv.Benchmark.Comparisons.ReadObjects-report.csv",
            "Reading objects from CSV",
            Baseline::Constant(20_000.0),
            vec![sync_async()],
        );
        read_objects.exclude = vec![vec!["Sep".to_string(), "Hardcoded".to_string()]];
        read_objects
            .aliases
            .insert("FlameCsv".to_string(), alias("FlameCsv Reflection", "FlameCsv"));

        Self {
            source_dirs: vec!["AVX2".to_string(), "Neon".to_string()],
            memory_source: Some("Neon".to_string()),
            subtitles,
            themes: default_themes(),
            palette,
            labels,
            method_aliases: BTreeMap::from([("FlameCsv_Reflection".to_string(), "FlameCsv".to_string())]),
            delimiter: default_delimiter(),
            benchmarks: vec![
                records(
                    "FlameCsv.Benchmark.Comparisons.EnumerateBench-report.csv",
                    "Enumerating CSV fields",
                    Baseline::per_parameter("Quoted", [("False", 65_536.0), ("True", 100_000.0)]),
                    vec![
                        ParameterSpec::new("Quoted", &[("False", "Unquoted"), ("True", "Quoted")]),
                        sync_async(),
                    ],
                ),
                records(
                    "FlameCsv.Benchmark.Comparisons.WriteObjects-report.csv",
                    "Writing objects to CSV",
                    Baseline::Constant(20_000.0),
                    vec![sync_async()],
                ),
                records(
                    "FlameCsv.Benchmark.Comparisons.PeekFields-report.csv",
                    "Sum the value of one column",
                    Baseline::Constant(65_536.0),
                    Vec::new(),
                ),
                read_objects,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn kind(json: &str) -> BenchmarkKind {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_default_is_valid() {
        let config = PlotConfig::default();
        config.validate().unwrap();
        assert_eq!(config.benchmarks.len(), 4);
        assert_eq!(config.benchmarks[0].filters().len(), 4);
        assert_eq!(config.benchmarks[2].filters().len(), 1);
    }

    #[test]
    fn test_default_round_trips_through_json() {
        let config = PlotConfig::default();
        let json = config.to_json().unwrap();
        let parsed: PlotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_minimal_document_takes_defaults() {
        let config: PlotConfig = serde_json::from_str(
            r#"{
                "source_dirs": ["AVX2"],
                "benchmarks": [
                    {"file": "a.csv", "title": "A", "baseline": 100, "unit": "records/s"}
                ]
            }"#,
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.themes, vec![ThemeName::Light, ThemeName::Dark]);
        assert_eq!(config.delimiter_byte(), b',');
        assert_eq!(config.labels, LabelRules::default());
        let kind = &config.benchmarks[0];
        assert_eq!(kind.divisor, 1.0);
        assert_eq!(kind.decimal_places, 1);
        assert_eq!(kind.grouping, GroupingPolicy::Parallel);
    }

    #[test]
    fn test_baseline_with_two_keys_is_rejected() {
        let result: Result<BenchmarkKind, _> = serde_json::from_str(
            r#"{"file": "a.csv", "title": "A", "unit": "u",
                "baseline": {"Quoted": {"True": 1}, "Async": {"True": 2}}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_positive_divisor() {
        let k = kind(r#"{"file": "a.csv", "title": "A", "unit": "u", "baseline": 1, "divisor": 0}"#);
        assert!(k.validate().unwrap_err().is_fatal());
    }

    #[test]
    fn test_rejects_colliding_suffixes() {
        let k = kind(
            r#"{"file": "a.csv", "title": "A", "unit": "u", "baseline": 1,
                "parameters": [{"name": "Async", "values": [
                    {"value": "False", "label": "Mode"},
                    {"value": "True", "label": "mode"}
                ]}]}"#,
        );
        let err = k.validate().unwrap_err();
        assert!(err.to_string().contains("A.parameters"));
    }

    #[test]
    fn test_rejects_baseline_on_uncharted_parameter() {
        let k = kind(
            r#"{"file": "a.csv", "title": "A", "unit": "u",
                "baseline": {"Quoted": {"True": 1, "False": 2}}}"#,
        );
        assert!(k.validate().is_err());
    }

    #[test]
    fn test_rejects_baseline_missing_a_value() {
        let k = kind(
            r#"{"file": "a.csv", "title": "A", "unit": "u",
                "baseline": {"Quoted": {"True": 1}},
                "parameters": [{"name": "Quoted", "values": [
                    {"value": "True", "label": "Quoted"},
                    {"value": "False", "label": "Unquoted"}
                ]}]}"#,
        );
        let err = k.validate().unwrap_err();
        assert!(err.to_string().contains("Quoted=False"));
    }

    #[test]
    fn test_rejects_bad_palette_color() {
        let result: Result<PlotConfig, _> = serde_json::from_str(
            r##"{"source_dirs": ["A"], "benchmarks": [], "palette": {"colors": {"Sep": "#12"}}}"##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_themes_and_dirs() {
        let mut config = PlotConfig::default();
        config.themes.clear();
        assert!(config.validate().is_err());

        let mut config = PlotConfig::default();
        config.source_dirs.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_options_include_grouping_column() {
        let k = kind(
            r#"{"file": "Parse.csv", "title": "Parse", "unit": "u", "baseline": 1,
                "parameters": [{"name": "Bytes", "values": [{"value": "True", "label": "UTF8"}]}],
                "grouping": {"mode": "case_sensitivity", "column": "IgnoreCase"}}"#,
        );
        let options = k.load_options(b';');
        assert_eq!(options.delimiter, b';');
        assert_eq!(options.parameter_columns, vec!["Bytes".to_string(), "IgnoreCase".to_string()]);
    }

    #[test]
    fn test_chart_spec_layers_kind_aliases() {
        let config = PlotConfig::default();
        let read = &config.benchmarks[3];
        let spec = read.chart_spec(&config.labels, config.subtitle("AVX2"));
        assert_eq!(spec.labels.resolve("FlameCsv").label, "FlameCsv Reflection");
        assert_eq!(spec.labels.resolve("Flame_SrcGen").label, "FlameCsv SourceGen");
        assert_eq!(spec.labels.resolve("Sylvan_Hardcoded").label, "Sylvan");
        assert_eq!(spec.subtitle.as_deref(), Some("AMD Ryzen 7 3700X"));

        let write = &config.benchmarks[1];
        let spec = write.chart_spec(&config.labels, None);
        assert_eq!(spec.labels.resolve("FlameCsv").label, "FlameCsv");
    }

    #[test]
    fn test_load_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = PlotConfig::load(&path).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
        assert!(err.to_string().contains("bad.json"));

        let missing = PlotConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, CliError::Io { .. }));
    }
}
