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


//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn benchplot_cmd() -> Command {
    Command::cargo_bin("benchplot").expect("Failed to find benchplot binary")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).expect("Failed to create directory");
    fs::write(path, content).expect("Failed to write file");
}

const CONFIG: &str = r##"{
    "source_dirs": ["AVX2", "Neon"],
    "memory_source": "Neon",
    "subtitles": {"AVX2": "AMD Ryzen 7 3700X", "Neon": "Apple M4 Max 16c"},
    "palette": {"colors": {"Sep": "#4ECD72", "CsvHelper": "#EDFF7A"}},
    "benchmarks": [{
        "file": "ReadObjects-report.csv",
        "title": "Reading objects from CSV",
        "baseline": 20000,
        "unit": "million records/s",
        "divisor": 1000000,
        "decimal_places": 2,
        "parameters": [{"name": "Async", "values": [
            {"value": "False", "label": "Sync"},
            {"value": "True", "label": "Async"}
        ]}]
    }]
}"##;

const AVX2_EXPORT: &str = "\
Method,Async,Mean [ms],Error
_Sep,False,\"1,200.5\",3.1
_Sep_Parallel,False,400.0,1.0
_CsvHelper,False,2400,2.0
_Sep,True,1300,2.0
";

const NEON_EXPORT: &str = "\
Method,Async,Mean [μs],Allocated [kB]
_Sep,False,900000,512
_Sep_Parallel,False,300000,2048
_CsvHelper,False,1800000,\"4,096\"
_Sep,True,NA,NA
";

fn fixture() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(dir.path(), "benchplot.json", CONFIG);
    write(dir.path(), "AVX2/ReadObjects-report.csv", AVX2_EXPORT);
    write(dir.path(), "Neon/ReadObjects-report.csv", NEON_EXPORT);
    dir
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    benchplot_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("benchplot - Benchmark throughput charts"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_version_output() {
    benchplot_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("benchplot"));
}

#[test]
fn test_no_subcommand_fails() {
    benchplot_cmd().assert().failure();
}

// ===== Render Command Tests =====

#[test]
fn test_render_writes_charts_for_every_combination_and_theme() {
    let dir = fixture();

    benchplot_cmd()
        .arg("render")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success();

    for source in ["AVX2", "Neon"] {
        for theme in ["light", "dark"] {
            let sync = dir
                .path()
                .join(source)
                .join(format!("reading_objects_from_csv_sync_{theme}.svg"));
            assert!(sync.exists(), "missing {}", sync.display());
        }
    }

    // Only AVX2 has a measured Async=True row.
    assert!(dir.path().join("AVX2/reading_objects_from_csv_async_light.svg").exists());
    assert!(!dir.path().join("Neon/reading_objects_from_csv_async_light.svg").exists());

    let svg = fs::read_to_string(dir.path().join("AVX2/reading_objects_from_csv_sync_light.svg")).unwrap();
    assert!(svg.contains("Reading objects from CSV (Sync)"));
    assert!(svg.contains("AMD Ryzen 7 3700X"));
    assert!(svg.contains("Throughput (million records/s)"));
    // Allocations back-filled from the Neon run.
    assert!(svg.contains(">512 KB</text>"));
    assert!(svg.contains(">4.0 MB</text>"));
    assert!(svg.contains(">Parallel</text>"));
    // Palette colors come from the configuration file.
    assert!(svg.to_lowercase().contains("#4ecd72"));
    // 20000 / 0.4 s / 1e6
    assert!(svg.contains(">0.05</text>"));
}

#[test]
fn test_render_parallel_matches_serial_outputs() {
    let dir = fixture();

    benchplot_cmd()
        .args(["render", "--parallel", "--root"])
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("AVX2/reading_objects_from_csv_sync_dark.svg").exists());
    assert!(dir.path().join("Neon/reading_objects_from_csv_sync_dark.svg").exists());
}

#[test]
fn test_render_with_explicit_config() {
    let dir = fixture();
    let config = dir.path().join("custom.json");
    fs::write(&config, CONFIG.replace("\"Neon\"]", "\"Neon\"], \"themes\": [\"dark\"]")).unwrap();

    benchplot_cmd()
        .arg("render")
        .arg("--config")
        .arg(&config)
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("AVX2/reading_objects_from_csv_sync_dark.svg").exists());
    assert!(!dir.path().join("AVX2/reading_objects_from_csv_sync_light.svg").exists());
}

#[test]
fn test_render_only_filter() {
    let dir = fixture();

    benchplot_cmd()
        .args(["render", "--only", "writing", "--root"])
        .arg(dir.path())
        .assert()
        .success();

    assert!(!dir.path().join("AVX2/reading_objects_from_csv_sync_light.svg").exists());
}

#[test]
fn test_render_failure_still_renders_other_tables() {
    let dir = fixture();
    write(dir.path(), "AVX2/ReadObjects-report.csv", "Method,Async,Mean [s]\n_Sep,False,1\n");

    benchplot_cmd()
        .arg("render")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 benchmark tables failed"));

    assert!(dir.path().join("Neon/reading_objects_from_csv_sync_light.svg").exists());
}

#[test]
fn test_render_rejects_invalid_config() {
    let dir = fixture();
    write(dir.path(), "benchplot.json", &CONFIG.replace("\"divisor\": 1000000", "\"divisor\": 0"));

    benchplot_cmd()
        .arg("render")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("divisor"));
}

#[test]
fn test_render_rejects_malformed_config() {
    let dir = fixture();
    write(dir.path(), "benchplot.json", "{ \"source_dirs\": ");

    benchplot_cmd()
        .arg("render")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration file"));
}

#[test]
fn test_render_without_inputs_uses_builtin_config() {
    let dir = TempDir::new().unwrap();

    benchplot_cmd()
        .arg("render")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success();
}

// ===== Inspect Command Tests =====

#[test]
fn test_inspect_reports_units_and_rows() {
    let dir = fixture();

    benchplot_cmd()
        .arg("inspect")
        .arg(dir.path().join("Neon/ReadObjects-report.csv"))
        .args(["--param", "Async"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mean [μs]"))
        .stdout(predicate::str::contains("Allocated [kB]"))
        .stdout(predicate::str::contains("Sep_Parallel"))
        .stdout(predicate::str::contains("Async=False"))
        .stdout(predicate::str::contains("4.0 MB"))
        .stdout(predicate::str::contains("900.0000 ms"));
}

#[test]
fn test_inspect_missing_timing_column() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.csv", "Method,Median\nA,1\n");

    benchplot_cmd()
        .arg("inspect")
        .arg(dir.path().join("bad.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column"));
}

#[test]
fn test_inspect_missing_parameter_column() {
    let dir = fixture();

    benchplot_cmd()
        .arg("inspect")
        .arg(dir.path().join("AVX2/ReadObjects-report.csv"))
        .args(["--param", "Quoted"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing parameter column 'Quoted'"));
}

// ===== Default Config and Completion Tests =====

#[test]
fn test_default_config_is_loadable() {
    let output = benchplot_cmd().arg("default-config").output().unwrap();
    assert!(output.status.success());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("benchplot.json");
    fs::write(&path, &output.stdout).unwrap();
    let config = benchplot_cli::config::PlotConfig::load(&path).unwrap();
    assert_eq!(config.source_dirs, vec!["AVX2".to_string(), "Neon".to_string()]);
    assert_eq!(config.memory_source.as_deref(), Some("Neon"));
}

#[test]
fn test_completion_bash() {
    benchplot_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("benchplot"));
}

#[test]
fn test_completion_unsupported_shell() {
    benchplot_cmd()
        .args(["completion", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported shell"));
}

#[test]
fn test_completion_install_instructions() {
    benchplot_cmd()
        .args(["completion", "fish", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "benchplot completion fish > ~/.config/fish/completions/benchplot.fish",
        ));
}
