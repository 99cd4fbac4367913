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


//! Renders charts built by the core pipeline to disk.

use benchplot_core::chart::output_path;
use benchplot_core::{
    build_chart, read_table, Baseline, ChartRenderer, ChartSpec, GroupingPolicy, LoadOptions, Palette,
    ParameterFilter, ParameterSpec, ThemeName,
};
use benchplot_svg::SvgRenderer;
use std::fs;

const ENUM_EXPORT: &str = "\
Method,IgnoreCase,Mean [ns],Allocated [B]
_Reflection,False,120.5,48
_Reflection,True,150.0,48
_SourceGen,False,20.0,0
_SourceGen,True,25.0,0
";

#[test]
fn test_renders_every_theme_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("EnumParse-report.csv");
    fs::write(&input, ENUM_EXPORT).unwrap();

    let options = LoadOptions::default().with_parameters(["IgnoreCase"]);
    let table = read_table(ENUM_EXPORT.as_bytes(), &input, &options).unwrap();
    let spec = ChartSpec::new("Parsing enums", "million enums/s", Baseline::Constant(1.0))
        .with_divisor(1_000_000.0)
        .with_grouping(GroupingPolicy::CaseSensitivity {
            column: "IgnoreCase".to_string(),
        });
    let filter = ParameterFilter::new();
    let chart = build_chart(&table, &filter, &spec).unwrap();

    let renderer = SvgRenderer::new();
    for theme in [ThemeName::Light, ThemeName::Dark] {
        let path = output_path(&input, &spec.title, &filter, theme, renderer.extension());
        renderer
            .render(&chart, &theme.theme(), &Palette::default(), &path)
            .unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains(">SourceGen (ignore case)</text>"));
        assert!(svg.contains(">Reflection (case-sensitive)</text>"));
        assert!(svg.contains(">0 B</text>"));
    }

    assert!(dir.path().join("parsing_enums_light.svg").exists());
    assert!(dir.path().join("parsing_enums_dark.svg").exists());
}

#[test]
fn test_parameterized_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.csv");
    let export = "Method,Quoted,Mean [us]\n_Sep,True,10\n_Sep,False,5\n";

    let options = LoadOptions::default().with_parameters(["Quoted"]);
    let table = read_table(export.as_bytes(), &input, &options).unwrap();
    let spec = ChartSpec::new("Enumerating fields", "fields/s", Baseline::Constant(100.0));
    let specs = vec![ParameterSpec::new("Quoted", &[("True", "Quoted"), ("False", "Unquoted")])];

    let renderer = SvgRenderer::new();
    for filter in ParameterFilter::combinations(&specs) {
        let chart = build_chart(&table, &filter, &spec).unwrap();
        let path = output_path(&input, &spec.title, &filter, ThemeName::Light, renderer.extension());
        renderer
            .render(&chart, &ThemeName::Light.theme(), &Palette::default(), &path)
            .unwrap();
    }

    assert!(dir.path().join("enumerating_fields_quoted_light.svg").exists());
    assert!(dir.path().join("enumerating_fields_unquoted_light.svg").exists());
}
