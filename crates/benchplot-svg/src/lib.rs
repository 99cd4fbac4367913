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


//! SVG backend for benchplot charts.
//!
//! [`SvgRenderer`] implements [`benchplot_core::ChartRenderer`] with
//! `plotters` and its SVG backend: horizontal bars with optional hatch
//! overlays, a dashed separator between parallel and sequential groups,
//! throughput labels past each bar and an allocation column on the right
//! with the smallest allocation highlighted.
//!
//! # Examples
//!
//! ```
//! use benchplot_core::{Chart, ChartEntry, Palette, Theme};
//! use benchplot_svg::SvgRenderer;
//!
//! let chart = Chart {
//!     title: "Reading".to_string(),
//!     subtitle: None,
//!     unit: "MB/s".to_string(),
//!     decimal_places: 1,
//!     entries: vec![ChartEntry::bar("Sep", 1200.0, "Sep").with_allocation(Some(2048.0))],
//! };
//! let svg = SvgRenderer::default()
//!     .to_svg(&chart, &Theme::LIGHT, &Palette::default())
//!     .unwrap();
//! assert!(svg.contains("1200.0"));
//! assert!(svg.contains("2 KB"));
//! ```

mod hatch;
mod renderer;

pub use renderer::SvgRenderer;
