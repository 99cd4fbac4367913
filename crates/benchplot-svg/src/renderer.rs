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


//! [`ChartRenderer`] implementation on top of plotters' SVG backend.

use crate::hatch::{dashes, diagonal_segments, dot_centers, PixelRect, Point};
use benchplot_core::{BenchplotError, Chart, ChartEntry, ChartRenderer, Hatch, Palette, Result, Theme};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;
use std::fs;
use std::path::Path;
use tracing::debug;

const DEFAULT_PLOT_WIDTH: u32 = 640;
const DEFAULT_ROW_PITCH: u32 = 32;
const DEFAULT_FONT: &str = "sans-serif";

const TITLE_FONT_SIZE: f64 = 16.0;
const LABEL_FONT_SIZE: f64 = 12.0;
const VALUE_FONT_SIZE: f64 = 11.0;
const MEMORY_FONT_SIZE: f64 = 10.0;
const AXIS_LABEL_FONT_SIZE: f64 = 13.0;

const MARGIN: u32 = 16;
const LABEL_GAP: i32 = 8;
const TITLE_LINE: u32 = 24;
const X_LABEL_AREA_SIZE: u32 = 48;
const MEMORY_COLUMN: i32 = 84;
const X_LABELS: usize = 6;

/// Space above the longest bar for its value label.
const HEADROOM: f64 = 1.12;
/// Share of a row covered by its bar.
const BAR_FILL: f64 = 0.8;

const DOT_SPACING: i32 = 8;
const DOT_RADIUS: i32 = 2;
const DIAGONAL_SPACING: i32 = 6;
const SEPARATOR_DASH: (i32, i32) = (6, 4);

type DrawResult<T> = std::result::Result<T, DrawingAreaErrorKind<std::io::Error>>;
type Plot<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Writes charts as SVG documents through plotters.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    plot_width: u32,
    row_pitch: u32,
    font_family: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            plot_width: DEFAULT_PLOT_WIDTH,
            row_pitch: DEFAULT_ROW_PITCH,
            font_family: DEFAULT_FONT.to_string(),
        }
    }
}

impl SvgRenderer {
    /// Creates a renderer with default geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width of the bar area in pixels.
    pub fn with_plot_width(mut self, width: u32) -> Self {
        self.plot_width = width;
        self
    }

    /// Sets the vertical distance between rows in pixels.
    pub fn with_row_pitch(mut self, pitch: u32) -> Self {
        self.row_pitch = pitch;
        self
    }

    /// Sets the font family written into text elements.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Renders `chart` to an SVG string.
    pub fn to_svg(&self, chart: &Chart, theme: &Theme, palette: &Palette) -> Result<String> {
        let mut svg = String::new();
        self.draw(chart, theme, palette, &mut svg)
            .map_err(|e| render_error(Path::new("<memory>"), e))?;
        Ok(svg)
    }

    fn font(&self, size: f64, bold: bool) -> FontDesc<'_> {
        let style = if bold { FontStyle::Bold } else { FontStyle::Normal };
        FontDesc::new(FontFamily::Name(&self.font_family), size, style)
    }

    /// Estimated pixel width of `text`.
    fn text_width(&self, text: &str, size: f64, bold: bool) -> i32 {
        self.font(size, bold)
            .box_size(text)
            .map(|(w, _)| w as i32)
            .unwrap_or(0)
    }

    fn label_gutter(&self, chart: &Chart) -> u32 {
        let widest = chart
            .entries
            .iter()
            .map(|e| self.text_width(&e.display_label, LABEL_FONT_SIZE, e.is_separator))
            .max()
            .unwrap_or(0);
        (widest + 2 * LABEL_GAP).max(0) as u32
    }

    fn draw(&self, chart: &Chart, theme: &Theme, palette: &Palette, out: &mut String) -> DrawResult<()> {
        let gutter = self.label_gutter(chart);
        let has_memory = chart.bars().any(|e| e.allocated_display.is_some());
        let memory = if has_memory { MEMORY_COLUMN as u32 } else { 0 };
        let title_lines = if chart.subtitle.is_some() { 2 } else { 1 };
        let title_width = self.text_width(&chart.title, TITLE_FONT_SIZE, true).max(0) as u32;

        let content = MARGIN + gutter + self.plot_width + memory + MARGIN;
        let width = content.max(title_width + 2 * MARGIN);
        let rows = chart.entries.len().max(1);
        let height = MARGIN + title_lines * TITLE_LINE + rows as u32 * self.row_pitch + X_LABEL_AREA_SIZE + MARGIN;

        let root = SVGBackend::with_string(out, (width, height)).into_drawing_area();
        root.fill(&rgba(theme.background))?;

        let text = rgba(theme.text);
        let title_style = self.font(TITLE_FONT_SIZE, true).color(&text);
        let mut area = root.titled(&chart.title, title_style.clone())?;
        if let Some(subtitle) = &chart.subtitle {
            area = area.titled(subtitle, title_style)?;
        }

        let x_max = x_axis_max(chart.max_throughput());
        let mut plot = ChartBuilder::on(&area)
            .margin(MARGIN)
            .margin_right(width - MARGIN - gutter - self.plot_width)
            .x_label_area_size(X_LABEL_AREA_SIZE)
            .y_label_area_size(gutter)
            .build_cartesian_2d(0f64..x_max, 0f64..rows as f64)?;

        plot.configure_mesh()
            .disable_y_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(rgba(theme.grid).mix(0.3))
            .axis_style(text)
            .x_labels(X_LABELS)
            .y_labels(1)
            .y_label_formatter(&|_| String::new())
            .x_desc(chart.axis_label())
            .label_style(self.font(VALUE_FONT_SIZE, false).color(&text))
            .axis_desc_style(self.font(AXIS_LABEL_FONT_SIZE, true).color(&text))
            .draw()?;

        let plot_right = plot.backend_coord(&(x_max, 0.0)).0;
        let memory_right = has_memory.then_some(plot_right + MEMORY_COLUMN);

        for (index, entry) in chart.entries.iter().enumerate() {
            if entry.is_separator {
                self.draw_separator(&root, &plot, entry, theme, index, x_max)?;
            } else {
                self.draw_bar(&root, &mut plot, chart, entry, theme, palette, index)?;
                if let (Some(right), Some(allocated)) = (memory_right, entry.allocated_display.as_deref()) {
                    let y = plot.backend_coord(&(0.0, row_center(index))).1;
                    self.draw_memory(&root, allocated, entry.is_min_allocation, theme, (right, y))?;
                }
            }
        }

        root.present()?;
        Ok(())
    }

    fn draw_label(
        &self,
        root: &DrawingArea<SVGBackend<'_>, Shift>,
        label: &str,
        bold: bool,
        at: Point,
        theme: &Theme,
    ) -> DrawResult<()> {
        let style = self
            .font(LABEL_FONT_SIZE, bold)
            .color(&rgba(theme.text))
            .pos(Pos::new(HPos::Right, VPos::Center));
        root.draw(&Text::new(label.to_string(), (at.0 - LABEL_GAP, at.1), style))
    }

    fn draw_separator(
        &self,
        root: &DrawingArea<SVGBackend<'_>, Shift>,
        plot: &Plot<'_, '_>,
        entry: &ChartEntry,
        theme: &Theme,
        index: usize,
        x_max: f64,
    ) -> DrawResult<()> {
        let (left, y) = plot.backend_coord(&(0.0, row_center(index)));
        let right = plot.backend_coord(&(x_max, row_center(index))).0;
        let style = rgba(theme.text).mix(0.5).stroke_width(1);
        let (dash, gap) = SEPARATOR_DASH;
        for (from, to) in dashes(left, right, dash, gap) {
            root.draw(&PathElement::new(vec![(from, y), (to, y)], style))?;
        }
        self.draw_label(root, &entry.display_label, true, (left, y), theme)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_bar(
        &self,
        root: &DrawingArea<SVGBackend<'_>, Shift>,
        plot: &mut Plot<'_, '_>,
        chart: &Chart,
        entry: &ChartEntry,
        theme: &Theme,
        palette: &Palette,
        index: usize,
    ) -> DrawResult<()> {
        let center = row_center(index);
        let half = BAR_FILL / 2.0;
        let corners = [(0.0, center - half), (entry.throughput, center + half)];
        let color = rgba(palette.bar_color(&entry.color_key, entry.is_parallel_variant));
        let edge = rgba(theme.edge);

        plot.draw_series(std::iter::once(Rectangle::new(corners, color.filled())))?;
        if let Some(hatch) = entry.hatch {
            let rect = PixelRect::from_corners(plot.backend_coord(&corners[0]), plot.backend_coord(&corners[1]));
            draw_hatch(root, hatch, rect, edge)?;
        }
        plot.draw_series(std::iter::once(Rectangle::new(corners, edge.stroke_width(1))))?;

        let value_style = self
            .font(VALUE_FONT_SIZE, true)
            .color(&rgba(theme.text))
            .pos(Pos::new(HPos::Left, VPos::Center));
        plot.draw_series(std::iter::once(
            EmptyElement::at((entry.throughput, center))
                + Text::new(chart.format_throughput(entry.throughput), (4, 0), value_style),
        ))?;

        let anchor = plot.backend_coord(&(0.0, center));
        self.draw_label(root, &entry.display_label, false, anchor, theme)
    }

    fn draw_memory(
        &self,
        root: &DrawingArea<SVGBackend<'_>, Shift>,
        allocated: &str,
        highlight: bool,
        theme: &Theme,
        (right, y): Point,
    ) -> DrawResult<()> {
        let style = self
            .font(MEMORY_FONT_SIZE, highlight)
            .color(&rgba(theme.text).mix(0.9))
            .pos(Pos::new(HPos::Right, VPos::Center));
        let (w, h) = root.estimate_text_size(allocated, &style)?;
        let (w, h) = (w as i32 + 8, h as i32 + 6);
        let background = if highlight {
            theme.annotation_highlight
        } else {
            theme.annotation
        };
        root.draw(&Rectangle::new(
            [(right - w, y - h / 2), (right, y + h / 2)],
            rgba(background).filled(),
        ))?;
        root.draw(&Text::new(allocated.to_string(), (right - 4, y), style))
    }
}

impl ChartRenderer for SvgRenderer {
    fn extension(&self) -> &str {
        "svg"
    }

    fn render(&self, chart: &Chart, theme: &Theme, palette: &Palette, path: &Path) -> Result<()> {
        if chart.bars().next().is_none() {
            return Err(BenchplotError::Render {
                path: path.to_path_buf(),
                message: "chart has no bars".to_string(),
            });
        }
        let mut svg = String::new();
        self.draw(chart, theme, palette, &mut svg)
            .map_err(|e| render_error(path, e))?;
        fs::write(path, svg).map_err(|e| BenchplotError::io(path, e))?;
        debug!(path = %path.display(), entries = chart.entries.len(), "wrote svg");
        Ok(())
    }
}

fn render_error(path: &Path, err: DrawingAreaErrorKind<std::io::Error>) -> BenchplotError {
    BenchplotError::Render {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn rgba(color: benchplot_core::Color) -> RGBAColor {
    RGBColor(color.r, color.g, color.b).mix(color.a)
}

/// Rows run bottom-to-top; row `index` spans `index..index + 1`.
fn row_center(index: usize) -> f64 {
    index as f64 + 0.5
}

fn x_axis_max(max_throughput: f64) -> f64 {
    if max_throughput.is_finite() && max_throughput > 0.0 {
        max_throughput * HEADROOM
    } else {
        1.0
    }
}

fn draw_hatch(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    hatch: Hatch,
    rect: PixelRect,
    edge: RGBAColor,
) -> DrawResult<()> {
    match hatch {
        Hatch::Dots => {
            for center in dot_centers(rect, DOT_SPACING, DOT_RADIUS) {
                root.draw(&Circle::new(center, DOT_RADIUS, edge.stroke_width(1)))?;
            }
        }
        Hatch::Diagonal => {
            for (from, to) in diagonal_segments(rect, DIAGONAL_SPACING) {
                root.draw(&PathElement::new(vec![from, to], edge.stroke_width(1)))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchplot_core::Color;

    fn chart() -> Chart {
        let mut parallel = ChartEntry::bar("Sep", 40.0, "Sep").with_allocation(Some(2048.0));
        parallel.is_parallel_variant = true;
        parallel.hatch = Some(Hatch::Dots);
        parallel.is_min_allocation = true;
        Chart {
            title: "Reading objects".to_string(),
            subtitle: Some("AMD Ryzen 7 3700X".to_string()),
            unit: "million records/s".to_string(),
            decimal_places: 2,
            entries: vec![
                parallel,
                ChartEntry::separator("Parallel"),
                ChartEntry::bar("Sep", 12.5, "Sep").with_allocation(Some(3.0 * 1024.0 * 1024.0)),
                ChartEntry::bar("CsvHelper", 4.0, "CsvHelper"),
            ],
        }
    }

    fn palette() -> Palette {
        Palette::default().with("Sep", Color::rgb(0x4E, 0xCD, 0x72))
    }

    fn svg(chart: &Chart, theme: &Theme) -> String {
        SvgRenderer::new().to_svg(chart, theme, &palette()).unwrap().to_lowercase()
    }

    #[test]
    fn test_text_content() {
        let svg = svg(&chart(), &Theme::LIGHT);
        assert!(svg.contains(">reading objects</text>"));
        assert!(svg.contains(">amd ryzen 7 3700x</text>"));
        assert!(svg.contains(">throughput (million records/s)</text>"));
        assert!(svg.contains(">40.00</text>"));
        assert!(svg.contains(">12.50</text>"));
        assert!(svg.contains(">2 kb</text>"));
        assert!(svg.contains(">3.0 mb</text>"));
        assert!(svg.contains(">csvhelper</text>"));
    }

    #[test]
    fn test_separator_caption() {
        let svg = svg(&chart(), &Theme::LIGHT);
        assert!(svg.contains(">parallel</text>"));
    }

    #[test]
    fn test_bar_colors() {
        let svg = svg(&chart(), &Theme::LIGHT);
        assert!(svg.contains("#4ecd72"));
        let darker = Color::rgb(0x4E, 0xCD, 0x72).adjust_lightness(0.9).to_hex();
        assert!(svg.contains(&darker));
        // Fallback palette color for CsvHelper.
        assert!(svg.contains("#95a5a6"));
    }

    #[test]
    fn test_hatches_only_where_requested() {
        let hatched = svg(&chart(), &Theme::LIGHT);
        assert!(hatched.contains("<circle"));

        let mut plain = chart();
        plain.entries[0].hatch = None;
        let plain_svg = svg(&plain, &Theme::LIGHT);
        assert!(!plain_svg.contains("<circle"));

        let mut diagonal = chart();
        diagonal.entries[0].hatch = Some(Hatch::Diagonal);
        let diagonal_svg = svg(&diagonal, &Theme::LIGHT);
        assert!(!diagonal_svg.contains("<circle"));
        assert!(diagonal_svg.matches("<polyline").count() > plain_svg.matches("<polyline").count());
    }

    #[test]
    fn test_minimum_allocation_highlight() {
        let highlighted = svg(&chart(), &Theme::DARK);
        assert!(highlighted.contains("#8cffa6"));

        let mut none = chart();
        none.entries[0].is_min_allocation = false;
        assert!(!svg(&none, &Theme::DARK).contains("#8cffa6"));
    }

    #[test]
    fn test_memory_column_only_with_allocations() {
        let mut bare = chart();
        for entry in &mut bare.entries {
            entry.allocated_display = None;
            entry.allocated_bytes = None;
        }
        let svg = svg(&bare, &Theme::LIGHT);
        assert!(!svg.contains(" kb</text>"));
        assert!(!svg.contains(" mb</text>"));
    }

    #[test]
    fn test_x_axis_max() {
        assert_eq!(x_axis_max(100.0), 100.0 * HEADROOM);
        assert_eq!(x_axis_max(0.0), 1.0);
        assert_eq!(x_axis_max(f64::NAN), 1.0);
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reading_light.svg");
        let renderer = SvgRenderer::new();
        assert_eq!(renderer.extension(), "svg");
        renderer.render(&chart(), &Theme::LIGHT, &palette(), &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
        assert!(written.contains("</svg>"));
    }

    #[test]
    fn test_render_rejects_empty_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut empty = chart();
        empty.entries.clear();
        let err = SvgRenderer::new()
            .render(&empty, &Theme::LIGHT, &palette(), &dir.path().join("x.svg"))
            .unwrap_err();
        assert!(matches!(err, BenchplotError::Render { .. }));
    }

    #[test]
    fn test_render_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("x.svg");
        let err = SvgRenderer::new()
            .render(&chart(), &Theme::LIGHT, &palette(), &path)
            .unwrap_err();
        assert!(matches!(err, BenchplotError::Io { .. }));
    }
}
