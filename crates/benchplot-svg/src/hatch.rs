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


//! Pixel geometry for hatch overlays and dashed lines.
//!
//! Plotters has no pattern fills, so hatches are drawn as individual
//! `Circle` and `PathElement` primitives clipped to the bar rectangle.

pub(crate) type Point = (i32, i32);

/// Axis-aligned pixel rectangle, `left <= right` and `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Normalizes two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.0.min(b.0),
            top: a.1.min(b.1),
            right: a.0.max(b.0),
            bottom: a.1.max(b.1),
        }
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Dot centers on a grid with `spacing` pixels, kept `radius` inside the rectangle.
pub(crate) fn dot_centers(rect: PixelRect, spacing: i32, radius: i32) -> Vec<Point> {
    if spacing <= 0 {
        return Vec::new();
    }
    let mut centers = Vec::new();
    let mut y = rect.top + spacing / 2;
    while y + radius <= rect.bottom {
        let mut x = rect.left + spacing / 2;
        while x + radius <= rect.right {
            centers.push((x, y));
            x += spacing;
        }
        y += spacing;
    }
    centers
}

/// 45 degree lines rising to the right, `spacing` pixels apart, clipped to `rect`.
pub(crate) fn diagonal_segments(rect: PixelRect, spacing: i32) -> Vec<(Point, Point)> {
    if spacing <= 0 || rect.right <= rect.left || rect.bottom <= rect.top {
        return Vec::new();
    }
    let height = rect.height();
    let mut segments = Vec::new();
    // Each line starts at (start, bottom) and moves up-right by t in 0..=height.
    let mut start = rect.left - height;
    while start < rect.right {
        let t0 = (rect.left - start).max(0);
        let t1 = (rect.right - start).min(height);
        if t0 < t1 {
            segments.push((
                (start + t0, rect.bottom - t0),
                (start + t1, rect.bottom - t1),
            ));
        }
        start += spacing;
    }
    segments
}

/// Dash intervals covering `from..to` on one axis.
pub(crate) fn dashes(from: i32, to: i32, dash: i32, gap: i32) -> Vec<(i32, i32)> {
    if dash <= 0 || gap < 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut x = from;
    while x < to {
        out.push((x, (x + dash).min(to)));
        x += dash + gap;
    }
    out
}
