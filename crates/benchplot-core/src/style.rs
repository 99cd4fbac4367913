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

//! Colors, palettes and themes handed to renderers.
//!
//! All of these are plain immutable values; renderers receive them as
//! arguments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lightness factor applied to parallel variants.
pub const PARALLEL_LIGHTNESS: f64 = 0.9;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f64,
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color with opacity.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    ///
    /// # Examples
    ///
    /// ```
    /// use benchplot_core::style::Color;
    ///
    /// let c = Color::from_hex("#FF6B6B").unwrap();
    /// assert_eq!((c.r, c.g, c.b), (0xFF, 0x6B, 0x6B));
    /// assert!(Color::from_hex("#12345").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#rrggbb` form, ignoring opacity.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Scales HLS lightness by `factor`, clamped to `0..=1`.
    ///
    /// Factors above 1 lighten, below 1 darken.
    pub fn adjust_lightness(&self, factor: f64) -> Self {
        let (h, l, s) = rgb_to_hls(
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        );
        let (r, g, b) = hls_to_rgb(h, (l * factor).clamp(0.0, 1.0), s);
        let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgba(to_u8(r), to_u8(g), to_u8(b), self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color '{}', expected #RRGGBB", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex().to_uppercase()
    }
}

fn rgb_to_hls(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return (0.0, l, 0.0);
    }
    let delta = max - min;
    let s = if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), l, s)
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// Palette key to color lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Colors by key.
    #[serde(default)]
    pub colors: BTreeMap<String, Color>,
    /// Color for unknown keys.
    #[serde(default = "default_fallback")]
    pub fallback: Color,
}

fn default_fallback() -> Color {
    Color::rgb(0x95, 0xA5, 0xA6)
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: BTreeMap::new(),
            fallback: default_fallback(),
        }
    }
}

impl Palette {
    /// Adds a color.
    pub fn with(mut self, key: impl Into<String>, color: Color) -> Self {
        self.colors.insert(key.into(), color);
        self
    }

    /// Color for a key, or the fallback.
    pub fn color(&self, key: &str) -> Color {
        self.colors.get(key).copied().unwrap_or(self.fallback)
    }

    /// Bar fill for an entry; parallel variants are slightly darker.
    pub fn bar_color(&self, key: &str, is_parallel: bool) -> Color {
        let base = self.color(key);
        if is_parallel {
            base.adjust_lightness(PARALLEL_LIGHTNESS)
        } else {
            base
        }
    }
}

/// Named theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Dark text on a light background.
    Light,
    /// Light text on a dark background.
    Dark,
}

impl ThemeName {
    /// Lowercase name used in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    /// Theme values for this name.
    pub fn theme(self) -> Theme {
        match self {
            ThemeName::Light => Theme::LIGHT,
            ThemeName::Dark => Theme::DARK,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colors used for everything that is not a bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Theme name.
    pub name: ThemeName,
    /// Titles, labels and tick text.
    pub text: Color,
    /// Bar outlines.
    pub edge: Color,
    /// Grid lines.
    pub grid: Color,
    /// Figure and plot background.
    pub background: Color,
    /// Memory annotation background.
    pub annotation: Color,
    /// Memory annotation background for the smallest allocation.
    pub annotation_highlight: Color,
}

impl Theme {
    /// Light theme.
    pub const LIGHT: Theme = Theme {
        name: ThemeName::Light,
        text: Color::rgb(0, 0, 0),
        edge: Color::rgb(0, 0, 0),
        grid: Color::rgb(0x80, 0x80, 0x80),
        background: Color::rgba(255, 255, 255, 0.1),
        annotation: Color::rgba(0, 0, 0, 0.05),
        annotation_highlight: Color::rgba(128, 217, 153, 0.45),
    };

    /// Dark theme.
    pub const DARK: Theme = Theme {
        name: ThemeName::Dark,
        text: Color::rgb(0xE0, 0xE0, 0xE0),
        edge: Color::rgb(0xE0, 0xE0, 0xE0),
        grid: Color::rgb(0xE0, 0xE0, 0xE0),
        background: Color::rgba(0, 0, 0, 0.1),
        annotation: Color::rgba(255, 255, 255, 0.08),
        annotation_highlight: Color::rgba(140, 255, 166, 0.35),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex("4ECD72").unwrap();
        assert_eq!(c.to_hex(), "#4ecd72");
        assert_eq!(String::from(c), "#4ECD72");
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Color::from_hex("#GG0000").is_none());
        assert!(Color::from_hex("").is_none());
        assert!(Color::try_from("red".to_string()).is_err());
    }

    #[test]
    fn test_lightness_identity_and_darkening() {
        let coral = Color::from_hex("#FF6B6B").unwrap();
        assert_eq!(coral.adjust_lightness(1.0), coral);

        let darker = coral.adjust_lightness(PARALLEL_LIGHTNESS);
        let luminance = |c: Color| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
        assert!(luminance(darker) < luminance(coral));
    }

    #[test]
    fn test_grey_stays_grey() {
        let grey = Color::rgb(100, 100, 100);
        let darker = grey.adjust_lightness(0.5);
        assert_eq!((darker.r, darker.g, darker.b), (50, 50, 50));
    }

    #[test]
    fn test_palette_fallback() {
        let palette = Palette::default().with("Sep", Color::from_hex("#4ECD72").unwrap());
        assert_eq!(palette.color("Sep").to_hex(), "#4ecd72");
        assert_eq!(palette.color("Unknown").to_hex(), "#95a5a6");
        assert_ne!(palette.bar_color("Sep", true), palette.bar_color("Sep", false));
    }

    #[test]
    fn test_palette_deserialize() {
        let palette: Palette = serde_json::from_str(r##"{"colors": {"Sylvan": "#45B7D1"}}"##).unwrap();
        assert_eq!(palette.color("Sylvan"), Color::rgb(0x45, 0xB7, 0xD1));
        assert_eq!(palette.fallback, default_fallback());
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(ThemeName::Light.theme(), Theme::LIGHT);
        assert_eq!(ThemeName::Dark.to_string(), "dark");
        let name: ThemeName = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(name, ThemeName::Dark);
    }
}
