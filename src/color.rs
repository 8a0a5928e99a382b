//! Color types and color-name parsing.
//!
//! Item colors are stored as [`Rgba8`]. They can be written as `#RRGGBB`,
//! `#RRGGBBAA` or one of the predefined names (`"red"`, `"darkBlue"`, `"k"`
//! ...), and converted to the f64 [`Rgba`] a backend blends with.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{PlotError, Result};

// ============================================================================
// Rgba (f64 per channel)
// ============================================================================

/// RGBA color with f64 components in range [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn new_rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Set alpha, clamped to [0, 1].
    pub fn set_opacity(&mut self, a: f64) -> &mut Self {
        self.a = a.clamp(0.0, 1.0);
        self
    }

    pub fn opacity(&self) -> f64 {
        self.a
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

// ============================================================================
// Rgba8 (8-bit per channel)
// ============================================================================

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn with_opacity(c: &Rgba8, a: u8) -> Self {
        Self { a, ..*c }
    }

    pub fn from_rgba(c: &Rgba) -> Self {
        Self {
            r: Self::from_double(c.r),
            g: Self::from_double(c.g),
            b: Self::from_double(c.b),
            a: Self::from_double(c.a),
        }
    }

    pub fn to_rgba(&self) -> Rgba {
        Rgba {
            r: self.r as f64 / 255.0,
            g: self.g as f64 / 255.0,
            b: self.b as f64 / 255.0,
            a: self.a as f64 / 255.0,
        }
    }

    /// Map [0, 1] to [0, 255], rounding half up and clamping.
    pub fn from_double(v: f64) -> u8 {
        (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Look up a predefined color name.
    pub fn named(name: &str) -> Option<Rgba8> {
        let hex = match name {
            "b" | "blue" => "#0000ff",
            "r" | "red" => "#ff0000",
            "g" | "green" => "#00ff00",
            "k" | "black" => "#000000",
            "white" => "#ffffff",
            "pink" => "#ff66ff",
            "brown" => "#a52a2a",
            "orange" => "#ff9900",
            "violet" => "#6600ff",
            "gray" | "grey" => "#a0a0a4",
            "darkBlue" => "#000080",
            "darkGreen" => "#008000",
            "darkRed" => "#800000",
            "darkMagenta" => "#800080",
            "darkCyan" => "#008080",
            "darkYellow" => "#808000",
            "darkBrown" => "#660000",
            "cyan" => "#00ffff",
            "magenta" => "#ff00ff",
            "yellow" => "#ffff00",
            "transparent" => "#00000000",
            _ => return None,
        };
        parse_hex(hex)
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BLACK
    }
}

/// `#RRGGBB` or `#RRGGBBAA`.
fn parse_hex(s: &str) -> Option<Rgba8> {
    let digits = s.strip_prefix('#')?;
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let a = if digits.len() == 8 { channel(6)? } else { 255 };
    Some(Rgba8::new(channel(0)?, channel(2)?, channel(4)?, a))
}

impl FromStr for Rgba8 {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Rgba8::named(s)
            .or_else(|| parse_hex(s))
            .ok_or_else(|| PlotError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = PlotError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
