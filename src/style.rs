//! Line, marker and axis attributes of plot items.
//!
//! Each attribute parses from the short string codes used in plotting
//! scripts (`"--"`, `"o"`, `"right"`) and rejects anything else.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{PlotError, Result};

/// Stroke pattern of a curve line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LineStyle {
    /// `""` or `" "`: no line, markers only.
    None,
    /// `"-"`
    #[default]
    Solid,
    /// `"--"`
    Dashed,
    /// `"-."`
    DashDot,
    /// `":"`
    Dotted,
}

impl LineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => " ",
            Self::Solid => "-",
            Self::Dashed => "--",
            Self::DashDot => "-.",
            Self::Dotted => ":",
        }
    }

    /// Dash/gap lengths in pixels for a line of the given width.
    ///
    /// Empty for solid lines and for `None`, which draws nothing.
    pub fn dash_pattern(self, line_width: f64) -> Vec<(f64, f64)> {
        let w = line_width.max(1.0);
        match self {
            Self::None | Self::Solid => Vec::new(),
            Self::Dashed => vec![(3.7 * w, 1.6 * w)],
            Self::DashDot => vec![(6.4 * w, 1.6 * w), (w, 1.6 * w)],
            Self::Dotted => vec![(w, 1.65 * w)],
        }
    }

    pub fn is_visible(self) -> bool {
        self != Self::None
    }
}

impl FromStr for LineStyle {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | " " => Ok(Self::None),
            "-" => Ok(Self::Solid),
            "--" => Ok(Self::Dashed),
            "-." => Ok(Self::DashDot),
            ":" => Ok(Self::Dotted),
            other => Err(PlotError::InvalidLineStyle(other.to_string())),
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point marker drawn at every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Symbol {
    #[default]
    None,
    Circle,
    Point,
    Pixel,
    Plus,
    Cross,
    Diamond,
    Square,
}

impl Symbol {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Circle => "o",
            Self::Point => ".",
            Self::Pixel => ",",
            Self::Plus => "+",
            Self::Cross => "x",
            Self::Diamond => "d",
            Self::Square => "s",
        }
    }
}

impl FromStr for Symbol {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "" => Self::None,
            "o" => Self::Circle,
            "." => Self::Point,
            "," => Self::Pixel,
            "+" => Self::Plus,
            "x" => Self::Cross,
            "d" => Self::Diamond,
            "s" => Self::Square,
            other => return Err(PlotError::InvalidSymbol(other.to_string())),
        })
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which y axis an item is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum YAxis {
    #[default]
    Left,
    Right,
}

impl FromStr for YAxis {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(PlotError::InvalidYAxis(other.to_string())),
        }
    }
}

macro_rules! try_from_string {
    ($($t:ty),*) => {
        $(
            impl TryFrom<String> for $t {
                type Error = PlotError;

                fn try_from(s: String) -> Result<Self> {
                    s.parse()
                }
            }
        )*
    };
}

try_from_string!(LineStyle, Symbol, YAxis);
