//! Histogram bin edges and stair-step outlines.
//!
//! A histogram curve is drawn as a continuous polyline: every bin becomes a
//! flat segment at its height, and consecutive bins share an edge so that
//! the polyline steps vertically between them.
//!
//! The edges are either supplied by the caller (`x` one longer than `y`) or
//! derived from one representative x per bin according to a
//! [`HistogramType`]. Derivation assumes the spacing at the boundary of the
//! series is uniform: the missing outer edge is extrapolated from the
//! nearest gap, or from a unit gap when the series has a single sample.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};

/// How a representative x relates to the bin it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistogramType {
    /// x is the right edge of its bin.
    Left,
    /// x is the middle of its bin.
    Center,
    /// x is the left edge of its bin.
    Right,
}

impl HistogramType {
    pub const ALL: [HistogramType; 3] = [Self::Left, Self::Center, Self::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for HistogramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistogramType {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(PlotError::InvalidHistogramType(other.to_string())),
        }
    }
}

/// Gap used when a single sample gives no neighbour to measure spacing from.
const FALLBACK_WIDTH: f64 = 1.0;

/// Edges with each x as the left edge of its bin; `x` must be non-empty.
fn right_edges(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let width = if n > 1 {
        x[n - 1] - x[n - 2]
    } else {
        FALLBACK_WIDTH
    };
    let mut edges = Vec::with_capacity(n + 1);
    edges.extend_from_slice(x);
    edges.push(x[n - 1] + width);
    edges
}

/// Edges with each x as the right edge of its bin; `x` must be non-empty.
fn left_edges(x: &[f64]) -> Vec<f64> {
    let width = if x.len() > 1 {
        x[1] - x[0]
    } else {
        FALLBACK_WIDTH
    };
    let mut edges = Vec::with_capacity(x.len() + 1);
    edges.push(x[0] - width);
    edges.extend_from_slice(x);
    edges
}

/// Shift right-aligned edges left by half of the gap to their successor.
///
/// The final edge has no successor and reuses the last half gap.
fn center_from_right(mut edges: Vec<f64>) -> Vec<f64> {
    let last = edges.len() - 1;
    let mut half = 0.0;
    for i in 0..last {
        half = (edges[i + 1] - edges[i]) / 2.0;
        edges[i] -= half;
    }
    edges[last] -= half;
    edges
}

/// Compute the `x.len() + 1` bin edges of a series of representative x.
///
/// Returns [`PlotError::NotEnoughEdges`] for an empty series. A single
/// sample is given a unit-wide bin.
pub fn compute_edges(x: &[f64], histogram_type: HistogramType) -> Result<Vec<f64>> {
    if x.is_empty() {
        return Err(PlotError::NotEnoughEdges(0));
    }
    let edges = match histogram_type {
        HistogramType::Left => left_edges(x),
        HistogramType::Right => right_edges(x),
        HistogramType::Center => center_from_right(right_edges(x)),
    };
    Ok(edges)
}

/// Stair-step outline of a histogram, ready to be stroked as a polyline.
///
/// Both vectors have `2 * bin_count()` entries: for bin `i`,
/// `x[2i]..x[2i+1]` spans the bin and `y[2i] == y[2i+1]` is its height.
/// Only [`histogram_value`] builds non-empty outlines, so the two always
/// have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StairSteps {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl StairSteps {
    /// Expand bin `edges` and `heights` (one fewer than edges).
    fn from_edges(edges: &[f64], heights: &[f64]) -> Self {
        let bins = edges.len() - 1;
        let mut x = Vec::with_capacity(bins * 2);
        let mut y = Vec::with_capacity(bins * 2);
        for (pair, &h) in edges.windows(2).zip(heights) {
            x.push(pair[0]);
            x.push(pair[1]);
            y.push(h);
            y.push(h);
        }
        Self { x, y }
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Take the outline apart into its `(x, y)` vectors.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.x, self.y)
    }

    /// Number of vertices in the outline.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn bin_count(&self) -> usize {
        self.x.len() / 2
    }

    /// Outline vertices as `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Turn a sample series into its stair-step outline.
///
/// When `x` is one longer than `y` it already holds the bin edges and
/// `histogram_type` is not consulted. When both have the same length, the
/// edges are derived with [`compute_edges`]. Any other length relation is
/// [`PlotError::LengthMismatch`], and a series yielding fewer than two
/// edges is [`PlotError::NotEnoughEdges`].
pub fn histogram_value(x: &[f64], y: &[f64], histogram_type: HistogramType) -> Result<StairSteps> {
    let derived;
    let edges: &[f64] = if x.len() == y.len() + 1 {
        x
    } else if x.len() == y.len() {
        derived = compute_edges(x, histogram_type)?;
        &derived
    } else {
        return Err(PlotError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    };
    if edges.len() < 2 {
        return Err(PlotError::NotEnoughEdges(edges.len()));
    }

    let steps = StairSteps::from_edges(edges, y);
    debug!(
        "histogram ({}): {} bins -> {} outline vertices",
        histogram_type,
        edges.len() - 1,
        steps.len()
    );
    Ok(steps)
}

// ============================================================================
// Tests
// ============================================================================
