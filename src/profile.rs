//! Image line profiles.
//!
//! A [`ProfileRoi`] selects a band of pixels in an image; the band is
//! reduced across its width (mean or sum) to produce a 1D profile along its
//! length. The horizontal and vertical variants work on whole pixel rows or
//! columns. The two-point variant samples the image bilinearly along the
//! segment. The cross variant yields one horizontal and one vertical profile.
//!
//! NaN samples, and samples falling outside the image, do not contribute to
//! the reduction. A position with no valid sample yields NaN.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::basics::{
    PointD, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
    PATH_FLAGS_CLOSE,
};
use crate::error::{PlotError, Result};
use crate::image::{ImageData, ImageRgba, Placement};

/// Reduction applied across the band width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileMethod {
    #[default]
    Mean,
    Sum,
}

impl FromStr for ProfileMethod {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            other => Err(PlotError::InvalidProfileMethod(other.to_string())),
        }
    }
}

impl fmt::Display for ProfileMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mean => "mean",
            Self::Sum => "sum",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileOptions {
    pub method: ProfileMethod,
    /// Band width in pixels; values below 1 are treated as 1.
    pub line_width: u32,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            method: ProfileMethod::Mean,
            line_width: 1,
        }
    }
}

impl ProfileOptions {
    fn width(&self) -> usize {
        self.line_width.max(1) as usize
    }
}

/// Region of interest a profile is extracted along, in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileRoi {
    HorizontalLine { y: f64 },
    VerticalLine { x: f64 },
    Line { start: PointD, end: PointD },
    Cross { x: f64, y: f64 },
}

/// Single-line building block of a [`ProfileRoi`].
#[derive(Debug, Clone, Copy, PartialEq)]
enum LineRoi {
    Horizontal(f64),
    Vertical(f64),
    Segment(PointD, PointD),
}

impl ProfileRoi {
    fn lines(&self) -> Vec<LineRoi> {
        match *self {
            Self::HorizontalLine { y } => vec![LineRoi::Horizontal(y)],
            Self::VerticalLine { x } => vec![LineRoi::Vertical(x)],
            Self::Line { start, end } => vec![LineRoi::Segment(start, end)],
            Self::Cross { x, y } => vec![LineRoi::Horizontal(y), LineRoi::Vertical(x)],
        }
    }

    /// Number of profiles this region produces.
    pub fn profile_count(&self) -> usize {
        match self {
            Self::Cross { .. } => 2,
            _ => 1,
        }
    }
}

/// One extracted profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Abscissa of every value: plot x, plot y, or distance from the start.
    pub coords: Vec<f64>,
    pub values: Vec<f64>,
    pub title: String,
    pub x_label: String,
}

/// Profile of an RGB(A) image: luminosity plus one profile per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaProfile {
    pub luminosity: Profile,
    pub r: Vec<f64>,
    pub g: Vec<f64>,
    pub b: Vec<f64>,
    pub a: Option<Vec<f64>>,
}

// ============================================================================
// Reduction
// ============================================================================

#[derive(Default, Clone, Copy)]
struct Reducer {
    sum: f64,
    count: usize,
}

impl Reducer {
    #[inline]
    fn add(&mut self, v: f64) {
        if !v.is_nan() {
            self.sum += v;
            self.count += 1;
        }
    }

    fn finish(&self, method: ProfileMethod) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        match method {
            ProfileMethod::Sum => self.sum,
            ProfileMethod::Mean => self.sum / self.count as f64,
        }
    }
}

/// Pixel index range `[start, end)` of a `width`-pixel band around `center`,
/// clipped to `[0, len)`.
fn band(center: f64, width: usize, len: usize) -> Result<(usize, usize)> {
    if !center.is_finite() {
        return Err(PlotError::RoiOutsideImage);
    }
    // Any band starting beyond this range misses the image entirely.
    let center = center.clamp(-(width as f64), (len + width) as f64);
    let start = center.floor() as i64 - (width / 2) as i64;
    let end = start + width as i64;
    let start = start.max(0);
    let end = end.min(len as i64);
    if start >= end {
        return Err(PlotError::RoiOutsideImage);
    }
    Ok((start as usize, end as usize))
}

/// Unit direction and normal of a segment in pixel space.
fn frame(start: PointD, end: PointD) -> (PointD, PointD, f64) {
    let length = start.distance(&end);
    let dir = if length > 0.0 {
        PointD::new((end.x - start.x) / length, (end.y - start.y) / length)
    } else {
        PointD::new(1.0, 0.0)
    };
    (dir, PointD::new(-dir.y, dir.x), length)
}

/// Parameter range `[t0, t1]` of `a + dir * t`, `t` in `[0, length]`, that
/// lies inside the box `[lo, hi]`.
fn clip_segment(
    a: PointD,
    dir: PointD,
    length: f64,
    lo: PointD,
    hi: PointD,
) -> Option<(f64, f64)> {
    let mut t0 = 0.0_f64;
    let mut t1 = length;
    for (p, d, l, h) in [(a.x, dir.x, lo.x, hi.x), (a.y, dir.y, lo.y, hi.y)] {
        if d == 0.0 {
            if p < l || p > h {
                return None;
            }
        } else {
            let (u, v) = ((l - p) / d, (h - p) / d);
            t0 = t0.max(u.min(v));
            t1 = t1.min(u.max(v));
        }
    }
    (t0 <= t1).then_some((t0, t1))
}

// ============================================================================
// Extraction
// ============================================================================

fn horizontal(image: &ImageData, y: f64, opts: &ProfileOptions) -> Result<Profile> {
    let p = image.placement();
    let row = p.to_pixel(PointD::new(p.origin.0, y)).y;
    let (r0, r1) = band(row, opts.width(), image.height())?;

    let mut acc = vec![Reducer::default(); image.width()];
    for r in r0..r1 {
        for (a, &v) in acc.iter_mut().zip(image.row(r)) {
            a.add(v);
        }
    }
    let coords = (0..image.width())
        .map(|c| p.to_plot(PointD::new(c as f64 + 0.5, 0.0)).x)
        .collect();
    Ok(Profile {
        coords,
        values: acc.iter().map(|a| a.finish(opts.method)).collect(),
        title: format!("Y = {y}"),
        x_label: "X".into(),
    })
}

fn vertical(image: &ImageData, x: f64, opts: &ProfileOptions) -> Result<Profile> {
    let p = image.placement();
    let col = p.to_pixel(PointD::new(x, p.origin.1)).x;
    let (c0, c1) = band(col, opts.width(), image.width())?;

    let values = (0..image.height())
        .map(|r| {
            let mut a = Reducer::default();
            for c in c0..c1 {
                a.add(image.get(c, r));
            }
            a.finish(opts.method)
        })
        .collect();
    let coords = (0..image.height())
        .map(|r| p.to_plot(PointD::new(0.0, r as f64 + 0.5)).y)
        .collect();
    Ok(Profile {
        coords,
        values,
        title: format!("X = {x}"),
        x_label: "Y".into(),
    })
}

fn segment(
    image: &ImageData,
    start: PointD,
    end: PointD,
    opts: &ProfileOptions,
) -> Result<Profile> {
    let p = image.placement();
    let a = p.to_pixel(start);
    let b = p.to_pixel(end);
    let (dir, normal, length) = frame(a, b);
    if !length.is_finite() {
        return Err(PlotError::RoiOutsideImage);
    }

    let width = opts.width();
    let half = (width - 1) as f64 / 2.0;

    // Samples further than half a band from the image are all NaN: only
    // the part of the segment inside the widened image is walked.
    let margin = width as f64 / 2.0;
    let lo = PointD::new(-margin, -margin);
    let hi = PointD::new(image.width() as f64 + margin, image.height() as f64 + margin);
    let (t0, t1) = clip_segment(a, dir, length, lo, hi).ok_or(PlotError::RoiOutsideImage)?;

    // One interval per pixel of length; sample `i` sits at `i * step`.
    let intervals = length.ceil();
    let step = if intervals > 0.0 {
        length / intervals
    } else {
        0.0
    };
    let (first, last) = if step > 0.0 {
        ((t0 / step).ceil(), (t1 / step).floor().min(intervals))
    } else {
        (0.0, 0.0)
    };
    if first > last {
        return Err(PlotError::RoiOutsideImage);
    }
    let max_count = if step > 0.0 {
        (lo.distance(&hi) / step).ceil() + 2.0
    } else {
        1.0
    };
    let count = (last - first + 1.0).min(max_count) as usize;
    let index = |j: usize| first + j as f64;

    let mut valid = false;
    let values: Vec<f64> = (0..count)
        .map(|j| {
            let t = index(j) * step;
            let mut acc = Reducer::default();
            for k in 0..width {
                let off = k as f64 - half;
                let sx = a.x + dir.x * t + normal.x * off;
                let sy = a.y + dir.y * t + normal.y * off;
                acc.add(image.sample_bilinear(sx, sy));
            }
            valid |= acc.count > 0;
            acc.finish(opts.method)
        })
        .collect();
    if !valid {
        return Err(PlotError::RoiOutsideImage);
    }

    let plot_length = start.distance(&end);
    let coords = (0..count)
        .map(|j| {
            if intervals > 0.0 {
                plot_length * index(j) / intervals
            } else {
                0.0
            }
        })
        .collect();
    Ok(Profile {
        coords,
        values,
        title: format!("From ({}, {}) to ({}, {})", start.x, start.y, end.x, end.y),
        x_label: "Distance".into(),
    })
}

fn extract(line: LineRoi, image: &ImageData, opts: &ProfileOptions) -> Result<Profile> {
    match line {
        LineRoi::Horizontal(y) => horizontal(image, y, opts),
        LineRoi::Vertical(x) => vertical(image, x, opts),
        LineRoi::Segment(s, e) => segment(image, s, e, opts),
    }
}

/// Extract the profiles of `roi` from a scalar image.
///
/// Returns one profile, or two (horizontal then vertical) for a cross.
pub fn compute_profiles(
    roi: &ProfileRoi,
    image: &ImageData,
    opts: &ProfileOptions,
) -> Result<Vec<Profile>> {
    let profiles = roi
        .lines()
        .into_iter()
        .map(|line| extract(line, image, opts))
        .collect::<Result<Vec<_>>>()?;
    debug!(
        "{} profile(s) of {:?} over {}x{} image, {} px {}",
        profiles.len(),
        roi,
        image.width(),
        image.height(),
        opts.width(),
        opts.method
    );
    Ok(profiles)
}

/// Extract the profiles of `roi` from an RGB(A) image.
///
/// The main profile is taken on the luminosity; each channel is profiled
/// with the same region and options.
pub fn compute_rgba_profiles(
    roi: &ProfileRoi,
    image: &ImageRgba,
    opts: &ProfileOptions,
) -> Result<Vec<RgbaProfile>> {
    let luminosity = compute_profiles(roi, &image.luminosity(), opts)?;
    let channel = |i: usize| -> Result<Vec<Vec<f64>>> {
        Ok(compute_profiles(roi, &image.channel(i), opts)?
            .into_iter()
            .map(|p| p.values)
            .collect())
    };
    let mut r = channel(0)?.into_iter();
    let mut g = channel(1)?.into_iter();
    let mut b = channel(2)?.into_iter();
    let mut a = if image.has_alpha() {
        Some(channel(3)?.into_iter())
    } else {
        None
    };

    Ok(luminosity
        .into_iter()
        .map(|lum| RgbaProfile {
            luminosity: lum,
            r: r.next().unwrap_or_default(),
            g: g.next().unwrap_or_default(),
            b: b.next().unwrap_or_default(),
            a: a.as_mut().and_then(|it| it.next()),
        })
        .collect())
}

// ============================================================================
// Area covered by the band
// ============================================================================

fn area_quad(
    line: LineRoi,
    placement: &Placement,
    w: usize,
    h: usize,
    opts: &ProfileOptions,
) -> Result<[PointD; 4]> {
    let width = opts.width();
    let corners = match line {
        LineRoi::Horizontal(y) => {
            let row = placement.to_pixel(PointD::new(placement.origin.0, y)).y;
            let (r0, r1) = band(row, width, h)?;
            let (r0, r1) = (r0 as f64, r1 as f64);
            [(0.0, r0), (w as f64, r0), (w as f64, r1), (0.0, r1)]
        }
        LineRoi::Vertical(x) => {
            let col = placement.to_pixel(PointD::new(x, placement.origin.1)).x;
            let (c0, c1) = band(col, width, w)?;
            let (c0, c1) = (c0 as f64, c1 as f64);
            [(c0, 0.0), (c1, 0.0), (c1, h as f64), (c0, h as f64)]
        }
        LineRoi::Segment(s, e) => {
            let a = placement.to_pixel(s);
            let b = placement.to_pixel(e);
            let (_, n, _) = frame(a, b);
            let half = width as f64 / 2.0;
            [
                (a.x + n.x * half, a.y + n.y * half),
                (b.x + n.x * half, b.y + n.y * half),
                (b.x - n.x * half, b.y - n.y * half),
                (a.x - n.x * half, a.y - n.y * half),
            ]
        }
    };
    Ok(corners.map(|(x, y)| placement.to_plot(PointD::new(x, y))))
}

/// Plot-space outline of the pixels a profile is computed from.
///
/// One closed quadrilateral per profile, emitted on path 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileArea {
    quads: Vec<[PointD; 4]>,
    quad: usize,
    corner: usize,
}

impl ProfileArea {
    /// Compute the area `roi` covers over an image of the given shape.
    pub fn new(
        roi: &ProfileRoi,
        placement: &Placement,
        width: usize,
        height: usize,
        opts: &ProfileOptions,
    ) -> Result<Self> {
        let quads = roi
            .lines()
            .into_iter()
            .map(|line| area_quad(line, placement, width, height, opts))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            quads,
            quad: 0,
            corner: 0,
        })
    }

    pub fn for_image(roi: &ProfileRoi, image: &ImageData, opts: &ProfileOptions) -> Result<Self> {
        Self::new(roi, image.placement(), image.width(), image.height(), opts)
    }

    pub fn quads(&self) -> &[[PointD; 4]] {
        &self.quads
    }
}

impl VertexSource for ProfileArea {
    fn rewind(&mut self, path_id: u32) {
        self.quad = if path_id == 0 { 0 } else { self.quads.len() };
        self.corner = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let Some(q) = self.quads.get(self.quad) else {
            return PATH_CMD_STOP;
        };
        if self.corner == 4 {
            self.quad += 1;
            self.corner = 0;
            return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE;
        }
        *x = q[self.corner].x;
        *y = q[self.corner].y;
        self.corner += 1;
        if self.corner == 1 {
            PATH_CMD_MOVE_TO
        } else {
            PATH_CMD_LINE_TO
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
