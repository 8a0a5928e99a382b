//! Image items that profiles are extracted from.
//!
//! Samples are stored row-major. Pixel `(col, row)` covers the plot-space
//! rectangle starting at `origin + (col, row) * scale` and extending by one
//! `scale` step in each direction.

use crate::basics::{PointD, RectD};
use crate::error::{PlotError, Result};

/// Placement of an image in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: (f64, f64),
    pub scale: (f64, f64),
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            origin: (0.0, 0.0),
            scale: (1.0, 1.0),
        }
    }
}

impl Placement {
    fn validate(&self) -> Result<()> {
        let (sx, sy) = self.scale;
        if sx == 0.0 || sy == 0.0 || !sx.is_finite() || !sy.is_finite() {
            return Err(PlotError::InvalidImage(format!(
                "scale must be finite and non-zero, got ({sx}, {sy})"
            )));
        }
        Ok(())
    }

    /// Plot coordinates to fractional pixel coordinates.
    pub fn to_pixel(&self, p: PointD) -> PointD {
        PointD::new(
            (p.x - self.origin.0) / self.scale.0,
            (p.y - self.origin.1) / self.scale.1,
        )
    }

    /// Fractional pixel coordinates to plot coordinates.
    pub fn to_plot(&self, p: PointD) -> PointD {
        PointD::new(
            self.origin.0 + p.x * self.scale.0,
            self.origin.1 + p.y * self.scale.1,
        )
    }
}

/// Scalar image, e.g. detector counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    width: usize,
    height: usize,
    data: Vec<f64>,
    placement: Placement,
}

impl ImageData {
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PlotError::InvalidImage(format!(
                "empty image {width}x{height}"
            )));
        }
        if data.len() != width * height {
            return Err(PlotError::InvalidImage(format!(
                "{width}x{height} image needs {} samples, got {}",
                width * height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            placement: Placement::default(),
        })
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.placement.origin = (x, y);
        self
    }

    pub fn with_scale(mut self, sx: f64, sy: f64) -> Result<Self> {
        let placement = Placement {
            scale: (sx, sy),
            ..self.placement
        };
        placement.validate()?;
        self.placement = placement;
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f64 {
        self.data[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    /// Bilinear sample at fractional pixel coordinates, pixel centres at
    /// integer + 0.5. NaN outside the image.
    pub fn sample_bilinear(&self, px: f64, py: f64) -> f64 {
        let fx = px - 0.5;
        let fy = py - 0.5;
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        if !(fx >= -0.5 && fy >= -0.5 && fx <= max_x + 0.5 && fy <= max_y + 0.5) {
            return f64::NAN;
        }
        let fx = fx.clamp(0.0, max_x);
        let fy = fy.clamp(0.0, max_y);
        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f64;
        let ty = fy - y0 as f64;
        let top = self.get(x0, y0) * (1.0 - tx) + self.get(x1, y0) * tx;
        let bottom = self.get(x0, y1) * (1.0 - tx) + self.get(x1, y1) * tx;
        top * (1.0 - ty) + bottom * ty
    }

    /// Plot-space extent of the image.
    pub fn bounds(&self) -> RectD {
        let p = &self.placement;
        let a = p.to_plot(PointD::new(0.0, 0.0));
        let b = p.to_plot(PointD::new(self.width as f64, self.height as f64));
        let mut r = RectD::new(a.x, a.y, b.x, b.y);
        r.normalize();
        r
    }
}

/// 8-bit RGB or RGBA image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRgba {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
    placement: Placement,
}

impl ImageRgba {
    /// `channels` must be 3 (RGB) or 4 (RGBA).
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(PlotError::InvalidImage(format!(
                "expected 3 or 4 channels, got {channels}"
            )));
        }
        if width == 0 || height == 0 || data.len() != width * height * channels {
            return Err(PlotError::InvalidImage(format!(
                "{width}x{height}x{channels} image cannot hold {} bytes",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
            placement: Placement::default(),
        })
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.placement.origin = (x, y);
        self
    }

    pub fn with_scale(mut self, sx: f64, sy: f64) -> Result<Self> {
        let placement = Placement {
            scale: (sx, sy),
            ..self.placement
        };
        placement.validate()?;
        self.placement = placement;
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    fn to_scalar(&self, data: Vec<f64>) -> ImageData {
        ImageData {
            width: self.width,
            height: self.height,
            data,
            placement: self.placement,
        }
    }

    /// One channel as a scalar image with the same placement.
    ///
    /// Panics if `index >= channels()`.
    pub fn channel(&self, index: usize) -> ImageData {
        assert!(index < self.channels, "channel {index} out of range");
        let data = self
            .data
            .chunks_exact(self.channels)
            .map(|px| px[index] as f64)
            .collect();
        self.to_scalar(data)
    }

    /// Perceived brightness: `0.21 R + 0.72 G + 0.07 B`.
    pub fn luminosity(&self) -> ImageData {
        let data = self
            .data
            .chunks_exact(self.channels)
            .map(|px| 0.21 * px[0] as f64 + 0.72 * px[1] as f64 + 0.07 * px[2] as f64)
            .collect();
        self.to_scalar(data)
    }
}
