//! Curve item model.
//!
//! A [`Curve`] holds a sample series and its display attributes. It does
//! not draw anything: [`Curve::render_data`] turns the current state into
//! the arrays a backend strokes, and [`Curve::stair_path`] gives the
//! histogram outline as a vertex source.
//!
//! Setters return `true` when the stored value actually changed; each such
//! change bumps [`Curve::revision`], which a host can compare against the
//! revision it last rendered.

use log::warn;

use crate::basics::RectD;
use crate::bounding_rect::{bounding_rect_single, data_bounds};
use crate::color::Rgba8;
use crate::config::PlotDefaults;
use crate::error::{PlotError, Result};
use crate::histogram::{histogram_value, HistogramType};
use crate::stair_path::StairPath;
use crate::style::{LineStyle, Symbol, YAxis};

/// Error bar extent around each point.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBars {
    /// Same half-extent for every point.
    Constant(f64),
    /// One symmetric half-extent per point.
    PerPoint(Vec<f64>),
    /// Separate extents below and above each point.
    Asymmetric { minus: Vec<f64>, plus: Vec<f64> },
}

impl ErrorBars {
    fn check(&self, points: usize) -> Result<()> {
        let bad = |got: usize| PlotError::ErrorBarLength {
            expected: points,
            got,
        };
        match self {
            Self::Constant(_) => Ok(()),
            Self::PerPoint(v) if v.len() != points => Err(bad(v.len())),
            Self::Asymmetric { minus, .. } if minus.len() != points => Err(bad(minus.len())),
            Self::Asymmetric { plus, .. } if plus.len() != points => Err(bad(plus.len())),
            _ => Ok(()),
        }
    }

    fn select(&self, keep: &[bool]) -> Self {
        match self {
            Self::Constant(e) => Self::Constant(*e),
            Self::PerPoint(v) => Self::PerPoint(select(v, keep)),
            Self::Asymmetric { minus, plus } => Self::Asymmetric {
                minus: select(minus, keep),
                plus: select(plus, keep),
            },
        }
    }
}

fn select(values: &[f64], keep: &[bool]) -> Vec<f64> {
    values
        .iter()
        .zip(keep)
        .filter_map(|(&v, &k)| k.then_some(v))
        .collect()
}

/// Samples and error bars after axis filtering.
type Displayed = (Vec<f64>, Vec<f64>, Option<ErrorBars>, Option<ErrorBars>);

/// Everything a backend needs to draw a curve once.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveRenderData {
    pub legend: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub x_error: Option<ErrorBars>,
    pub y_error: Option<ErrorBars>,
    pub color: Rgba8,
    pub line_width: f64,
    pub line_style: LineStyle,
    pub symbol: Symbol,
    pub symbol_size: f64,
    pub y_axis: YAxis,
    pub fill: bool,
    pub alpha: f64,
    pub z: i32,
    pub selectable: bool,
}

/// Store `value` in `slot` if it differs, bumping `revision`.
fn update<T: PartialEq>(slot: &mut T, value: T, revision: &mut u64) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    *revision += 1;
    true
}

#[derive(Debug, Clone)]
pub struct Curve {
    legend: String,
    x: Vec<f64>,
    y: Vec<f64>,
    x_error: Option<ErrorBars>,
    y_error: Option<ErrorBars>,
    color: Rgba8,
    highlight_color: Rgba8,
    highlighted: bool,
    line_width: f64,
    line_style: LineStyle,
    symbol: Symbol,
    symbol_size: f64,
    y_axis: YAxis,
    fill: bool,
    z: i32,
    selectable: bool,
    visible: bool,
    alpha: f64,
    histogram_type: Option<HistogramType>,
    revision: u64,
}

impl Curve {
    pub const DEFAULT_Z: i32 = 1;

    pub fn new(legend: impl Into<String>) -> Self {
        Self::with_defaults(legend, &PlotDefaults::default())
    }

    pub fn with_defaults(legend: impl Into<String>, defaults: &PlotDefaults) -> Self {
        Self {
            legend: legend.into(),
            x: Vec::new(),
            y: Vec::new(),
            x_error: None,
            y_error: None,
            color: defaults.color,
            highlight_color: defaults.highlight_color,
            highlighted: false,
            line_width: defaults.line_width,
            line_style: defaults.line_style,
            symbol: defaults.symbol,
            symbol_size: defaults.symbol_size,
            y_axis: YAxis::Left,
            fill: false,
            z: Self::DEFAULT_Z,
            selectable: true,
            visible: true,
            alpha: 1.0,
            histogram_type: defaults.histogram_type,
            revision: 0,
        }
    }

    pub fn legend(&self) -> &str {
        &self.legend
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ---------------------------------------------------------------
    // Data
    // ---------------------------------------------------------------

    /// Replace the samples and clear the error bars.
    ///
    /// `x` has one value per `y`, or one more when it holds bin edges.
    pub fn set_data(&mut self, x: Vec<f64>, y: Vec<f64>) -> Result<()> {
        if x.len() != y.len() && x.len() != y.len() + 1 {
            return Err(PlotError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        self.x = x;
        self.y = y;
        self.x_error = None;
        self.y_error = None;
        self.revision += 1;
        Ok(())
    }

    pub fn x_data(&self) -> &[f64] {
        &self.x
    }

    pub fn y_data(&self) -> &[f64] {
        &self.y
    }

    /// `true` when `x` holds bin edges rather than one value per point.
    pub fn has_edges(&self) -> bool {
        self.x.len() == self.y.len() + 1
    }

    pub fn set_x_error(&mut self, error: Option<ErrorBars>) -> Result<bool> {
        if let Some(e) = &error {
            e.check(self.y.len())?;
        }
        Ok(update(&mut self.x_error, error, &mut self.revision))
    }

    pub fn set_y_error(&mut self, error: Option<ErrorBars>) -> Result<bool> {
        if let Some(e) = &error {
            e.check(self.y.len())?;
        }
        Ok(update(&mut self.y_error, error, &mut self.revision))
    }

    pub fn x_error(&self) -> Option<&ErrorBars> {
        self.x_error.as_ref()
    }

    pub fn y_error(&self) -> Option<&ErrorBars> {
        self.y_error.as_ref()
    }

    // ---------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba8) -> bool {
        update(&mut self.color, color, &mut self.revision)
    }

    pub fn highlight_color(&self) -> Rgba8 {
        self.highlight_color
    }

    pub fn set_highlight_color(&mut self, color: Rgba8) -> bool {
        update(&mut self.highlight_color, color, &mut self.revision)
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) -> bool {
        update(&mut self.highlighted, highlighted, &mut self.revision)
    }

    /// Highlight color while highlighted, the plain color otherwise.
    pub fn current_color(&self) -> Rgba8 {
        if self.highlighted {
            self.highlight_color
        } else {
            self.color
        }
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: f64) -> bool {
        update(&mut self.line_width, width, &mut self.revision)
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn set_line_style(&mut self, style: LineStyle) -> bool {
        update(&mut self.line_style, style, &mut self.revision)
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn set_symbol(&mut self, symbol: Symbol) -> bool {
        update(&mut self.symbol, symbol, &mut self.revision)
    }

    pub fn symbol_size(&self) -> f64 {
        self.symbol_size
    }

    pub fn set_symbol_size(&mut self, size: f64) -> bool {
        update(&mut self.symbol_size, size, &mut self.revision)
    }

    pub fn y_axis(&self) -> YAxis {
        self.y_axis
    }

    pub fn set_y_axis(&mut self, axis: YAxis) -> bool {
        update(&mut self.y_axis, axis, &mut self.revision)
    }

    pub fn is_fill(&self) -> bool {
        self.fill
    }

    pub fn set_fill(&mut self, fill: bool) -> bool {
        update(&mut self.fill, fill, &mut self.revision)
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn set_z(&mut self, z: i32) -> bool {
        update(&mut self.z, z, &mut self.revision)
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn set_selectable(&mut self, selectable: bool) -> bool {
        update(&mut self.selectable, selectable, &mut self.revision)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) -> bool {
        update(&mut self.visible, visible, &mut self.revision)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Opacity, clamped to [0, 1].
    pub fn set_alpha(&mut self, alpha: f64) -> bool {
        update(&mut self.alpha, alpha.clamp(0.0, 1.0), &mut self.revision)
    }

    /// `None` draws the samples as a plain curve.
    pub fn histogram_type(&self) -> Option<HistogramType> {
        self.histogram_type
    }

    pub fn set_histogram_type(&mut self, histogram_type: Option<HistogramType>) -> bool {
        update(&mut self.histogram_type, histogram_type, &mut self.revision)
    }

    // ---------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------

    /// Samples drawable on the given axis scales.
    ///
    /// Points with a non-positive (or NaN) coordinate on a logarithmic axis
    /// are dropped. Edge data is kept whole: dropping one edge would merge
    /// two bins.
    fn displayed(&self, log_x: bool, log_y: bool) -> Displayed {
        if self.has_edges() || !(log_x || log_y) {
            return (
                self.x.clone(),
                self.y.clone(),
                self.x_error.clone(),
                self.y_error.clone(),
            );
        }
        let keep: Vec<bool> = self
            .x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| (!log_x || x > 0.0) && (!log_y || y > 0.0))
            .collect();
        (
            select(&self.x, &keep),
            select(&self.y, &keep),
            self.x_error.as_ref().map(|e| e.select(&keep)),
            self.y_error.as_ref().map(|e| e.select(&keep)),
        )
    }

    /// Render-ready arrays, or `None` when there is nothing to draw.
    ///
    /// Histogram curves are expanded to their stair-step outline and lose
    /// their error bars. On a log axis the edges are derived from the
    /// surviving samples, so a dropped sample widens its neighbour's bin.
    /// Plain curves given bin edges are drawn at the bin centres.
    pub fn render_data(&self, log_x: bool, log_y: bool) -> Result<Option<CurveRenderData>> {
        let (mut x, mut y, mut x_error, mut y_error) = self.displayed(log_x, log_y);
        if y.is_empty() {
            return Ok(None);
        }

        if let Some(t) = self.histogram_type {
            (x, y) = histogram_value(&x, &y, t)?.into_parts();
            if x_error.is_some() || y_error.is_some() {
                warn!(
                    "curve {:?}: error bars are not displayed in histogram mode",
                    self.legend
                );
            }
            x_error = None;
            y_error = None;
        } else if x.len() == y.len() + 1 {
            x = x.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
        }

        Ok(Some(CurveRenderData {
            legend: self.legend.clone(),
            x,
            y,
            x_error,
            y_error,
            color: self.current_color(),
            line_width: self.line_width,
            line_style: self.line_style,
            symbol: self.symbol,
            symbol_size: self.symbol_size,
            y_axis: self.y_axis,
            fill: self.fill,
            alpha: self.alpha,
            z: self.z,
            selectable: self.selectable,
        }))
    }

    /// Histogram outline as a vertex source, closed onto `y = 0` when the
    /// curve is filled. `None` for plain curves or empty data.
    pub fn stair_path(&self, log_x: bool, log_y: bool) -> Result<Option<StairPath>> {
        let Some(t) = self.histogram_type else {
            return Ok(None);
        };
        let (x, y, _, _) = self.displayed(log_x, log_y);
        if y.is_empty() {
            return Ok(None);
        }
        let steps = histogram_value(&x, &y, t)?;
        Ok(Some(if self.fill && !log_y {
            StairPath::with_baseline(steps, 0.0)
        } else {
            StairPath::new(steps)
        }))
    }

    /// Data range of what is drawn, ignoring non-finite values.
    pub fn bounds(&self, log_x: bool, log_y: bool) -> Result<Option<RectD>> {
        if let Some(mut path) = self.stair_path(log_x, log_y)? {
            return Ok(bounding_rect_single(&mut path, 0));
        }
        Ok(self
            .render_data(log_x, log_y)?
            .and_then(|d| data_bounds(&d.x, &d.y)))
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::new("")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Curve::new("c1");
        assert_eq!(c.legend(), "c1");
        assert_eq!(c.line_width(), 1.0);
        assert_eq!(c.line_style(), LineStyle::Solid);
        assert_eq!(c.symbol(), Symbol::None);
        assert_eq!(c.y_axis(), YAxis::Left);
        assert_eq!(c.z(), 1);
        assert!(c.is_selectable());
        assert!(c.is_visible());
        assert!(!c.is_fill());
        assert_eq!(c.highlight_color(), Rgba8::new(0, 0, 0, 255));
        assert_eq!(c.histogram_type(), None);
        assert_eq!(c.revision(), 0);
    }

    #[test]
    fn test_setters_report_changes() {
        let mut c = Curve::default();
        assert!(c.set_line_width(2.0));
        assert!(!c.set_line_width(2.0));
        assert!(c.set_line_style(LineStyle::Dotted));
        assert!(c.set_histogram_type(Some(HistogramType::Left)));
        assert!(!c.set_histogram_type(Some(HistogramType::Left)));
        assert!(c.set_y_axis(YAxis::Right));
        assert_eq!(c.revision(), 4);
        // Clamped to the current 1.0: no change.
        assert!(!c.set_alpha(3.0));
        assert!(c.set_alpha(-1.0));
        assert_eq!(c.alpha(), 0.0);
        assert_eq!(c.revision(), 5);
    }

    #[test]
    fn test_current_color_follows_highlight() {
        let mut c = Curve::new("c");
        let red: Rgba8 = "red".parse().unwrap();
        let blue: Rgba8 = "blue".parse().unwrap();
        c.set_color(red);
        c.set_highlight_color(blue);
        assert_eq!(c.current_color(), red);
        assert!(c.set_highlighted(true));
        assert_eq!(c.current_color(), blue);
        assert_eq!(c.render_data(false, false).unwrap(), None);
    }

    #[test]
    fn test_set_data_validates_lengths() {
        let mut c = Curve::new("c");
        assert!(c.set_data(vec![0.0, 1.0], vec![1.0, 2.0]).is_ok());
        assert!(!c.has_edges());
        assert!(c.set_data(vec![0.0, 1.0, 2.0], vec![1.0, 2.0]).is_ok());
        assert!(c.has_edges());
        assert!(matches!(
            c.set_data(vec![0.0], vec![1.0, 2.0]),
            Err(PlotError::LengthMismatch { x: 1, y: 2 })
        ));
        // Failed update keeps the previous data.
        assert_eq!(c.x_data().len(), 3);
    }

    #[test]
    fn test_error_bar_validation() {
        let mut c = Curve::new("c");
        c.set_data(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
        assert!(c.set_y_error(Some(ErrorBars::Constant(0.5))).unwrap());
        assert!(c
            .set_x_error(Some(ErrorBars::PerPoint(vec![0.1, 0.2, 0.3])))
            .unwrap());
        let bad = ErrorBars::Asymmetric {
            minus: vec![0.1; 3],
            plus: vec![0.1; 2],
        };
        assert!(matches!(
            c.set_y_error(Some(bad)),
            Err(PlotError::ErrorBarLength {
                expected: 3,
                got: 2
            })
        ));
        c.set_data(vec![0.0], vec![1.0]).unwrap();
        assert!(c.y_error().is_none());
    }

    #[test]
    fn test_render_plain_curve_keeps_errors() {
        let mut c = Curve::new("c");
        c.set_data(vec![0.0, 1.0], vec![3.0, 4.0]).unwrap();
        c.set_y_error(Some(ErrorBars::Constant(1.0))).unwrap();
        let d = c.render_data(false, false).unwrap().unwrap();
        assert_eq!(d.x, vec![0.0, 1.0]);
        assert_eq!(d.y_error, Some(ErrorBars::Constant(1.0)));
    }

    #[test]
    fn test_render_histogram_drops_errors() {
        let mut c = Curve::new("h");
        c.set_data(vec![0.0, 1.0, 2.0], vec![5.0, 6.0, 7.0]).unwrap();
        c.set_y_error(Some(ErrorBars::Constant(1.0))).unwrap();
        c.set_histogram_type(Some(HistogramType::Right));
        let d = c.render_data(false, false).unwrap().unwrap();
        assert_eq!(d.x, vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0]);
        assert_eq!(d.y, vec![5.0, 5.0, 6.0, 6.0, 7.0, 7.0]);
        assert!(d.y_error.is_none());
    }

    #[test]
    fn test_plain_curve_from_edges_uses_centres() {
        let mut c = Curve::new("e");
        c.set_data(vec![0.0, 2.0, 4.0], vec![1.0, 1.0]).unwrap();
        let d = c.render_data(false, false).unwrap().unwrap();
        assert_eq!(d.x, vec![1.0, 3.0]);
    }

    #[test]
    fn test_log_axes_drop_non_positive() {
        let mut c = Curve::new("log");
        c.set_data(vec![-1.0, 1.0, 2.0, 3.0], vec![1.0, 0.0, 2.0, 3.0])
            .unwrap();
        c.set_y_error(Some(ErrorBars::PerPoint(vec![0.1, 0.2, 0.3, 0.4])))
            .unwrap();
        let d = c.render_data(true, false).unwrap().unwrap();
        assert_eq!(d.x, vec![1.0, 2.0, 3.0]);
        let d = c.render_data(true, true).unwrap().unwrap();
        assert_eq!(d.x, vec![2.0, 3.0]);
        assert_eq!(d.y_error, Some(ErrorBars::PerPoint(vec![0.3, 0.4])));

        c.set_data(vec![-1.0, -2.0], vec![1.0, 2.0]).unwrap();
        assert!(c.render_data(true, false).unwrap().is_none());
    }

    #[test]
    fn test_log_axis_histogram_widens_neighbour_bin() {
        let mut c = Curve::new("hlog");
        c.set_data(vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 0.0, 7.0, 8.0])
            .unwrap();
        c.set_histogram_type(Some(HistogramType::Left));
        let d = c.render_data(false, false).unwrap().unwrap();
        assert_eq!(d.x, vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0]);

        // The zero sample goes; the bin ending at 3 now starts at 1.
        let d = c.render_data(false, true).unwrap().unwrap();
        assert_eq!(d.x, vec![-1.0, 1.0, 1.0, 3.0, 3.0, 4.0]);
        assert_eq!(d.y, vec![5.0, 5.0, 7.0, 7.0, 8.0, 8.0]);
    }

    #[test]
    fn test_stair_path_and_bounds() {
        let mut c = Curve::new("h");
        c.set_data(vec![1.0, 2.0, 3.0], vec![4.0, 8.0, 6.0]).unwrap();
        assert!(c.stair_path(false, false).unwrap().is_none());
        let r = c.bounds(false, false).unwrap().unwrap();
        assert_eq!(r, RectD::new(1.0, 4.0, 3.0, 8.0));

        c.set_histogram_type(Some(HistogramType::Center));
        let r = c.bounds(false, false).unwrap().unwrap();
        assert_eq!(r, RectD::new(0.5, 4.0, 3.5, 8.0));

        c.set_fill(true);
        let path = c.stair_path(false, false).unwrap().unwrap();
        assert_eq!(path.baseline(), Some(0.0));
        let r = c.bounds(false, false).unwrap().unwrap();
        assert_eq!(r, RectD::new(0.5, 0.0, 3.5, 8.0));
        // No baseline on a log y axis.
        let path = c.stair_path(false, true).unwrap().unwrap();
        assert_eq!(path.baseline(), None);
    }

    #[test]
    fn test_with_defaults() {
        let defaults = PlotDefaults {
            line_width: 3.0,
            line_style: LineStyle::Dashed,
            histogram_type: Some(HistogramType::Left),
            ..PlotDefaults::default()
        };
        let c = Curve::with_defaults("d", &defaults);
        assert_eq!(c.line_width(), 3.0);
        assert_eq!(c.line_style(), LineStyle::Dashed);
        assert_eq!(c.histogram_type(), Some(HistogramType::Left));
    }
}
