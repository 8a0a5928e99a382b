//! # plot-items
//!
//! Toolkit-independent core of a scientific plot item model.
//!
//! - **Histograms**: bin edges from left/center/right aligned samples and
//!   the stair-step outline drawn for them ([`histogram`]).
//! - **Geometry out**: every shape leaves the crate as a [`VertexSource`]
//!   path-command stream, ready for any rasterizer ([`stair_path`],
//!   [`profile::ProfileArea`]).
//! - **Curves**: data, error bars and display attributes, reduced to
//!   render-ready arrays ([`curve`]).
//! - **Profiles**: 1D profiles of images along horizontal, vertical,
//!   two-point and cross regions ([`profile`]).
//!
//! Nothing here draws, owns a window or emits events; hosts pull geometry
//! when they redraw.
//!
//! ```
//! use plot_items::histogram::{histogram_value, HistogramType};
//!
//! let steps = histogram_value(&[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0], HistogramType::Right)?;
//! assert_eq!(steps.x(), [0.0, 1.0, 1.0, 2.0, 2.0, 3.0]);
//! assert_eq!(steps.y(), [5.0, 5.0, 6.0, 6.0, 7.0, 7.0]);
//! # Ok::<(), plot_items::PlotError>(())
//! ```

// Foundation
pub mod basics;
pub mod bounding_rect;
pub mod color;
pub mod error;
pub mod style;

// Geometry
pub mod histogram;
pub mod stair_path;

// Items
pub mod config;
pub mod curve;
pub mod image;
pub mod profile;

pub use basics::{PointD, RectD, VertexSource};
pub use error::{PlotError, Result};
pub use histogram::{compute_edges, histogram_value, HistogramType, StairSteps};
