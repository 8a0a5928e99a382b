//! Data bounds of vertex sources and sample series.
//!
//! Non-finite coordinates (NaN, ±inf) are skipped: plot data routinely
//! carries NaN gaps and they must not poison the data range.

use crate::basics::{is_stop, is_vertex, RectD, VertexSource};

#[derive(Default)]
struct Accumulator {
    rect: Option<RectD>,
}

impl Accumulator {
    fn add(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        match self.rect.as_mut() {
            Some(r) => r.unite(&RectD::new(x, y, x, y)),
            None => self.rect = Some(RectD::new(x, y, x, y)),
        }
    }
}

/// Bounding box of one path of a vertex source.
///
/// Returns `None` when the path has no finite vertex.
pub fn bounding_rect_single(vs: &mut dyn VertexSource, path_id: u32) -> Option<RectD> {
    let mut acc = Accumulator::default();
    let (mut x, mut y) = (0.0, 0.0);
    vs.rewind(path_id);
    loop {
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        if is_vertex(cmd) {
            acc.add(x, y);
        }
    }
    acc.rect
}

/// Bounding box of paired samples, up to the shorter of the two slices.
pub fn data_bounds(x: &[f64], y: &[f64]) -> Option<RectD> {
    let mut acc = Accumulator::default();
    for (&px, &py) in x.iter().zip(y) {
        acc.add(px, py);
    }
    acc.rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::{histogram_value, HistogramType};
    use crate::stair_path::StairPath;

    #[test]
    fn test_bounds_of_stair_path() {
        let steps =
            histogram_value(&[0.0, 1.0, 2.0], &[3.0, -1.0, 7.0], HistogramType::Center).unwrap();
        let mut p = StairPath::new(steps);
        let r = bounding_rect_single(&mut p, 0).unwrap();
        assert!((r.x1 + 0.5).abs() < 1e-10);
        assert!((r.x2 - 2.5).abs() < 1e-10);
        assert!((r.y1 + 1.0).abs() < 1e-10);
        assert!((r.y2 - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_filled_path_includes_baseline() {
        let steps = histogram_value(&[0.0, 1.0], &[3.0], HistogramType::Left).unwrap();
        let mut p = StairPath::with_baseline(steps, 0.0);
        let r = bounding_rect_single(&mut p, 0).unwrap();
        assert_eq!(r, RectD::new(0.0, 0.0, 1.0, 3.0));
    }

    #[test]
    fn test_data_bounds_skips_non_finite() {
        let x = [f64::NAN, 1.0, 2.0, 3.0];
        let y = [0.0, 5.0, f64::INFINITY, -2.0];
        assert_eq!(data_bounds(&x, &y), Some(RectD::new(1.0, -2.0, 3.0, 5.0)));
    }

    #[test]
    fn test_empty_returns_none() {
        assert!(data_bounds(&[], &[]).is_none());
        assert!(data_bounds(&[f64::NAN], &[1.0]).is_none());
        let mut p = StairPath::new(Default::default());
        assert!(bounding_rect_single(&mut p, 0).is_none());
    }
}
