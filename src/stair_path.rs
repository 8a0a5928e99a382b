//! Stair-step vertex source.
//!
//! Feeds a [`StairSteps`] outline to a drawing backend through the
//! [`VertexSource`] protocol, either as an open polyline (stroked histogram)
//! or as a closed polygon dropped onto a baseline (filled histogram).

use crate::basics::{
    VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
    PATH_FLAGS_CLOSE,
};
use crate::histogram::StairSteps;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Start,
    Outline,
    BaselineEnd,
    EndPoly,
    Stop,
}

/// Vertex source over a histogram outline.
///
/// Path 0 is the outline; any other path id is empty.
#[derive(Debug, Clone)]
pub struct StairPath {
    steps: StairSteps,
    baseline: Option<f64>,
    index: usize,
    status: Status,
}

impl StairPath {
    /// Open polyline through every outline vertex.
    pub fn new(steps: StairSteps) -> Self {
        Self {
            steps,
            baseline: None,
            index: 0,
            status: Status::Stop,
        }
    }

    /// Closed polygon: baseline under the first edge, the outline, then
    /// baseline under the last edge.
    pub fn with_baseline(steps: StairSteps, baseline: f64) -> Self {
        Self {
            baseline: Some(baseline),
            ..Self::new(steps)
        }
    }

    pub fn steps(&self) -> &StairSteps {
        &self.steps
    }

    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    pub fn set_baseline(&mut self, baseline: Option<f64>) {
        self.baseline = baseline;
    }

    pub fn into_steps(self) -> StairSteps {
        self.steps
    }
}

impl VertexSource for StairPath {
    fn rewind(&mut self, path_id: u32) {
        self.index = 0;
        self.status = if path_id == 0 && !self.steps.is_empty() {
            Status::Start
        } else {
            Status::Stop
        };
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        loop {
            match self.status {
                Status::Start => {
                    self.status = Status::Outline;
                    if let Some(b) = self.baseline {
                        *x = self.steps.x()[0];
                        *y = b;
                        return PATH_CMD_MOVE_TO;
                    }
                }
                Status::Outline => {
                    if self.index >= self.steps.len() {
                        self.status = if self.baseline.is_some() {
                            Status::BaselineEnd
                        } else {
                            Status::Stop
                        };
                        continue;
                    }
                    *x = self.steps.x()[self.index];
                    *y = self.steps.y()[self.index];
                    let cmd = if self.index == 0 && self.baseline.is_none() {
                        PATH_CMD_MOVE_TO
                    } else {
                        PATH_CMD_LINE_TO
                    };
                    self.index += 1;
                    return cmd;
                }
                Status::BaselineEnd => {
                    self.status = Status::EndPoly;
                    *x = self.steps.x()[self.steps.len() - 1];
                    *y = self.baseline.unwrap_or_default();
                    return PATH_CMD_LINE_TO;
                }
                Status::EndPoly => {
                    self.status = Status::Stop;
                    return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE;
                }
                Status::Stop => return PATH_CMD_STOP,
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{collect_vertices, is_close};
    use crate::histogram::{histogram_value, HistogramType};

    fn two_bins() -> StairSteps {
        histogram_value(&[0.0, 1.0, 2.0], &[5.0, 6.0], HistogramType::Right).unwrap()
    }

    #[test]
    fn test_polyline() {
        let mut p = StairPath::new(two_bins());
        let v = collect_vertices(&mut p);
        assert_eq!(
            v,
            vec![
                (0.0, 5.0, PATH_CMD_MOVE_TO),
                (1.0, 5.0, PATH_CMD_LINE_TO),
                (1.0, 6.0, PATH_CMD_LINE_TO),
                (2.0, 6.0, PATH_CMD_LINE_TO),
            ]
        );
    }

    #[test]
    fn test_filled_polygon_closes_on_baseline() {
        let mut p = StairPath::with_baseline(two_bins(), 0.0);
        let v = collect_vertices(&mut p);
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], (0.0, 0.0, PATH_CMD_MOVE_TO));
        assert_eq!(v[1], (0.0, 5.0, PATH_CMD_LINE_TO));
        assert_eq!(v[5], (2.0, 0.0, PATH_CMD_LINE_TO));
        assert!(is_close(v[6].2));
    }

    #[test]
    fn test_rewind_restarts() {
        let mut p = StairPath::new(two_bins());
        let first = collect_vertices(&mut p);
        let second = collect_vertices(&mut p);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_and_unknown_path() {
        let mut p = StairPath::with_baseline(StairSteps::default(), 0.0);
        assert!(collect_vertices(&mut p).is_empty());

        let mut p = StairPath::new(two_bins());
        let (mut x, mut y) = (0.0, 0.0);
        p.rewind(1);
        assert_eq!(p.vertex(&mut x, &mut y), PATH_CMD_STOP);
    }

    #[test]
    fn test_drains_every_outline() {
        let x = [0.0, 1.0, 2.0, 4.0];
        let mut outlines: Vec<StairSteps> = HistogramType::ALL
            .iter()
            .map(|&t| histogram_value(&x, &[1.0, 2.0, 3.0, 4.0], t).unwrap())
            .collect();
        outlines.push(histogram_value(&x, &[1.0, 2.0, 3.0], HistogramType::Left).unwrap());
        for steps in outlines {
            assert_eq!(steps.x().len(), steps.y().len());
            let n = steps.len();
            let last = (steps.x()[n - 1], steps.y()[n - 1]);
            let mut p = StairPath::with_baseline(steps, 0.0);
            assert_eq!(collect_vertices(&mut p).len(), n + 3);
            p.set_baseline(None);
            let v = collect_vertices(&mut p);
            assert_eq!(v.len(), n);
            assert_eq!((v[n - 1].0, v[n - 1].1), last);
        }
    }

    #[test]
    fn test_stop_before_rewind() {
        let mut p = StairPath::new(two_bins());
        let (mut x, mut y) = (0.0, 0.0);
        assert_eq!(p.vertex(&mut x, &mut y), PATH_CMD_STOP);
    }
}
