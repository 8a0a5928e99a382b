//! Foundation types shared by every geometry producer in the crate.
//!
//! Geometry leaves this crate as a stream of path commands: a drawing
//! backend rewinds a [`VertexSource`] and pulls `(x, y, command)` triples
//! until it sees [`PATH_CMD_STOP`]. Stair-step histograms, profile areas
//! and bounding boxes all speak this protocol.

// ============================================================================
// Path commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;
pub const PATH_CMD_END_POLY: u32 = 0x0F;
pub const PATH_CMD_MASK: u32 = 0x0F;

// ============================================================================
// Path flags
// ============================================================================

pub const PATH_FLAGS_NONE: u32 = 0;
pub const PATH_FLAGS_CCW: u32 = 0x10;
pub const PATH_FLAGS_CW: u32 = 0x20;
pub const PATH_FLAGS_CLOSE: u32 = 0x40;

/// Returns `true` if `c` carries a coordinate (move_to or line_to).
#[inline]
pub fn is_vertex(c: u32) -> bool {
    (PATH_CMD_MOVE_TO..PATH_CMD_END_POLY).contains(&c)
}

#[inline]
pub fn is_stop(c: u32) -> bool {
    c == PATH_CMD_STOP
}

#[inline]
pub fn is_move_to(c: u32) -> bool {
    c == PATH_CMD_MOVE_TO
}

#[inline]
pub fn is_line_to(c: u32) -> bool {
    c == PATH_CMD_LINE_TO
}

/// Returns `true` if `c` is an end_poly command (with any flags).
#[inline]
pub fn is_end_poly(c: u32) -> bool {
    (c & PATH_CMD_MASK) == PATH_CMD_END_POLY
}

/// Returns `true` if `c` closes the current polygon.
#[inline]
pub fn is_close(c: u32) -> bool {
    (c & !(PATH_FLAGS_CW | PATH_FLAGS_CCW)) == (PATH_CMD_END_POLY | PATH_FLAGS_CLOSE)
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point in plot (data) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &PointD) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for PointD {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned rectangle defined by two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Swap corners so that x1 <= x2 and y1 <= y2.
    pub fn normalize(&mut self) -> &Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns `true` if the point (x, y) lies inside or on the border.
    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Grow this rectangle so that it also covers `r`.
    pub fn unite(&mut self, r: &Self) {
        if r.x1 < self.x1 {
            self.x1 = r.x1;
        }
        if r.y1 < self.y1 {
            self.y1 = r.y1;
        }
        if r.x2 > self.x2 {
            self.x2 = r.x2;
        }
        if r.y2 > self.y2 {
            self.y2 = r.y2;
        }
    }
}

/// Rectangle with `f64` coordinates, the unit of plot-space bounds.
pub type RectD = Rect<f64>;

// ============================================================================
// VertexSource trait
// ============================================================================

/// A rewindable stream of path vertices.
///
/// Every geometry producer in the crate implements this trait so that a
/// drawing backend can consume it without knowing where it came from.
pub trait VertexSource {
    /// Reset to the beginning of the given path (0 for the first/only path).
    fn rewind(&mut self, path_id: u32);

    /// Write the next vertex to `x` and `y` and return its path command.
    /// Returns `PATH_CMD_STOP` when iteration is complete.
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

/// Lets pipeline stages borrow their source instead of owning it.
impl<T: VertexSource> VertexSource for &mut T {
    fn rewind(&mut self, path_id: u32) {
        (*self).rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        (*self).vertex(x, y)
    }
}

/// Drain path 0 of a vertex source into `(x, y, cmd)` triples, stop excluded.
pub fn collect_vertices(vs: &mut dyn VertexSource) -> Vec<(f64, f64, u32)> {
    let mut out = Vec::new();
    let (mut x, mut y) = (0.0, 0.0);
    vs.rewind(0);
    loop {
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        out.push((x, y, cmd));
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_queries() {
        assert!(is_vertex(PATH_CMD_MOVE_TO));
        assert!(is_vertex(PATH_CMD_LINE_TO));
        assert!(!is_vertex(PATH_CMD_STOP));
        assert!(!is_vertex(PATH_CMD_END_POLY));
        assert!(is_end_poly(PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
        assert!(is_close(PATH_CMD_END_POLY | PATH_FLAGS_CLOSE | PATH_FLAGS_CCW));
        assert!(!is_close(PATH_CMD_END_POLY));
        assert!(is_line_to(PATH_CMD_LINE_TO));
        assert!(is_move_to(PATH_CMD_MOVE_TO));
    }

    #[test]
    fn test_rect_normalize_and_unite() {
        let mut r = RectD::new(5.0, 4.0, 1.0, 2.0);
        assert!(!r.is_valid());
        r.normalize();
        assert_eq!(r, RectD::new(1.0, 2.0, 5.0, 4.0));
        r.unite(&RectD::new(-1.0, 3.0, 2.0, 10.0));
        assert_eq!(r, RectD::new(-1.0, 2.0, 5.0, 10.0));
        assert!(r.hit_test(0.0, 5.0));
        assert!(!r.hit_test(6.0, 5.0));
    }

    #[test]
    fn test_point_distance() {
        let a = PointD::new(0.0, 0.0);
        let b = PointD::from((3.0, 4.0));
        assert!((a.distance(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_collect_vertices_via_mut_ref() {
        struct Two(usize);
        impl VertexSource for Two {
            fn rewind(&mut self, _: u32) {
                self.0 = 0;
            }
            fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
                self.0 += 1;
                *x = self.0 as f64;
                *y = 0.0;
                match self.0 {
                    1 => PATH_CMD_MOVE_TO,
                    2 => PATH_CMD_LINE_TO,
                    _ => PATH_CMD_STOP,
                }
            }
        }
        let mut src = Two(7);
        let mut borrowed = &mut src;
        let v = collect_vertices(&mut borrowed);
        assert_eq!(v, vec![(1.0, 0.0, PATH_CMD_MOVE_TO), (2.0, 0.0, PATH_CMD_LINE_TO)]);
    }
}
