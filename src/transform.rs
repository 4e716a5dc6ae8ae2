//! Cell placement transform.
//!
//! Identicon shapes are drawn in the local coordinates of one grid cell and
//! placed with a translation plus a rotation in whole quarter turns. That is
//! a restricted affine transform: the 2x2 part is always a multiple of 90
//! degrees, so it is stored as a rotation index instead of a matrix and the
//! rotated primitive keeps its axis-aligned bounding box inside the cell.

use crate::basics::PointD;

/// Translation, cell size and quarter-turn rotation for shape primitives.
///
/// `transform_icon_point` maps a point of a `w` x `h` primitive drawn in a
/// `size` x `size` cell:
///
/// ```text
///   rotation 0:  (x + x0,            y + y0)
///   rotation 1:  (x0 + size - y - h, y0 + x)
///   rotation 2:  (x0 + size - x - w, y0 + size - y - h)
///   rotation 3:  (x0 + y,            y0 + size - x - w)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub rotation: u32,
}

impl Transform {
    /// Placement at `(x, y)` with the given cell size; `rotation` is taken
    /// modulo 4.
    pub fn new(x: f64, y: f64, size: f64, rotation: u32) -> Self {
        Self {
            x,
            y,
            size,
            rotation: rotation % 4,
        }
    }

    /// Identity placement (no offset, no rotation).
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 0)
    }

    /// Transform a point of a primitive whose local bounding box is `w` x `h`.
    ///
    /// Points (polygon vertices) pass `w = h = 0`. Circles pass their
    /// diameter so that the returned point is the top-left corner of the
    /// rotated bounding box.
    pub fn transform_icon_point(&self, x: f64, y: f64, w: f64, h: f64) -> PointD {
        let right = self.x + self.size;
        let bottom = self.y + self.size;
        match self.rotation {
            1 => PointD::new(right - y - h, self.y + x),
            2 => PointD::new(right - x - w, bottom - y - h),
            3 => PointD::new(self.x + y, bottom - x - w),
            _ => PointD::new(self.x + x, self.y + y),
        }
    }

    /// Transform a polygon vertex.
    #[inline]
    pub fn transform_point(&self, x: f64, y: f64) -> PointD {
        self.transform_icon_point(x, y, 0.0, 0.0)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

// ============================================================================
// Tests
// ============================================================================
