//! Foundation geometry types and rounding helpers.
//!
//! Points and rectangles shared by the layout code, both renderers and the
//! scanline rasterizer.

// ============================================================================
// Rounding
// ============================================================================

/// Round a double to the nearest unsigned integer (round half up).
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

/// Round to one decimal place, the precision of emitted path coordinates.
#[inline]
pub fn round_tenth(v: f64) -> f64 {
    (v * 10.0 + 0.5).floor() / 10.0
}

pub const PI: f64 = std::f64::consts::PI;

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two corner points.
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

    /// Copy with corners swapped so that x1 <= x2 and y1 <= y2.
    pub fn normalized(mut self) -> Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }
}

impl Rect<i32> {
    /// Rectangle of `width` x `height` with its top-left corner at the origin.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Width, zero for inverted rectangles.
    pub fn width(&self) -> u32 {
        if self.x2 > self.x1 {
            self.x2.abs_diff(self.x1)
        } else {
            0
        }
    }

    /// Height, zero for inverted rectangles.
    pub fn height(&self) -> u32 {
        if self.y2 > self.y1 {
            self.y2.abs_diff(self.y1)
        } else {
            0
        }
    }

    /// Side length of the largest square that fits.
    pub fn square_size(&self) -> u32 {
        self.width().min(self.height())
    }
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

pub type PointD = PointBase<f64>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uround() {
        assert_eq!(uround(0.49), 0);
        assert_eq!(uround(2.5), 3);
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(1.04), 1.0);
        assert_eq!(round_tenth(1.06), 1.1);
        assert_eq!(round_tenth(12.345), 12.3);
        assert_eq!(round_tenth(-0.04), 0.0);
    }

    #[test]
    fn test_rect_normalize() {
        let r = RectI::new(10, 20, 0, 5).normalized();
        assert_eq!(r, RectI::new(0, 5, 10, 20));
    }

    #[test]
    fn test_rect_size() {
        let r = RectI::new(5, 10, 45, 30);
        assert_eq!(r.width(), 40);
        assert_eq!(r.height(), 20);
        assert_eq!(r.square_size(), 20);

        let inverted = RectI::new(10, 10, 0, 0);
        assert_eq!(inverted.width(), 0);
        assert_eq!(inverted.square_size(), 0);
    }

    #[test]
    fn test_rect_size_full_range() {
        let r = RectI::new(i32::MIN, -5, i32::MAX, 5);
        assert_eq!(r.width(), u32::MAX);
        assert_eq!(r.height(), 10);
        assert_eq!(RectI::new(i32::MAX, 0, i32::MIN, 0).width(), 0);
    }

    #[test]
    fn test_with_size() {
        let r = RectI::with_size(64, 32);
        assert_eq!(r, RectI::new(0, 0, 64, 32));
    }
}
