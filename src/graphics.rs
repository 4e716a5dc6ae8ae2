//! Renderer abstraction.
//!
//! [`Renderer`] is the output sink an icon is drawn into. It only sees
//! primitives in final canvas coordinates. [`Graphics`] sits on top of it,
//! owns the current cell [`Transform`], and dispatches shape
//! [`Primitive`]s to the sink.

use crate::basics::PointD;
use crate::color::Color;
use crate::shapes::Primitive;
use crate::transform::Transform;

// ============================================================================
// Renderer trait
// ============================================================================

/// Output sink for icon drawing.
///
/// Call order for one icon: `set_background` once, then for each shape
/// `begin_shape`, any number of `add_polygon` / `add_circle`, `end_shape`.
/// All primitives between `begin_shape` and `end_shape` form one filled
/// shape, so inverted primitives can cut holes in earlier ones.
pub trait Renderer {
    /// Paint the whole canvas one flat color.
    fn set_background(&mut self, color: Color);

    /// Start a shape filled with `color`.
    fn begin_shape(&mut self, color: Color);

    /// Finish the current shape.
    fn end_shape(&mut self);

    /// Add a closed polygon. Empty slices draw nothing.
    fn add_polygon(&mut self, points: &[PointD]);

    /// Add a circle whose bounding box has its top-left corner at
    /// `top_left`.
    fn add_circle(&mut self, top_left: PointD, diameter: f64, counter_clockwise: bool);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn set_background(&mut self, color: Color) {
        (**self).set_background(color)
    }

    fn begin_shape(&mut self, color: Color) {
        (**self).begin_shape(color)
    }

    fn end_shape(&mut self) {
        (**self).end_shape()
    }

    fn add_polygon(&mut self, points: &[PointD]) {
        (**self).add_polygon(points)
    }

    fn add_circle(&mut self, top_left: PointD, diameter: f64, counter_clockwise: bool) {
        (**self).add_circle(top_left, diameter, counter_clockwise)
    }
}

// ============================================================================
// Graphics
// ============================================================================

/// Transform-aware drawing front end over a [`Renderer`].
pub struct Graphics<R: Renderer> {
    renderer: R,
    /// Placement applied to every primitive drawn until it is changed.
    pub transform: Transform,
}

impl<R: Renderer> Graphics<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            transform: Transform::identity(),
        }
    }

    pub fn set_background(&mut self, color: Color) {
        self.renderer.set_background(color);
    }

    /// Draw one filled shape: `draw` issues primitives against `self`.
    pub fn render_shape<F>(&mut self, color: Color, draw: F)
    where
        F: FnOnce(&mut Self),
    {
        self.renderer.begin_shape(color);
        draw(self);
        self.renderer.end_shape();
    }

    /// Dispatch a primitive through the current transform.
    pub fn draw(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Circle { x, y, size, invert } => {
                let p = self.transform.transform_icon_point(*x, *y, *size, *size);
                self.renderer.add_circle(p, *size, *invert);
            }
            Primitive::Polygon { points, invert } => {
                let t = self.transform;
                let transformed: Vec<PointD> = if *invert {
                    points
                        .iter()
                        .rev()
                        .map(|&(x, y)| t.transform_point(x, y))
                        .collect()
                } else {
                    points.iter().map(|&(x, y)| t.transform_point(x, y)).collect()
                };
                self.renderer.add_polygon(&transformed);
            }
            Primitive::Composite(parts) => {
                for part in parts {
                    self.draw(part);
                }
            }
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

// ============================================================================
// Tests
// ============================================================================
