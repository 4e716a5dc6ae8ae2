//! Shape catalog.
//!
//! Every identicon is assembled from a closed vocabulary of shapes. A shape
//! is a function from the cell size (and the occurrence index within its
//! category) to a [`Primitive`] in cell-local coordinates; placement and
//! rotation are applied later by [`Graphics`](crate::graphics::Graphics).
//!
//! Shapes are grouped into [`ShapeCategory`] entries. The process-wide
//! [`SHAPE_CATEGORIES`] table fixes which hash octets drive each
//! category's color, shape and rotation, and at which grid cells it repeats.

// ============================================================================
// Primitives
// ============================================================================

/// Drawable primitive in cell-local coordinates.
///
/// `invert` reverses the winding (polygons) or sweep direction (circles) so
/// that a primitive drawn over another cuts a hole in it.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Circle whose bounding box has its top-left corner at `(x, y)`.
    Circle {
        x: f64,
        y: f64,
        size: f64,
        invert: bool,
    },
    /// Closed polygon through `points` in order.
    Polygon { points: Vec<(f64, f64)>, invert: bool },
    /// Several primitives filled together as one shape.
    Composite(Vec<Primitive>),
}

impl Primitive {
    /// The empty shape.
    pub fn none() -> Self {
        Primitive::Composite(Vec::new())
    }

    pub fn circle(x: f64, y: f64, size: f64, invert: bool) -> Self {
        Primitive::Circle { x, y, size, invert }
    }

    pub fn polygon(points: &[(f64, f64)], invert: bool) -> Self {
        Primitive::Polygon {
            points: points.to_vec(),
            invert,
        }
    }

    pub fn rectangle(x: f64, y: f64, w: f64, h: f64, invert: bool) -> Self {
        Self::polygon(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)], invert)
    }

    /// Right triangle filling half of the `w` x `h` box. The box corner
    /// selected by `r` (0 top-right, then clockwise) is left out.
    pub fn triangle(x: f64, y: f64, w: f64, h: f64, r: usize, invert: bool) -> Self {
        let mut points = vec![(x + w, y), (x + w, y + h), (x, y + h), (x, y)];
        points.remove(r % 4);
        Primitive::Polygon { points, invert }
    }

    /// Diamond touching the midpoints of the `w` x `h` box.
    pub fn rhombus(x: f64, y: f64, w: f64, h: f64, invert: bool) -> Self {
        Self::polygon(
            &[
                (x + w / 2.0, y),
                (x + w, y + h / 2.0),
                (x + w / 2.0, y + h),
                (x, y + h / 2.0),
            ],
            invert,
        )
    }

    /// Returns `true` if drawing this primitive issues no draw calls.
    pub fn is_empty(&self) -> bool {
        match self {
            Primitive::Circle { .. } => false,
            Primitive::Polygon { points, .. } => points.is_empty(),
            Primitive::Composite(parts) => parts.iter().all(Primitive::is_empty),
        }
    }
}

// ============================================================================
// Shape definitions
// ============================================================================

/// Signature of a shape procedure: `(cell_size, occurrence_index)`.
pub type DrawFn = fn(f64, usize) -> Primitive;

/// A named shape procedure.
#[derive(Clone, Copy)]
pub struct ShapeDef {
    pub name: &'static str,
    draw: DrawFn,
}

impl ShapeDef {
    pub const fn new(name: &'static str, draw: DrawFn) -> Self {
        Self { name, draw }
    }

    /// Geometry of this shape in a `cell` x `cell` square for the
    /// `occurrence`-th placement within its category.
    pub fn draw(&self, cell: f64, occurrence: usize) -> Primitive {
        (self.draw)(cell, occurrence)
    }
}

impl core::fmt::Debug for ShapeDef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ShapeDef").field(&self.name).finish()
    }
}

impl PartialEq for ShapeDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[inline]
fn trunc(v: f64) -> f64 {
    v.floor()
}

fn cut_corner(cell: f64, _: usize) -> Primitive {
    let k = cell * 0.42;
    Primitive::polygon(
        &[
            (0.0, 0.0),
            (cell, 0.0),
            (cell, cell - k * 2.0),
            (cell - k, cell),
            (0.0, cell),
        ],
        false,
    )
}

fn sail(cell: f64, _: usize) -> Primitive {
    let w = trunc(cell * 0.5);
    let h = trunc(cell * 0.8);
    Primitive::triangle(cell - w, 0.0, w, h, 2, false)
}

fn center_square(cell: f64, _: usize) -> Primitive {
    let w = trunc(cell / 3.0);
    Primitive::rectangle(w, w, cell - w, cell - w, false)
}

fn offset_square(cell: f64, _: usize) -> Primitive {
    let inner = cell * 0.1;
    let outer = if cell < 6.0 {
        1.0
    } else if cell < 8.0 {
        2.0
    } else {
        trunc(cell * 0.25)
    };
    let inner = if inner > 1.0 {
        trunc(inner)
    } else if inner > 0.5 {
        1.0
    } else {
        inner
    };
    Primitive::rectangle(
        outer,
        outer,
        cell - inner - outer,
        cell - inner - outer,
        false,
    )
}

fn dot(cell: f64, _: usize) -> Primitive {
    let m = trunc(cell * 0.15);
    let w = trunc(cell * 0.5);
    Primitive::circle(cell - w - m, cell - w - m, w, false)
}

fn square_with_triangle_hole(cell: f64, _: usize) -> Primitive {
    let inner = cell * 0.1;
    let mut outer = inner * 4.0;
    if outer > 3.0 {
        outer = trunc(outer);
    }
    Primitive::Composite(vec![
        Primitive::rectangle(0.0, 0.0, cell, cell, false),
        Primitive::polygon(
            &[
                (outer, outer),
                (cell - inner, outer),
                (outer + (cell - outer - inner) / 2.0, cell - inner),
            ],
            true,
        ),
    ])
}

fn notched_square(cell: f64, _: usize) -> Primitive {
    Primitive::polygon(
        &[
            (0.0, 0.0),
            (cell, 0.0),
            (cell, cell * 0.7),
            (cell * 0.4, cell * 0.4),
            (cell * 0.7, cell),
            (0.0, cell),
        ],
        false,
    )
}

fn quarter_triangle(cell: f64, _: usize) -> Primitive {
    let half = cell / 2.0;
    Primitive::triangle(half, half, half, half, 3, false)
}

fn stair(cell: f64, _: usize) -> Primitive {
    let half = cell / 2.0;
    Primitive::Composite(vec![
        Primitive::rectangle(0.0, 0.0, cell, half, false),
        Primitive::rectangle(0.0, half, half, half, false),
        Primitive::triangle(half, half, half, half, 1, false),
    ])
}

fn frame(cell: f64, _: usize) -> Primitive {
    let inner = cell * 0.14;
    let outer = if cell < 4.0 {
        1.0
    } else if cell < 6.0 {
        2.0
    } else {
        trunc(cell * 0.35)
    };
    let inner = if cell < 8.0 { inner } else { trunc(inner) };
    Primitive::Composite(vec![
        Primitive::rectangle(0.0, 0.0, cell, cell, false),
        Primitive::rectangle(
            outer,
            outer,
            cell - outer - inner,
            cell - outer - inner,
            true,
        ),
    ])
}

fn square_with_round_hole(cell: f64, _: usize) -> Primitive {
    let inner = cell * 0.12;
    let outer = inner * 3.0;
    Primitive::Composite(vec![
        Primitive::rectangle(0.0, 0.0, cell, cell, false),
        Primitive::circle(outer, outer, cell - inner - outer, true),
    ])
}

fn square_with_diamond_hole(cell: f64, _: usize) -> Primitive {
    let m = cell * 0.25;
    Primitive::Composite(vec![
        Primitive::rectangle(0.0, 0.0, cell, cell, false),
        Primitive::rhombus(m, m, cell - m, cell - m, true),
    ])
}

// Only the first occurrence draws; the circle spans all four center cells.
fn big_circle(cell: f64, occurrence: usize) -> Primitive {
    if occurrence != 0 {
        return Primitive::none();
    }
    let m = cell * 0.4;
    Primitive::circle(m, m, cell * 1.2, false)
}

fn corner_triangle(cell: f64, _: usize) -> Primitive {
    Primitive::triangle(0.0, 0.0, cell, cell, 0, false)
}

fn half_triangle(cell: f64, _: usize) -> Primitive {
    let half = cell / 2.0;
    Primitive::triangle(0.0, half, cell, half, 0, false)
}

fn diamond(cell: f64, _: usize) -> Primitive {
    Primitive::rhombus(0.0, 0.0, cell, cell, false)
}

fn small_circle(cell: f64, _: usize) -> Primitive {
    let m = cell / 6.0;
    Primitive::circle(m, m, cell - 2.0 * m, false)
}

/// Shapes drawn in the four center cells.
pub static CENTER_SHAPES: [ShapeDef; 14] = [
    ShapeDef::new("cut-corner", cut_corner),
    ShapeDef::new("sail", sail),
    ShapeDef::new("center-square", center_square),
    ShapeDef::new("offset-square", offset_square),
    ShapeDef::new("dot", dot),
    ShapeDef::new("square-triangle-hole", square_with_triangle_hole),
    ShapeDef::new("notched-square", notched_square),
    ShapeDef::new("quarter-triangle", quarter_triangle),
    ShapeDef::new("stair", stair),
    ShapeDef::new("frame", frame),
    ShapeDef::new("square-round-hole", square_with_round_hole),
    ShapeDef::new("quarter-triangle-alt", quarter_triangle),
    ShapeDef::new("square-diamond-hole", square_with_diamond_hole),
    ShapeDef::new("big-circle", big_circle),
];

/// Shapes drawn along the edges and in the corners.
pub static OUTER_SHAPES: [ShapeDef; 4] = [
    ShapeDef::new("corner-triangle", corner_triangle),
    ShapeDef::new("half-triangle", half_triangle),
    ShapeDef::new("diamond", diamond),
    ShapeDef::new("small-circle", small_circle),
];

// ============================================================================
// Categories
// ============================================================================

/// A group of shapes sharing one color, repeated over a fixed set of cells.
///
/// Octet indices address bytes of the hash with wrap-around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeCategory<'a> {
    pub name: &'static str,
    pub color_octet: usize,
    pub shape_octet: usize,
    /// `None` means every placement starts unrotated.
    pub rotation_octet: Option<usize>,
    pub shapes: &'a [ShapeDef],
    /// `(column, row)` cells of the 4x4 grid, in placement order.
    pub positions: &'a [(u32, u32)],
}

/// Grid size in cells along each axis.
pub const GRID_CELLS: u32 = 4;

/// The category table, in declaration (and rendering) order:
/// sides, corners, center.
pub static SHAPE_CATEGORIES: [ShapeCategory<'static>; 3] = [
    ShapeCategory {
        name: "sides",
        color_octet: 8,
        shape_octet: 2,
        rotation_octet: Some(3),
        shapes: &OUTER_SHAPES,
        positions: &[
            (1, 0),
            (2, 0),
            (2, 3),
            (1, 3),
            (0, 1),
            (3, 1),
            (3, 2),
            (0, 2),
        ],
    },
    ShapeCategory {
        name: "corners",
        color_octet: 9,
        shape_octet: 4,
        rotation_octet: Some(5),
        shapes: &OUTER_SHAPES,
        positions: &[(0, 0), (3, 0), (3, 3), (0, 3)],
    },
    ShapeCategory {
        name: "center",
        color_octet: 10,
        shape_octet: 1,
        rotation_octet: None,
        shapes: &CENTER_SHAPES,
        positions: &[(1, 1), (2, 1), (2, 2), (1, 2)],
    },
];

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn points(p: &Primitive) -> &[(f64, f64)] {
        match p {
            Primitive::Polygon { points, .. } => points,
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_rectangle() {
        let r = Primitive::rectangle(1.0, 2.0, 3.0, 4.0, false);
        assert_eq!(points(&r), &[(1.0, 2.0), (4.0, 2.0), (4.0, 6.0), (1.0, 6.0)]);
    }

    #[test]
    fn test_triangle_drops_rotated_corner() {
        let t0 = Primitive::triangle(0.0, 0.0, 2.0, 2.0, 0, false);
        assert_eq!(points(&t0), &[(2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        let t3 = Primitive::triangle(0.0, 0.0, 2.0, 2.0, 7, false);
        assert_eq!(points(&t3), &[(2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    }

    #[test]
    fn test_rhombus() {
        let r = Primitive::rhombus(0.0, 0.0, 4.0, 2.0, false);
        assert_eq!(points(&r), &[(2.0, 0.0), (4.0, 1.0), (2.0, 2.0), (0.0, 1.0)]);
    }

    #[test]
    fn test_big_circle_only_first_occurrence() {
        let shape = &CENTER_SHAPES[13];
        assert!(!shape.draw(10.0, 0).is_empty());
        for occurrence in 1..4 {
            assert!(shape.draw(10.0, occurrence).is_empty());
        }
    }

    #[test]
    fn test_every_shape_draws_something_at_occurrence_zero() {
        for shape in CENTER_SHAPES.iter().chain(OUTER_SHAPES.iter()) {
            assert!(!shape.draw(12.0, 0).is_empty(), "{}", shape.name);
        }
    }

    #[test]
    fn test_hole_shapes_are_inverted() {
        for idx in [5, 9, 10, 12] {
            match CENTER_SHAPES[idx].draw(20.0, 0) {
                Primitive::Composite(parts) => {
                    assert_eq!(parts.len(), 2);
                    let inner_inverted = match &parts[1] {
                        Primitive::Polygon { invert, .. } | Primitive::Circle { invert, .. } => {
                            *invert
                        }
                        Primitive::Composite(_) => false,
                    };
                    assert!(inner_inverted, "{}", CENTER_SHAPES[idx].name);
                }
                other => panic!("expected composite, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_offset_square_small_cells() {
        // Cells under 6px use a fixed 1px outer margin.
        let r = CENTER_SHAPES[3].draw(5.0, 0);
        assert_eq!(points(&r)[0], (1.0, 1.0));
    }

    #[test]
    fn test_category_table() {
        assert_eq!(SHAPE_CATEGORIES.len(), 3);
        assert_eq!(SHAPE_CATEGORIES[0].positions.len(), 8);
        assert_eq!(SHAPE_CATEGORIES[1].positions.len(), 4);
        assert_eq!(SHAPE_CATEGORIES[2].positions.len(), 4);
        assert_eq!(SHAPE_CATEGORIES[2].rotation_octet, None);
        for cat in &SHAPE_CATEGORIES {
            for &(col, row) in cat.positions {
                assert!(col < GRID_CELLS && row < GRID_CELLS);
            }
        }
    }

    #[test]
    fn test_categories_cover_grid_once() {
        let mut seen = [[false; 4]; 4];
        for cat in &SHAPE_CATEGORIES {
            for &(col, row) in cat.positions {
                assert!(!seen[row as usize][col as usize]);
                seen[row as usize][col as usize] = true;
            }
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }
}
