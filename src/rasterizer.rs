//! Supersampled scanline polygon rasterizer.
//!
//! Accepts closed contours (`move_to` / `line_to` / `close_polygon`, or the
//! polygon and circle helpers), and converts them into per-pixel coverage
//! in [0, 1] using the even-odd fill rule.
//!
//! Every pixel row is sampled by `subsamples` horizontal sub-scanlines at
//! evenly spaced offsets. On each sub-scanline the crossings with all
//! non-horizontal edges are collected, sorted by x (stable, so ties keep
//! edge insertion order), and paired into spans. Spans contribute exact
//! fractional coverage horizontally; the vertical resolution is
//! `1 / subsamples`.

use log::trace;

use crate::basics::{uround, PointD, PI};

/// Sub-scanlines per pixel row unless configured otherwise.
pub const DEFAULT_SUBSAMPLES: u32 = 4;

// ============================================================================
// Edge
// ============================================================================

/// A directed polygon boundary segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Edge {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Horizontal edges never cross a sub-scanline.
    pub fn is_horizontal(&self) -> bool {
        self.y0 == self.y1
    }

    pub fn min_y(&self) -> f64 {
        self.y0.min(self.y1)
    }

    pub fn max_y(&self) -> f64 {
        self.y0.max(self.y1)
    }

    /// Half-open test `min_y <= y < max_y`, so a vertex shared by two edges
    /// is counted once.
    pub fn straddles(&self, y: f64) -> bool {
        y >= self.min_y() && y < self.max_y()
    }

    /// X coordinate where the edge crosses the horizontal line at `y`.
    pub fn x_at(&self, y: f64) -> f64 {
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }
}

/// Crossing of a sub-scanline with the edge at index `edge`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub edge: usize,
    pub x: f64,
}

// ============================================================================
// CoverageMask
// ============================================================================

/// Per-pixel coverage in [0, 1], row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMask {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl CoverageMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at `(x, y)`; zero outside the mask.
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn row(&self, y: u32) -> &[f32] {
        let w = self.width as usize;
        &self.data[y as usize * w..(y as usize + 1) * w]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Sum of all coverage values, an estimate of the filled area.
    pub fn total(&self) -> f64 {
        self.data.iter().map(|&c| c as f64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&c| c == 0.0)
    }
}

// ============================================================================
// ScanlineRasterizer
// ============================================================================

/// Even-odd polygon rasterizer over a `width` x `height` pixel grid.
pub struct ScanlineRasterizer {
    width: u32,
    height: u32,
    subsamples: u32,
    edges: Vec<Edge>,
    contour: Vec<PointD>,
    intersections: Vec<Intersection>,
}

impl ScanlineRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            subsamples: DEFAULT_SUBSAMPLES,
            edges: Vec::new(),
            contour: Vec::new(),
            intersections: Vec::new(),
        }
    }

    /// Set the number of sub-scanlines per pixel row (at least 1).
    pub fn with_subsamples(mut self, subsamples: u32) -> Self {
        self.subsamples = subsamples.max(1);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn subsamples(&self) -> u32 {
        self.subsamples
    }

    /// Discard all polygon data.
    pub fn reset(&mut self) {
        self.edges.clear();
        self.contour.clear();
    }

    /// Edges accumulated from closed contours (horizontal ones excluded).
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    // ========================================================================
    // Path building
    // ========================================================================

    /// Start a new contour, closing the previous one.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.close_polygon();
        self.contour.push(PointD::new(x, y));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.contour.push(PointD::new(x, y));
    }

    /// Close the current contour and convert it into edges.
    ///
    /// Contours with fewer than three non-degenerate segments enclose no
    /// area and are dropped.
    pub fn close_polygon(&mut self) {
        let mut points = std::mem::take(&mut self.contour);
        points.dedup();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return;
        }
        let n = points.len();
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            let edge = Edge::new(a.x, a.y, b.x, b.y);
            if !edge.is_horizontal() {
                self.edges.push(edge);
            }
        }
    }

    /// Add a closed polygon.
    pub fn add_polygon(&mut self, points: &[PointD]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(first.x, first.y);
        for p in rest {
            self.line_to(p.x, p.y);
        }
        self.close_polygon();
    }

    /// Add a circle flattened into a regular polygon. The vertex count
    /// grows with the radius so the chord error stays under 1/8 pixel.
    pub fn add_circle(&mut self, top_left: PointD, diameter: f64, counter_clockwise: bool) {
        if diameter <= 0.0 {
            return;
        }
        let r = diameter / 2.0;
        let cx = top_left.x + r;
        let cy = top_left.y + r;
        let da = (r / (r + 0.125)).acos() * 2.0;
        let num = uround(2.0 * PI / da).max(3);
        self.close_polygon();
        for step in 0..num {
            let mut angle = step as f64 / num as f64 * 2.0 * PI;
            if counter_clockwise {
                angle = 2.0 * PI - angle;
            }
            let x = cx + angle.cos() * r;
            let y = cy + angle.sin() * r;
            if step == 0 {
                self.move_to(x, y);
            } else {
                self.line_to(x, y);
            }
        }
        self.close_polygon();
    }

    // ========================================================================
    // Sweep
    // ========================================================================

    /// Intersections of the sub-scanline at `y` with all edges, sorted by x.
    pub fn intersections_at(&mut self, y: f64) -> &[Intersection] {
        self.intersections.clear();
        for (idx, edge) in self.edges.iter().enumerate() {
            if edge.straddles(y) {
                self.intersections.push(Intersection {
                    edge: idx,
                    x: edge.x_at(y),
                });
            }
        }
        // `sort_by` is stable: equal x keeps edge insertion order.
        self.intersections.sort_by(|a, b| a.x.total_cmp(&b.x));
        &self.intersections
    }

    /// Rasterize everything added so far into a coverage mask.
    pub fn rasterize(&mut self) -> CoverageMask {
        self.close_polygon();
        let mut mask = CoverageMask::new(self.width, self.height);
        if self.edges.is_empty() || self.width == 0 || self.height == 0 {
            return mask;
        }

        let min_y = self.edges.iter().map(Edge::min_y).fold(f64::INFINITY, f64::min);
        let max_y = self
            .edges
            .iter()
            .map(Edge::max_y)
            .fold(f64::NEG_INFINITY, f64::max);
        let first_row = min_y.floor().max(0.0) as u32;
        let last_row = (max_y.ceil().max(0.0) as u32).min(self.height);
        trace!(
            "rasterizing {} edges, rows {}..{}, {} subsamples",
            self.edges.len(),
            first_row,
            last_row,
            self.subsamples
        );

        let width = self.width as usize;
        let weight = 1.0 / self.subsamples as f32;
        let mut row = vec![0.0f32; width];
        for py in first_row..last_row {
            row.fill(0.0);
            for s in 0..self.subsamples {
                let y = py as f64 + (s as f64 + 0.5) / self.subsamples as f64;
                let crossings = self.intersections_at(y);
                for span in crossings.chunks_exact(2) {
                    accumulate_span(&mut row, span[0].x, span[1].x, weight);
                }
            }
            let start = py as usize * width;
            for (dst, &c) in mask.data[start..start + width].iter_mut().zip(&row) {
                *dst = c.clamp(0.0, 1.0);
            }
        }
        mask
    }
}

/// Add the span `[xa, xb)` to `row`, weighting the partially covered end
/// pixels by their overlap.
fn accumulate_span(row: &mut [f32], xa: f64, xb: f64, weight: f32) {
    let xa = xa.max(0.0);
    let xb = xb.min(row.len() as f64);
    if xb <= xa {
        return;
    }
    let ia = xa.floor() as usize;
    let ib = xb.floor() as usize;
    if ia == ib {
        row[ia] += (xb - xa) as f32 * weight;
        return;
    }
    row[ia] += ((ia + 1) as f64 - xa) as f32 * weight;
    for c in &mut row[ia + 1..ib] {
        *c += weight;
    }
    if ib < row.len() {
        row[ib] += (xb - ib as f64) as f32 * weight;
    }
}

// ============================================================================
// Tests
// ============================================================================
