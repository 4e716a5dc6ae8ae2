//! RGBA pixel buffer with alpha blending, and the raster [`Renderer`].
//!
//! Pixels are stored as 4 bytes (R, G, B, A), non-premultiplied, row-major
//! with no row padding.

use crate::basics::PointD;
use crate::color::Color;
use crate::graphics::Renderer;
use crate::rasterizer::{CoverageMask, ScanlineRasterizer};

const BPP: usize = 4; // bytes per pixel

// ============================================================================
// Pixmap
// ============================================================================

/// Owned RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BPP],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * BPP)
        } else {
            None
        }
    }

    /// Pixel at `(x, y)`, `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let off = self.offset(x, y)?;
        let p = &self.data[off..off + BPP];
        Some(Color::new(p[0], p[1], p[2], p[3]))
    }

    /// Overwrite every pixel with `c`.
    pub fn fill(&mut self, c: Color) {
        let px = c.to_array();
        for p in self.data.chunks_exact_mut(BPP) {
            p.copy_from_slice(&px);
        }
    }

    /// Overwrite one pixel. Out-of-range coordinates are ignored.
    pub fn copy_pixel(&mut self, x: u32, y: u32, c: Color) {
        if let Some(off) = self.offset(x, y) {
            self.data[off..off + BPP].copy_from_slice(&c.to_array());
        }
    }

    /// Composite `c` over the pixel at `(x, y)` with the given coverage.
    pub fn blend_pixel(&mut self, x: u32, y: u32, c: Color, coverage: f32) {
        if let Some(off) = self.offset(x, y) {
            blend_pix(&mut self.data[off..off + BPP], c, coverage);
        }
    }

    /// Composite `c` through a coverage mask anchored at the origin.
    pub fn blend_mask(&mut self, mask: &CoverageMask, c: Color) {
        let w = self.width.min(mask.width());
        let h = self.height.min(mask.height());
        for y in 0..h {
            let covers = mask.row(y);
            let start = y as usize * self.width as usize * BPP;
            let row = &mut self.data[start..start + w as usize * BPP];
            for (p, &cover) in row.chunks_exact_mut(BPP).zip(covers) {
                blend_pix(p, c, cover);
            }
        }
    }
}

/// Straight-alpha "over" operator.
///
/// For an opaque destination this is `c * a + dst * (1 - a)` per channel,
/// where `a` is the source alpha scaled by coverage.
#[inline]
fn blend_pix(p: &mut [u8], c: Color, coverage: f32) {
    let alpha = c.a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let dst_alpha = p[3] as f32 / 255.0;
    let keep = dst_alpha * (1.0 - alpha);
    let out_alpha = alpha + keep;
    let mix = |src: u8, dst: u8| {
        let v = (src as f32 * alpha + dst as f32 * keep) / out_alpha;
        (v + 0.5).min(255.0) as u8
    };
    p[0] = mix(c.r, p[0]);
    p[1] = mix(c.g, p[1]);
    p[2] = mix(c.b, p[2]);
    p[3] = (out_alpha * 255.0 + 0.5).min(255.0) as u8;
}

// ============================================================================
// RasterRenderer
// ============================================================================

/// [`Renderer`] producing an anti-aliased [`Pixmap`].
///
/// All primitives of one shape are rasterized together and composited once
/// with the shape color when the shape ends.
pub struct RasterRenderer {
    pixmap: Pixmap,
    rasterizer: ScanlineRasterizer,
    color: Option<Color>,
}

impl RasterRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixmap: Pixmap::new(width, height),
            rasterizer: ScanlineRasterizer::new(width, height),
            color: None,
        }
    }

    /// Set the number of sub-scanlines per pixel row.
    pub fn with_subsamples(mut self, subsamples: u32) -> Self {
        self.rasterizer = self.rasterizer.with_subsamples(subsamples);
        self
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

impl Renderer for RasterRenderer {
    fn set_background(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    fn begin_shape(&mut self, color: Color) {
        self.rasterizer.reset();
        self.color = Some(color);
    }

    fn end_shape(&mut self) {
        if let Some(color) = self.color.take() {
            let mask = self.rasterizer.rasterize();
            self.pixmap.blend_mask(&mask, color);
        }
        self.rasterizer.reset();
    }

    fn add_polygon(&mut self, points: &[PointD]) {
        if self.color.is_some() {
            self.rasterizer.add_polygon(points);
        }
    }

    fn add_circle(&mut self, top_left: PointD, diameter: f64, counter_clockwise: bool) {
        if self.color.is_some() {
            self.rasterizer
                .add_circle(top_left, diameter, counter_clockwise);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
