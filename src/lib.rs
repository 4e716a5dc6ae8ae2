//! # hashicon
//!
//! Deterministic identicons: a hash goes in, a small symmetric icon comes
//! out. The same hash and style always produce the same icon.
//!
//! ## Architecture
//!
//! Generation is split into stages that only talk through narrow types:
//!
//! 1. **Generator** reads the hash and decides hue, palette, shapes and
//!    rotations ([`IconGenerator::plan`]).
//! 2. **Shapes** turn each decision into primitives in cell coordinates.
//! 3. **Graphics** places primitives on the 4x4 grid through a
//!    [`Transform`] and feeds them to a [`Renderer`].
//! 4. **Renderers** produce output: [`SvgPathRenderer`] collects SVG path
//!    data per color, [`RasterRenderer`] fills an RGBA [`Pixmap`] through
//!    the anti-aliased [`ScanlineRasterizer`].
//!
//! ## Example
//!
//! ```
//! use hashicon::{render_svg_paths, Style};
//!
//! let hash = [0x3a, 0x1f, 0x9c, 0x00, 0x42, 0x17, 0xee, 0x05, 0x31, 0x86, 0x0b];
//! let svg = render_svg_paths(&hash, 64, &Style::default()).unwrap();
//! assert_eq!(svg.shapes().len(), 3);
//! ```

pub mod basics;
pub mod color;
pub mod color_theme;
pub mod error;
pub mod generator;
pub mod graphics;
pub mod path;
pub mod pixmap;
pub mod rasterizer;
pub mod shapes;
pub mod style;
pub mod transform;

pub use basics::{PointD, RectI};
pub use color::Color;
pub use color_theme::ColorTheme;
pub use error::{Error, Result};
pub use generator::{IconGenerator, IconPlan, Layout, PlacedShape};
pub use graphics::{Graphics, Renderer};
pub use path::{PathCommand, PathData, SvgPathRenderer};
pub use pixmap::{Pixmap, RasterRenderer};
pub use rasterizer::{CoverageMask, ScanlineRasterizer};
pub use shapes::{Primitive, ShapeCategory, ShapeDef};
pub use style::Style;
pub use transform::Transform;

/// Generate the icon for `hash` into `renderer` inside `bounds`, using the
/// default generator.
pub fn generate<R: Renderer>(
    hash: &[u8],
    bounds: &RectI,
    style: &Style,
    renderer: R,
) -> Result<()> {
    IconGenerator::new().generate(hash, bounds, style, renderer)
}

/// Icon of `size` x `size` pixels as SVG path data, one path per color.
pub fn render_svg_paths(hash: &[u8], size: u32, style: &Style) -> Result<SvgPathRenderer> {
    let mut renderer = SvgPathRenderer::new();
    generate(hash, &RectI::with_size(size, size), style, &mut renderer)?;
    Ok(renderer)
}

/// Icon of `size` x `size` pixels as an RGBA image.
pub fn render_pixmap(hash: &[u8], size: u32, style: &Style) -> Result<Pixmap> {
    let mut renderer = RasterRenderer::new(size, size);
    generate(hash, &RectI::with_size(size, size), style, &mut renderer)?;
    Ok(renderer.into_pixmap())
}
