//! Icon generator: the mapping from hash bytes to placed shapes.
//!
//! Generation runs in two steps. [`IconGenerator::plan`] derives the hue,
//! the palette, and one [`PlacedShape`] per shape category. Then
//! [`IconGenerator::render`] lays the shapes out on a 4x4 grid inside the
//! output bounds and draws them through a [`Renderer`].
//!
//! The three decisions that read the hash (octet extraction, hue, shape
//! choice) are pluggable strategies. The defaults reproduce the canonical
//! icons, so changing them changes every generated icon.

use log::debug;

use crate::basics::RectI;
use crate::color::Color;
use crate::color_theme::{
    ColorTheme, DARK_COLOR, DARK_GRAY, LIGHT_COLOR, LIGHT_GRAY, MID_COLOR, MIN_PALETTE_SIZE,
};
use crate::error::{Error, Result};
use crate::graphics::{Graphics, Renderer};
use crate::shapes::{ShapeCategory, ShapeDef, GRID_CELLS, SHAPE_CATEGORIES};
use crate::style::Style;
use crate::transform::Transform;

// ============================================================================
// Strategies
// ============================================================================

/// Reads one byte of the hash by index.
pub trait OctetStrategy {
    fn octet(&self, hash: &[u8], index: usize) -> Result<u8>;
}

/// Derives the hue in [0, 1] from the hash.
pub trait HueStrategy {
    fn hue(&self, hash: &[u8]) -> Result<f64>;
}

/// Picks a shape index in `0..shape_count` from a hash octet.
pub trait ShapeSelectionStrategy {
    fn select_shape(&self, octet: u8, shape_count: usize) -> usize;
}

impl<F: Fn(&[u8], usize) -> Result<u8>> OctetStrategy for F {
    fn octet(&self, hash: &[u8], index: usize) -> Result<u8> {
        self(hash, index)
    }
}

impl<F: Fn(&[u8]) -> Result<f64>> HueStrategy for F {
    fn hue(&self, hash: &[u8]) -> Result<f64> {
        self(hash)
    }
}

impl<F: Fn(u8, usize) -> usize> ShapeSelectionStrategy for F {
    fn select_shape(&self, octet: u8, shape_count: usize) -> usize {
        self(octet, shape_count)
    }
}

/// `hash[index % hash.len()]`; any index is valid for a non-empty hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct WrappingOctets;

impl OctetStrategy for WrappingOctets {
    fn octet(&self, hash: &[u8], index: usize) -> Result<u8> {
        if hash.is_empty() {
            return Err(Error::InvalidInput("hash must not be empty".into()));
        }
        Ok(hash[index % hash.len()])
    }
}

/// First four bytes as a big-endian `u32`, divided by `u32::MAX`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingWordHue;

impl HueStrategy for LeadingWordHue {
    fn hue(&self, hash: &[u8]) -> Result<f64> {
        let word: [u8; 4] = hash
            .get(..4)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "hash of {} bytes is too short, hue needs 4",
                    hash.len()
                ))
            })?;
        Ok(u32::from_be_bytes(word) as f64 / u32::MAX as f64)
    }
}

/// `octet % shape_count`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuloShapeSelection;

impl ShapeSelectionStrategy for ModuloShapeSelection {
    fn select_shape(&self, octet: u8, shape_count: usize) -> usize {
        octet as usize % shape_count
    }
}

// ============================================================================
// Plan
// ============================================================================

/// One category's shape, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedShape<'a> {
    pub category: &'static str,
    pub shape: &'a ShapeDef,
    pub color: Color,
    /// Palette index `color` was taken from.
    pub color_index: usize,
    /// `(column, row)` cells, in placement order.
    pub positions: &'a [(u32, u32)],
    /// Rotation of the first placement; each following placement turns one
    /// more quarter.
    pub start_rotation: u32,
}

impl PlacedShape<'_> {
    /// Quarter turns for the `occurrence`-th placement.
    pub fn rotation(&self, occurrence: usize) -> u32 {
        ((self.start_rotation as usize + occurrence) % 4) as u32
    }
}

/// Everything decided from the hash before any drawing happens.
#[derive(Debug, Clone, PartialEq)]
pub struct IconPlan<'a> {
    pub hue: f64,
    pub theme: ColorTheme,
    pub shapes: Vec<PlacedShape<'a>>,
}

/// Pixel geometry of the 4x4 grid inside the output bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Top-left corner of the grid.
    pub x: f64,
    pub y: f64,
    /// Side length of one grid cell.
    pub cell: f64,
}

impl Layout {
    /// Center the largest square of `bounds`, remove `padding` (a fraction
    /// of its size) on each side, and fit the grid to whole-pixel cells.
    pub fn new(bounds: &RectI, padding: f64) -> Self {
        let bounds = bounds.normalized();
        let side = bounds.square_size();
        let left = bounds.x1 as f64 + ((bounds.width() - side) / 2) as f64;
        let top = bounds.y1 as f64 + ((bounds.height() - side) / 2) as f64;
        let side = side as f64;
        let pad = (0.5 + side * padding).floor();
        let size = side - pad * 2.0;
        let cell = (size / GRID_CELLS as f64).floor().max(0.0);
        let half_grid = cell * GRID_CELLS as f64 / 2.0;
        Self {
            x: (left + pad + size / 2.0 - half_grid).floor(),
            y: (top + pad + size / 2.0 - half_grid).floor(),
            cell,
        }
    }

    /// Placement of a cell at `(col, row)` turned by `rotation` quarters.
    pub fn cell_transform(&self, col: u32, row: u32, rotation: u32) -> Transform {
        Transform::new(
            self.x + col as f64 * self.cell,
            self.y + row as f64 * self.cell,
            self.cell,
            rotation,
        )
    }
}

// ============================================================================
// IconGenerator
// ============================================================================

/// Color index pairs that must not appear together in one icon: the dark
/// gray with the dark color, and the light gray with the light color.
const BANNED_PAIRS: [[usize; 2]; 2] = [[DARK_GRAY, DARK_COLOR], [LIGHT_GRAY, LIGHT_COLOR]];

/// Whether `index` completes a banned pair with a color already in `used`.
fn collides(index: usize, used: &[usize]) -> bool {
    BANNED_PAIRS.iter().any(|pair| {
        pair.contains(&index) && used.iter().any(|u| *u != index && pair.contains(u))
    })
}

/// Deterministic identicon generator.
///
/// Holds no per-icon state, so one generator can serve any number of
/// concurrent calls as long as each uses its own renderer.
pub struct IconGenerator<'a> {
    categories: &'a [ShapeCategory<'a>],
    octets: Box<dyn OctetStrategy + Send + Sync>,
    hue: Box<dyn HueStrategy + Send + Sync>,
    selection: Box<dyn ShapeSelectionStrategy + Send + Sync>,
}

impl Default for IconGenerator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl IconGenerator<'static> {
    /// Generator over the built-in category table with default strategies.
    pub fn new() -> Self {
        IconGenerator::with_categories(&SHAPE_CATEGORIES)
    }
}

impl<'a> IconGenerator<'a> {
    /// Generator over a caller-supplied category table.
    pub fn with_categories(categories: &'a [ShapeCategory<'a>]) -> Self {
        Self {
            categories,
            octets: Box::new(WrappingOctets),
            hue: Box::new(LeadingWordHue),
            selection: Box::new(ModuloShapeSelection),
        }
    }

    pub fn with_octet_strategy(mut self, s: impl OctetStrategy + Send + Sync + 'static) -> Self {
        self.octets = Box::new(s);
        self
    }

    pub fn with_hue_strategy(mut self, s: impl HueStrategy + Send + Sync + 'static) -> Self {
        self.hue = Box::new(s);
        self
    }

    pub fn with_shape_selection(
        mut self,
        s: impl ShapeSelectionStrategy + Send + Sync + 'static,
    ) -> Self {
        self.selection = Box::new(s);
        self
    }

    pub fn categories(&self) -> &'a [ShapeCategory<'a>] {
        self.categories
    }

    /// Octet `index` of `hash` through the configured strategy.
    pub fn octet(&self, hash: &[u8], index: usize) -> Result<u8> {
        self.octets.octet(hash, index)
    }

    /// Hue of `hash`, checked to lie in [0, 1].
    pub fn hue(&self, hash: &[u8]) -> Result<f64> {
        if hash.is_empty() {
            return Err(Error::InvalidInput("hash must not be empty".into()));
        }
        let hue = self.hue.hue(hash)?;
        if !(0.0..=1.0).contains(&hue) {
            return Err(Error::InternalInvariantViolation(format!(
                "hue {hue} outside [0, 1]"
            )));
        }
        Ok(hue)
    }

    /// Choose color, shape and start rotation for every category, in table
    /// order.
    ///
    /// A color that would complete a banned pair with a color chosen by an
    /// earlier category is replaced by the mid color. Later categories are
    /// never revisited.
    pub fn place_shapes(&self, hash: &[u8], theme: &ColorTheme) -> Result<Vec<PlacedShape<'a>>> {
        if hash.is_empty() {
            return Err(Error::InvalidInput("hash must not be empty".into()));
        }
        if theme.len() < MIN_PALETTE_SIZE {
            return Err(Error::Configuration(format!(
                "palette has {} colors, at least {MIN_PALETTE_SIZE} required",
                theme.len()
            )));
        }

        let mut used = Vec::with_capacity(self.categories.len());
        let mut placed = Vec::with_capacity(self.categories.len());
        for cat in self.categories {
            let mut color_index = self.octet(hash, cat.color_octet)? as usize % theme.len();
            if collides(color_index, &used) {
                debug!(
                    "{}: color {} collides with {:?}, using mid color",
                    cat.name, color_index, used
                );
                color_index = MID_COLOR;
            }
            used.push(color_index);

            let start_rotation = match cat.rotation_octet {
                Some(idx) => self.octet(hash, idx)? as u32,
                None => 0,
            };

            if cat.shapes.is_empty() {
                return Err(Error::Configuration(format!(
                    "category {} has no shapes",
                    cat.name
                )));
            }
            let shape_octet = self.octet(hash, cat.shape_octet)?;
            let shape_index = self.selection.select_shape(shape_octet, cat.shapes.len());
            let shape = cat.shapes.get(shape_index).ok_or_else(|| {
                Error::Configuration(format!(
                    "shape index {shape_index} out of range for category {} ({} shapes)",
                    cat.name,
                    cat.shapes.len()
                ))
            })?;
            debug!(
                "{}: shape {} color {} start rotation {}",
                cat.name, shape.name, color_index, start_rotation
            );

            placed.push(PlacedShape {
                category: cat.name,
                shape,
                color: theme[color_index],
                color_index,
                positions: cat.positions,
                start_rotation,
            });
        }
        Ok(placed)
    }

    /// Derive hue, palette and placed shapes for `hash`.
    pub fn plan(&self, hash: &[u8], style: &Style) -> Result<IconPlan<'a>> {
        style.validate()?;
        let hue = self.hue(hash)?;
        debug!("hue {hue:.6}");
        let theme = ColorTheme::new(hue, style);
        let shapes = self.place_shapes(hash, &theme)?;
        Ok(IconPlan { hue, theme, shapes })
    }

    /// Like [`IconGenerator::plan`], with colors taken from a caller
    /// palette instead of one derived from the hue.
    ///
    /// The hue is still computed and reported, so hashes shorter than the
    /// hue strategy needs are rejected the same way.
    pub fn plan_with_theme(&self, hash: &[u8], theme: ColorTheme) -> Result<IconPlan<'a>> {
        let hue = self.hue(hash)?;
        let shapes = self.place_shapes(hash, &theme)?;
        Ok(IconPlan { hue, theme, shapes })
    }

    /// Draw a plan into `renderer` inside `bounds`.
    ///
    /// The background is painted first, then each placed shape as one
    /// filled shape covering all of its cells. Bounds too small for a
    /// one-pixel cell get the background only.
    pub fn render<R: Renderer>(
        &self,
        plan: &IconPlan<'_>,
        bounds: &RectI,
        style: &Style,
        renderer: R,
    ) {
        let layout = Layout::new(bounds, style.padding);
        let mut g = Graphics::new(renderer);
        g.set_background(style.background);
        if layout.cell <= 0.0 {
            debug!("bounds {bounds:?} too small for the grid, background only");
            return;
        }
        for placed in &plan.shapes {
            g.render_shape(placed.color, |g| {
                for (i, &(col, row)) in placed.positions.iter().enumerate() {
                    g.transform = layout.cell_transform(col, row, placed.rotation(i));
                    let primitive = placed.shape.draw(layout.cell, i);
                    g.draw(&primitive);
                }
            });
        }
    }

    /// Generate the icon for `hash` into `renderer`.
    ///
    /// Fails before anything is drawn; a renderer is never left with a
    /// partial icon.
    pub fn generate<R: Renderer>(
        &self,
        hash: &[u8],
        bounds: &RectI,
        style: &Style,
        renderer: R,
    ) -> Result<()> {
        let plan = self.plan(hash, style)?;
        self.render(&plan, bounds, style, renderer);
        Ok(())
    }

    /// Generate with a caller palette. `style` still supplies background
    /// and padding.
    pub fn generate_with_theme<R: Renderer>(
        &self,
        hash: &[u8],
        theme: ColorTheme,
        bounds: &RectI,
        style: &Style,
        renderer: R,
    ) -> Result<()> {
        style.validate()?;
        let plan = self.plan_with_theme(hash, theme)?;
        self.render(&plan, bounds, style, renderer);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
