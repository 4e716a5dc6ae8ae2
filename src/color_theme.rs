//! Palette derived from a hue and a style.

use core::ops::Index;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::style::Style;

/// Smallest palette the color collision rule can work with.
pub const MIN_PALETTE_SIZE: usize = 5;

pub const DARK_GRAY: usize = 0;
pub const MID_COLOR: usize = 1;
pub const LIGHT_GRAY: usize = 2;
pub const LIGHT_COLOR: usize = 3;
pub const DARK_COLOR: usize = 4;

/// Ordered palette of foreground colors for one icon.
///
/// The default theme holds exactly five entries, indexed by the constants
/// above. Custom palettes may be longer but never shorter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTheme {
    colors: Vec<Color>,
}

impl ColorTheme {
    /// Five-color palette for `hue` (in [0, 1]) under `style`.
    pub fn new(hue: f64, style: &Style) -> Self {
        let hue = style.restrict_hue(hue);
        let gray = |v| {
            Color::from_corrected_hsl(
                hue,
                style.grayscale_saturation,
                style.grayscale_lightness.lightness(v),
            )
        };
        let color = |v| {
            Color::from_corrected_hsl(
                hue,
                style.color_saturation,
                style.color_lightness.lightness(v),
            )
        };
        Self {
            colors: vec![gray(0.0), color(0.5), gray(1.0), color(1.0), color(0.0)],
        }
    }

    /// Caller-supplied palette. Fails when it has fewer than
    /// [`MIN_PALETTE_SIZE`] entries.
    pub fn from_colors(colors: Vec<Color>) -> Result<Self> {
        if colors.len() < MIN_PALETTE_SIZE {
            return Err(Error::Configuration(format!(
                "palette has {} colors, at least {MIN_PALETTE_SIZE} required",
                colors.len()
            )));
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Index<usize> for ColorTheme {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.colors[index]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_has_five_entries() {
        let theme = ColorTheme::new(0.3, &Style::default());
        assert_eq!(theme.len(), MIN_PALETTE_SIZE);
    }

    #[test]
    fn test_grays_are_gray() {
        let theme = ColorTheme::new(0.7, &Style::default());
        for idx in [DARK_GRAY, LIGHT_GRAY] {
            let c = theme[idx];
            assert_eq!(c.r, c.g);
            assert_eq!(c.g, c.b);
        }
        assert!(theme[DARK_GRAY].r < theme[LIGHT_GRAY].r);
    }

    #[test]
    fn test_lightness_ordering() {
        let theme = ColorTheme::new(0.6, &Style::default());
        let luma = |c: Color| c.r as u32 + c.g as u32 + c.b as u32;
        assert!(luma(theme[DARK_COLOR]) < luma(theme[MID_COLOR]));
        assert!(luma(theme[MID_COLOR]) < luma(theme[LIGHT_COLOR]));
    }

    #[test]
    fn test_hue_zero_is_reddish() {
        let theme = ColorTheme::new(0.0, &Style::default());
        let c = theme[MID_COLOR];
        assert!(c.r > c.g && c.r > c.b, "{c:?}");
    }

    #[test]
    fn test_hue_restriction_applies() {
        let style = Style::default().with_hues(vec![240.0]);
        let restricted = ColorTheme::new(0.1, &style);
        let blue = ColorTheme::new(240.0 / 360.0, &Style::default());
        assert_eq!(restricted, blue);
    }

    #[test]
    fn test_from_colors_rejects_short_palette() {
        let err = ColorTheme::from_colors(vec![Color::BLACK; 4]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(ColorTheme::from_colors(vec![Color::BLACK; 5]).is_ok());
    }
}
