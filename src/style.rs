//! Icon style configuration.
//!
//! A [`Style`] is immutable input to one generation call: background color,
//! padding, optional hue restriction, and the saturation and lightness
//! parameters the palette is derived from.

use crate::color::Color;
use crate::error::{Error, Result};

/// Default padding, as a fraction of the icon size on each side.
pub const DEFAULT_PADDING: f64 = 0.08;

// ============================================================================
// LightnessRange
// ============================================================================

/// Lightness interval a palette family is spread over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightnessRange {
    pub min: f64,
    pub max: f64,
}

impl LightnessRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map `value` in [0, 1] linearly onto the range, clamped to [0, 1].
    pub fn lightness(&self, value: f64) -> f64 {
        (self.min + value * (self.max - self.min)).clamp(0.0, 1.0)
    }
}

// ============================================================================
// Style
// ============================================================================

/// Style parameters for icon generation.
///
/// Build with `Style::default()` and the chained `with_*` setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Flat color painted behind the icon.
    pub background: Color,
    /// Empty margin on each side, as a fraction of the icon size.
    pub padding: f64,
    /// Allowed hues in degrees. Empty means any hue.
    pub hues: Vec<f64>,
    /// Saturation of the colored palette entries.
    pub color_saturation: f64,
    /// Saturation of the gray palette entries.
    pub grayscale_saturation: f64,
    pub color_lightness: LightnessRange,
    pub grayscale_lightness: LightnessRange,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Color::TRANSPARENT,
            padding: DEFAULT_PADDING,
            hues: Vec::new(),
            color_saturation: 0.5,
            grayscale_saturation: 0.0,
            color_lightness: LightnessRange::new(0.4, 0.8),
            grayscale_lightness: LightnessRange::new(0.3, 0.9),
        }
    }
}

impl Style {
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_hues(mut self, hues: impl Into<Vec<f64>>) -> Self {
        self.hues = hues.into();
        self
    }

    pub fn with_saturation(mut self, color: f64, grayscale: f64) -> Self {
        self.color_saturation = color;
        self.grayscale_saturation = grayscale;
        self
    }

    pub fn with_color_lightness(mut self, min: f64, max: f64) -> Self {
        self.color_lightness = LightnessRange::new(min, max);
        self
    }

    pub fn with_grayscale_lightness(mut self, min: f64, max: f64) -> Self {
        self.grayscale_lightness = LightnessRange::new(min, max);
        self
    }

    /// Check every parameter against its supported range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..0.5).contains(&self.padding) {
            return Err(Error::Configuration(format!(
                "padding {} outside [0, 0.5)",
                self.padding
            )));
        }
        for (name, v) in [
            ("color saturation", self.color_saturation),
            ("grayscale saturation", self.grayscale_saturation),
            ("color lightness min", self.color_lightness.min),
            ("color lightness max", self.color_lightness.max),
            ("grayscale lightness min", self.grayscale_lightness.min),
            ("grayscale lightness max", self.grayscale_lightness.max),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::Configuration(format!("{name} {v} outside [0, 1]")));
            }
        }
        if let Some(h) = self.hues.iter().find(|h| !h.is_finite()) {
            return Err(Error::Configuration(format!("hue {h} is not finite")));
        }
        Ok(())
    }

    /// Apply the hue restriction to a hash-derived hue in [0, 1].
    ///
    /// With allowed hues configured, the hue selects one of them and the
    /// result is that angle normalised to [0, 1).
    pub fn restrict_hue(&self, hue: f64) -> f64 {
        if self.hues.is_empty() {
            return hue;
        }
        let idx = ((0.999 * hue * self.hues.len() as f64) as usize).min(self.hues.len() - 1);
        let degrees = self.hues[idx];
        ((degrees % 360.0 + 360.0) % 360.0) / 360.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Style::default().validate().is_ok());
    }

    #[test]
    fn test_lightness_range() {
        let r = LightnessRange::new(0.4, 0.8);
        assert!((r.lightness(0.0) - 0.4).abs() < 1e-12);
        assert!((r.lightness(0.5) - 0.6).abs() < 1e-12);
        assert!((r.lightness(1.0) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_lightness_range_clamps() {
        let r = LightnessRange::new(-0.5, 1.5);
        assert_eq!(r.lightness(0.0), 0.0);
        assert_eq!(r.lightness(1.0), 1.0);
    }

    #[test]
    fn test_validate_padding() {
        let err = Style::default().with_padding(0.5).validate().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(Style::default().with_padding(0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_saturation() {
        let err = Style::default()
            .with_saturation(1.2, 0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(ref m) if m.contains("color saturation")));
    }

    #[test]
    fn test_validate_lightness() {
        let style = Style::default().with_grayscale_lightness(0.1, 1.1);
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_validate_hues() {
        let style = Style::default().with_hues(vec![10.0, f64::NAN]);
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_restrict_hue_unrestricted() {
        assert_eq!(Style::default().restrict_hue(0.37), 0.37);
    }

    #[test]
    fn test_restrict_hue_selects_bucket() {
        let style = Style::default().with_hues(vec![0.0, 120.0, 240.0]);
        assert_eq!(style.restrict_hue(0.0), 0.0);
        assert!((style.restrict_hue(0.5) - 120.0 / 360.0).abs() < 1e-12);
        assert!((style.restrict_hue(1.0) - 240.0 / 360.0).abs() < 1e-12);
    }

    #[test]
    fn test_restrict_hue_normalises_degrees() {
        let style = Style::default().with_hues(vec![-90.0]);
        assert!((style.restrict_hue(0.8) - 0.75).abs() < 1e-12);
        let style = Style::default().with_hues(vec![720.0]);
        assert_eq!(style.restrict_hue(0.2), 0.0);
    }
}
