//! Color type and conversions.
//!
//! `Color` is a straight (non-premultiplied) RGBA color with 8 bits per
//! channel. Palette entries are produced from HSL with a perceptual
//! lightness correction, and styles accept CSS-like hex strings.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

// ============================================================================
// Color (8-bit per channel)
// ============================================================================

/// RGBA color with u8 components, alpha not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BASE_MASK: u32 = 255;

    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    pub const BLACK: Color = Color::new_opaque(0, 0, 0);
    pub const WHITE: Color = Color::new_opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == Self::BASE_MASK as u8
    }

    /// Components as `[r, g, b, a]`.
    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    // ========================================================================
    // HSL
    // ========================================================================

    /// Opaque color from hue, saturation and lightness, all in [0, 1].
    ///
    /// Channels are truncated (not rounded) to 0..255.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        if saturation == 0.0 {
            let v = channel(lightness * 255.0);
            return Self::new_opaque(v, v, v);
        }
        let m2 = if lightness <= 0.5 {
            lightness * (saturation + 1.0)
        } else {
            lightness + saturation - lightness * saturation
        };
        let m1 = lightness * 2.0 - m2;
        Self::new_opaque(
            hue_to_channel(m1, m2, hue * 6.0 + 2.0),
            hue_to_channel(m1, m2, hue * 6.0),
            hue_to_channel(m1, m2, hue * 6.0 - 2.0),
        )
    }

    /// Like [`Color::from_hsl`], with lightness adjusted per hue sextant so
    /// that yellows and greens do not look brighter than blues and reds at
    /// the same nominal lightness.
    pub fn from_corrected_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        const CORRECTORS: [f64; 7] = [0.55, 0.5, 0.5, 0.46, 0.6, 0.55, 0.55];
        let idx = ((hue * 6.0 + 0.5) as usize).min(CORRECTORS.len() - 1);
        let corrector = CORRECTORS[idx];
        let lightness = if lightness < 0.5 {
            lightness * corrector * 2.0
        } else {
            corrector + (lightness - 0.5) * (1.0 - corrector) * 2.0
        };
        Self::from_hsl(hue, saturation, lightness)
    }

    // ========================================================================
    // Hex notation
    // ========================================================================

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInput(format!("malformed color {s:?}"));
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        match digits.len() {
            3 | 4 => {
                let a = if digits.len() == 4 { nibble(3)? * 17 } else { 255 };
                Ok(Self::new(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17, a))
            }
            6 | 8 => {
                let a = if digits.len() == 8 { byte(6)? } else { 255 };
                Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, a))
            }
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s.trim())
    }
}

/// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[inline]
fn channel(v: f64) -> u8 {
    if v < 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

fn hue_to_channel(m1: f64, m2: f64, h: f64) -> u8 {
    let h = if h < 0.0 {
        h + 6.0
    } else if h > 6.0 {
        h - 6.0
    } else {
        h
    };
    let v = if h < 1.0 {
        m1 + (m2 - m1) * h
    } else if h < 3.0 {
        m2
    } else if h < 4.0 {
        m1 + (m2 - m1) * (4.0 - h)
    } else {
        m1
    };
    channel(255.0 * v)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5), Color::new_opaque(255, 0, 0));
        assert_eq!(
            Color::from_hsl(1.0 / 3.0, 1.0, 0.5),
            Color::new_opaque(0, 255, 0)
        );
        assert_eq!(
            Color::from_hsl(2.0 / 3.0, 1.0, 0.5),
            Color::new_opaque(0, 0, 255)
        );
    }

    #[test]
    fn test_hsl_gray_truncates() {
        // 0.5 * 255 = 127.5 truncates to 127.
        assert_eq!(Color::from_hsl(0.3, 0.0, 0.5), Color::new_opaque(127, 127, 127));
        assert_eq!(Color::from_hsl(0.0, 0.0, 1.0), Color::WHITE);
        assert_eq!(Color::from_hsl(0.0, 0.0, 0.0), Color::BLACK);
    }

    #[test]
    fn test_corrected_hsl_red() {
        // Red uses corrector 0.55: 0.4 -> 0.44.
        let corrected = Color::from_corrected_hsl(0.0, 0.0, 0.4);
        let expected = Color::from_hsl(0.0, 0.0, 0.4 * 0.55 * 2.0);
        assert_eq!(corrected, expected);
    }

    #[test]
    fn test_corrected_hsl_upper_half() {
        // Hue 0.5 -> index 3 -> corrector 0.46.
        let corrected = Color::from_corrected_hsl(0.5, 0.5, 0.8);
        let expected = Color::from_hsl(0.5, 0.5, 0.46 + (0.8 - 0.5) * (1.0 - 0.46) * 2.0);
        assert_eq!(corrected, expected);
    }

    #[test]
    fn test_corrected_hsl_hue_one() {
        // Must not index past the corrector table.
        let c = Color::from_corrected_hsl(1.0, 0.5, 0.5);
        assert!(c.is_opaque());
    }

    #[test]
    fn test_parse_long_forms() {
        assert_eq!(Color::from_hex("#ff8000").unwrap(), Color::new_opaque(255, 128, 0));
        assert_eq!(Color::from_hex("#ff800080").unwrap(), Color::new(255, 128, 0, 128));
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(Color::from_hex("#f80").unwrap(), Color::new_opaque(255, 136, 0));
        assert_eq!(Color::from_hex("#0000").unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::from_hex("ff8000").is_err());
        assert!(Color::from_hex("#ff80").is_ok());
        assert!(Color::from_hex("#ff800").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#").is_err());
        assert!(matches!(
            "#12".parse::<Color>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::new_opaque(255, 128, 0).to_string(), "#ff8000");
        assert_eq!(Color::new(1, 2, 3, 4).to_string(), "#01020304");
        assert_eq!(Color::TRANSPARENT.to_string(), "#00000000");
    }

    #[test]
    fn test_display_parse_agree() {
        let c = Color::new(18, 52, 86, 120);
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
    }
}
