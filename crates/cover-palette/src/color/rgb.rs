//! RGB color type
//!
//! Gamma-encoded RGB as it arrives from decoded cover bitmaps and as the
//! host renderer expects it back. All channels are normalized to 0.0..=1.0.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseColorError;
use super::hsb::Hsb;

/// A color in (gamma-encoded) RGB space.
///
/// Values are in the range 0.0..=1.0 (mapping to 0..255 for 8-bit).
/// Serializes as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Rgb {
    /// Red channel (0.0..=1.0)
    pub r: f64,
    /// Green channel (0.0..=1.0)
    pub g: f64,
    /// Blue channel (0.0..=1.0)
    pub b: f64,
}

impl Rgb {
    /// Create a new color from float values, clamping each channel.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Create a color from 8-bit unsigned integer values.
    ///
    /// # Example
    /// ```
    /// use cover_palette::Rgb;
    /// let red = Rgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Convert to a byte array [R, G, B], rounding and clamping.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Convert to HSB.
    #[inline]
    pub fn to_hsb(self) -> Hsb {
        Hsb::from(self)
    }
}

impl From<[f64; 3]> for Rgb {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [f64; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// ```
    /// use cover_palette::Rgb;
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red.r, 1.0);
    /// assert_eq!(red.g, 0.0);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        match s.len() {
            3 => {
                // Shorthand: 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let color = Rgb::from_u8(255, 128, 0);
        assert_eq!(color.r, 1.0);
        assert!((color.g - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(color.b, 0.0);

        assert_eq!(Rgb::from_u8(0, 0, 0).to_bytes(), [0, 0, 0]);
        assert_eq!(Rgb::from_u8(127, 127, 127).to_bytes(), [127, 127, 127]);
        assert_eq!(Rgb::from_u8(255, 255, 255).to_bytes(), [255, 255, 255]);
    }

    #[test]
    fn test_new_clamps_out_of_range() {
        let color = Rgb::new(1.4, -0.2, 0.5);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.b, 0.5);
    }

    #[test]
    fn test_parse_hex_formats() {
        let white: Rgb = "#FFFFFF".parse().unwrap();
        assert_eq!(white.to_bytes(), [255, 255, 255]);

        let no_hash: Rgb = "ff8000".parse().unwrap();
        assert_eq!(no_hash.to_bytes(), [255, 128, 0]);

        let short: Rgb = "  #0f0 ".parse().unwrap();
        assert_eq!(short.to_bytes(), [0, 255, 0]);
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!(
            "#FFFF".parse::<Rgb>().unwrap_err(),
            ParseColorError::InvalidLength
        );
        assert!(matches!(
            "#GG0000".parse::<Rgb>().unwrap_err(),
            ParseColorError::InvalidHex(_)
        ));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgb::from_u8(255, 128, 0).to_hex(), "#FF8000");
        assert_eq!(Rgb::from_u8(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_string(&Rgb::new(1.0, 0.5, 0.0)).unwrap();
        assert_eq!(json, "[1.0,0.5,0.0]");
    }
}
