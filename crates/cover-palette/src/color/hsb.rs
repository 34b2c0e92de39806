//! HSB (hue, saturation, brightness) color space.
//!
//! All palette math happens here: boosting saturation, brightening dark
//! covers and rotating to complementary hues are one-component operations
//! in HSB. Every component is kept inside its domain by construction:
//!
//! - `h` wraps into 0.0..1.0 (a full turn is 1.0, not 360)
//! - `s` and `b` saturate at 0.0 and 1.0

use serde::{Deserialize, Serialize};

use super::rgb::Rgb;

/// A color in HSB (a.k.a. HSV) space.
///
/// Construct through [`Hsb::new`] so the component invariants hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    /// Hue: 0.0..1.0, wrapping (0.0 = red, 1/3 = green, 2/3 = blue)
    pub h: f64,
    /// Saturation: 0.0 (grey) to 1.0 (fully saturated)
    pub s: f64,
    /// Brightness: 0.0 (black) to 1.0
    pub b: f64,
}

/// Wrap a hue into 0.0..1.0.
#[inline]
pub fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(1.0);
    // rem_euclid can return exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Shortest distance between two hues on the color wheel (0.0..=0.5).
#[inline]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (wrap_hue(a) - wrap_hue(b)).abs();
    d.min(1.0 - d)
}

impl Hsb {
    /// Create a color, wrapping hue and clamping saturation and brightness.
    #[inline]
    pub fn new(h: f64, s: f64, b: f64) -> Self {
        Self {
            h: wrap_hue(h),
            s: clamp_unit(s),
            b: clamp_unit(b),
        }
    }

    /// Rotate the hue by `delta` turns.
    #[inline]
    pub fn rotate_hue(self, delta: f64) -> Self {
        Self::new(self.h + delta, self.s, self.b)
    }

    /// Multiply saturation by `factor`, saturating at 1.0.
    #[inline]
    pub fn scale_saturation(self, factor: f64) -> Self {
        Self::new(self.h, self.s * factor, self.b)
    }

    /// Multiply brightness by `factor`, saturating at `ceiling`.
    #[inline]
    pub fn scale_brightness(self, factor: f64, ceiling: f64) -> Self {
        Self::new(self.h, self.s, (self.b * factor).min(ceiling))
    }

    /// Raise saturation to at least `floor`.
    #[inline]
    pub fn with_min_saturation(self, floor: f64) -> Self {
        Self::new(self.h, self.s.max(floor), self.b)
    }

    /// Convert back to RGB.
    #[inline]
    pub fn to_rgb(self) -> Rgb {
        Rgb::from(self)
    }
}

/// NaN-safe clamp into 0.0..=1.0 (NaN maps to 0.0).
#[inline]
fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

impl From<Rgb> for Hsb {
    fn from(c: Rgb) -> Self {
        let max = c.r.max(c.g).max(c.b);
        let min = c.r.min(c.g).min(c.b);
        let delta = max - min;

        let s = if max > 0.0 { delta / max } else { 0.0 };

        // Achromatic: hue is undefined, report 0.0
        let h = if delta <= f64::EPSILON {
            0.0
        } else if max == c.r {
            ((c.g - c.b) / delta).rem_euclid(6.0) / 6.0
        } else if max == c.g {
            ((c.b - c.r) / delta + 2.0) / 6.0
        } else {
            ((c.r - c.g) / delta + 4.0) / 6.0
        };

        Self::new(h, s, max)
    }
}

impl From<Hsb> for Rgb {
    fn from(c: Hsb) -> Self {
        let h6 = c.h * 6.0;
        let sector = h6.floor();
        let f = h6 - sector;
        let p = c.b * (1.0 - c.s);
        let q = c.b * (1.0 - c.s * f);
        let t = c.b * (1.0 - c.s * (1.0 - f));

        let (r, g, b) = match sector as i64 % 6 {
            0 => (c.b, t, p),
            1 => (q, c.b, p),
            2 => (p, c.b, t),
            3 => (p, q, c.b),
            4 => (t, p, c.b),
            _ => (c.b, p, q),
        };
        Rgb::new(r, g, b)
    }
}
