//! Rule-dispatched palette synthesis.
//!
//! One of three formulas runs, chosen from the [`CoverProfile`]:
//!
//! | Condition | Formula |
//! |-----------|---------|
//! | `is_white_cover` | [`PaletteFormula::WhiteCover`] |
//! | no clusters at all | [`PaletteFormula::GenreFallback`] |
//! | `is_monochromatic` | [`PaletteFormula::Monochromatic`] |
//! | otherwise | [`PaletteFormula::Colorful`] |
//!
//! Every result then passes through the role saturation floors, so the
//! floor invariant holds regardless of which formula ran.

use crate::classify::{CoverProfile, Genre};
use crate::color::Hsb;
use crate::quantize::ColorCluster;

use super::palette::{Palette, PaletteFormula, Role, Temperature};

/// Warm paper tone at the base of white-cover palettes.
const CREAM: Hsb = Hsb {
    h: 0.11,
    s: 0.08,
    b: 0.98,
};

/// Ink-dark anchor that keeps white-cover gradients from washing out.
const DARK_ANCHOR: Hsb = Hsb {
    h: 0.62,
    s: 0.25,
    b: 0.18,
};

/// White-cover weights: cream, cover accent, mood, anchor. Highlight unused.
const WHITE_COVER_WEIGHTS: [f64; 5] = [0.4, 0.3, 0.2, 0.1, 0.0];

/// Layer opacities for the cover-derived and fallback formulas.
const LAYERED_OPACITY: [f64; 5] = [1.0, 0.9, 0.8, 0.7, 0.6];

/// A cluster must be at least this saturated to donate the white-cover accent.
const ACCENT_MIN_SATURATION: f64 = 0.2;

/// Saturation/brightness multipliers for colorful covers.
const DARK_BOOST: (f64, f64) = (1.8, 1.4);
const NORMAL_BOOST: (f64, f64) = (1.5, 1.3);
const BRIGHTNESS_CEILING: f64 = 0.95;

/// Colors taken from the cluster list before padding.
const COLORFUL_SLOTS: usize = 4;

/// Highlight brightness for derived highlights.
const HIGHLIGHT_BRIGHTNESS: f64 = 0.95;

/// Combines clusters, cover profile and genre into a [`Palette`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteSynthesizer;

impl PaletteSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn synthesize(
        &self,
        clusters: &[ColorCluster],
        profile: &CoverProfile,
        genre: Genre,
    ) -> Palette {
        let raw = if profile.is_white_cover {
            white_cover(clusters, genre)
        } else if clusters.is_empty() {
            genre_fallback(genre)
        } else if profile.is_monochromatic {
            monochromatic(clusters)
        } else {
            colorful(clusters, profile)
        };

        finish(raw)
    }

    /// Palette from the genre tables alone (unreadable cover).
    pub fn for_genre(&self, genre: Genre) -> Palette {
        finish(genre_fallback(genre))
    }
}

impl Palette {
    /// Genre-only palette for covers that could not be decoded.
    pub fn for_genre(genre: Genre) -> Self {
        PaletteSynthesizer::new().for_genre(genre)
    }
}

/// Formula output before the floor pass.
struct RawPalette {
    colors: [Hsb; 5],
    layer_opacity: [f64; 5],
    dominant_hue: f64,
    formula: PaletteFormula,
}

fn white_cover(clusters: &[ColorCluster], genre: Genre) -> RawPalette {
    let mood = genre.mood_color().to_hsb();

    // Most saturated qualifying cluster; first wins ties.
    let mut accent: Option<Hsb> = None;
    for cluster in clusters.iter().filter(|c| c.color.s > ACCENT_MIN_SATURATION) {
        if accent.map_or(true, |a| cluster.color.s > a.s) {
            accent = Some(cluster.color);
        }
    }
    let accent = accent.unwrap_or(mood);

    RawPalette {
        colors: [
            CREAM,
            accent,
            mood,
            DARK_ANCHOR,
            Hsb::new(mood.h, 0.4, HIGHLIGHT_BRIGHTNESS),
        ],
        layer_opacity: WHITE_COVER_WEIGHTS,
        dominant_hue: accent.h,
        formula: PaletteFormula::WhiteCover,
    }
}

fn monochromatic(clusters: &[ColorCluster]) -> RawPalette {
    let base = clusters
        .iter()
        .find(|c| c.color.s > 0.1)
        .or_else(|| clusters.first())
        .map_or(Hsb::new(0.5, 0.5, 0.5), |c| c.color);

    let h = base.h;
    let primary = Hsb::new(h, base.s * 1.4, (base.b * 1.2).min(BRIGHTNESS_CEILING));
    let secondary = Hsb::new(h, primary.s * 0.85, primary.b * 0.8);
    let tertiary = Hsb::new(h, primary.s * 0.7, primary.b * 0.6);
    let accent = Hsb::new(h + 0.5, 0.85, 0.85);
    let highlight = Hsb::new(h, 0.3, HIGHLIGHT_BRIGHTNESS);

    RawPalette {
        colors: [primary, secondary, tertiary, accent, highlight],
        layer_opacity: LAYERED_OPACITY,
        dominant_hue: h,
        formula: PaletteFormula::Monochromatic,
    }
}

fn colorful(clusters: &[ColorCluster], profile: &CoverProfile) -> RawPalette {
    let (saturation_boost, brightness_boost) = if profile.is_dark {
        DARK_BOOST
    } else {
        NORMAL_BOOST
    };

    let mut picked: Vec<Hsb> = clusters
        .iter()
        .take(COLORFUL_SLOTS)
        .map(|c| {
            c.color
                .scale_saturation(saturation_boost)
                .scale_brightness(brightness_boost, BRIGHTNESS_CEILING)
        })
        .collect();

    pad_with_complements(&mut picked, COLORFUL_SLOTS);

    let primary = picked[0];
    let highlight = Hsb::new(primary.h, primary.s * 0.5, HIGHLIGHT_BRIGHTNESS);

    RawPalette {
        colors: [picked[0], picked[1], picked[2], picked[3], highlight],
        layer_opacity: LAYERED_OPACITY,
        dominant_hue: profile.dominant_hue,
        formula: PaletteFormula::Colorful,
    }
}

fn genre_fallback(genre: Genre) -> RawPalette {
    let [a, b, c, d] = genre.fallback_palette().map(|rgb| rgb.to_hsb());
    let mood = genre.mood_color().to_hsb();

    RawPalette {
        colors: [a, b, c, d, Hsb::new(mood.h, 0.4, HIGHLIGHT_BRIGHTNESS)],
        layer_opacity: LAYERED_OPACITY,
        dominant_hue: a.h,
        formula: PaletteFormula::GenreFallback,
    }
}

/// Append complementary variants of the last color until `target` colors
/// exist: hue +0.5, saturation x0.8, brightness x0.8.
///
/// An empty list is seeded with a neutral mid color so the guarantee holds
/// for any input.
pub fn pad_with_complements(colors: &mut Vec<Hsb>, target: usize) {
    if colors.is_empty() {
        colors.push(Hsb::new(0.5, 0.5, 0.5));
    }
    while colors.len() < target {
        let last = colors[colors.len() - 1];
        colors.push(Hsb::new(last.h + 0.5, last.s * 0.8, last.b * 0.8));
    }
}

/// Apply role floors and derive monochrome flag and temperature.
fn finish(raw: RawPalette) -> Palette {
    let [primary, secondary, tertiary, accent, highlight] = raw.colors;
    let floor = |color: Hsb, role: Role| color.with_min_saturation(role.min_saturation());

    Palette {
        primary: floor(primary, Role::Primary),
        secondary: floor(secondary, Role::Secondary),
        tertiary: floor(tertiary, Role::Tertiary),
        accent: floor(accent, Role::Accent),
        highlight: floor(highlight, Role::Highlight),
        layer_opacity: raw.layer_opacity,
        is_monochrome: raw.formula == PaletteFormula::Monochromatic,
        dominant_hue: raw.dominant_hue,
        temperature: Temperature::from_hue(raw.dominant_hue),
        formula: raw.formula,
    }
}
