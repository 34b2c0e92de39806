//! Gradient pattern families and their placement functions.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::classify::Genre;

use super::geometry::{CanvasSize, Point};

/// Golden angle in radians, used for organic scatter.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Layout family for the orbs of a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientPattern {
    CornerBlobs,
    HorizontalWaves,
    RadialBurst,
    VerticalFlow,
    DiagonalDrift,
    OrganicScatter,
    CircularRipple,
    SpiralTwist,
}

/// Opacity profile of an orb's radial stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Falloff {
    Standard,
    /// Flow patterns: wider shoulder.
    Soft,
    /// Burst patterns: tighter near field.
    Sharp,
}

/// Stop locations shared by every falloff.
pub const STOP_LOCATIONS: [f64; 5] = [0.0, 0.3, 0.6, 0.85, 1.0];

impl Falloff {
    /// Opacity at each of [`STOP_LOCATIONS`]. Non-increasing, ends at 0.
    pub fn opacities(self) -> [f64; 5] {
        match self {
            Falloff::Standard => [1.0, 0.75, 0.45, 0.15, 0.0],
            Falloff::Soft => [1.0, 0.8, 0.5, 0.2, 0.0],
            Falloff::Sharp => [1.0, 0.7, 0.4, 0.1, 0.0],
        }
    }
}

/// Title keywords that force a pattern, checked in order before the genre.
const TITLE_RULES: &[(&str, GradientPattern)] = &[
    ("odyssey", GradientPattern::HorizontalWaves),
    ("ocean", GradientPattern::HorizontalWaves),
    ("voyage", GradientPattern::HorizontalWaves),
    ("galaxy", GradientPattern::RadialBurst),
    ("supernova", GradientPattern::RadialBurst),
    ("spiral", GradientPattern::SpiralTwist),
    ("vortex", GradientPattern::SpiralTwist),
    ("labyrinth", GradientPattern::SpiralTwist),
    ("ripple", GradientPattern::CircularRipple),
    ("forest", GradientPattern::OrganicScatter),
    ("garden", GradientPattern::OrganicScatter),
    ("waterfall", GradientPattern::VerticalFlow),
    ("cascade", GradientPattern::VerticalFlow),
];

impl GradientPattern {
    pub const ALL: [GradientPattern; 8] = [
        GradientPattern::CornerBlobs,
        GradientPattern::HorizontalWaves,
        GradientPattern::RadialBurst,
        GradientPattern::VerticalFlow,
        GradientPattern::DiagonalDrift,
        GradientPattern::OrganicScatter,
        GradientPattern::CircularRipple,
        GradientPattern::SpiralTwist,
    ];

    /// Choose a pattern for a book.
    ///
    /// Title keywords win over the genre. Genres without a fixed pattern
    /// (Literary, Unknown) hash `(genre, title)`, so the same book always
    /// gets the same pattern.
    pub fn select(genre: Genre, title: Option<&str>) -> Self {
        let title = title.map(str::trim).unwrap_or_default().to_lowercase();

        if let Some((_, pattern)) = TITLE_RULES.iter().find(|(kw, _)| title.contains(kw)) {
            return *pattern;
        }

        match genre {
            Genre::Fantasy => GradientPattern::OrganicScatter,
            Genre::Philosophy => GradientPattern::HorizontalWaves,
            Genre::Romance => GradientPattern::CornerBlobs,
            Genre::Thriller => GradientPattern::DiagonalDrift,
            Genre::SciFi => GradientPattern::RadialBurst,
            Genre::Mystery => GradientPattern::SpiralTwist,
            Genre::SelfHelp => GradientPattern::VerticalFlow,
            Genre::Science => GradientPattern::CircularRipple,
            Genre::Medical => GradientPattern::VerticalFlow,
            Genre::Business => GradientPattern::DiagonalDrift,
            Genre::History => GradientPattern::CornerBlobs,
            Genre::Literary | Genre::Unknown => {
                let key = genre.as_str().bytes().chain([0x1f]).chain(title.bytes());
                let hash = fnv1a(key);
                Self::ALL[(hash % Self::ALL.len() as u64) as usize]
            }
        }
    }

    /// Center of orb `index` out of `count`.
    pub fn position(self, index: usize, count: usize, canvas: CanvasSize) -> Point {
        let count = count.max(1);
        let i = index as f64;
        let n = count as f64;
        let (w, h) = (canvas.width, canvas.height);
        let center = canvas.center();
        let short = canvas.short_side();

        match self {
            GradientPattern::CornerBlobs => {
                const CORNERS: [(f64, f64); 4] =
                    [(0.15, 0.15), (0.85, 0.15), (0.15, 0.85), (0.85, 0.85)];
                match CORNERS.get(index) {
                    Some(&(fx, fy)) => Point::new(fx * w, fy * h),
                    None => center,
                }
            }
            GradientPattern::HorizontalWaves => {
                let t = (i + 0.5) / n;
                Point::new(t * w, h * (0.5 + 0.25 * (TAU * t).sin()))
            }
            GradientPattern::RadialBurst => {
                let angle = TAU * i / n;
                center.offset(0.3 * w * angle.cos(), 0.3 * w * angle.sin())
            }
            GradientPattern::VerticalFlow => {
                let t = (i + 0.5) / n;
                Point::new(w * (0.5 + 0.2 * (PI * i).cos()), t * h)
            }
            GradientPattern::DiagonalDrift => {
                let t = (i + 0.5) / n;
                let side = if index % 2 == 0 { 1.0 } else { -1.0 };
                Point::new(t * w + side * 0.1 * w, t * h - side * 0.05 * h)
            }
            GradientPattern::OrganicScatter => {
                let angle = GOLDEN_ANGLE * i;
                let distance = 0.4 * short * ((i + 0.5) / n).sqrt();
                center.offset(distance * angle.cos(), distance * angle.sin())
            }
            GradientPattern::CircularRipple => center,
            GradientPattern::SpiralTwist => {
                let turn = if count > 1 { i / (n - 1.0) } else { 0.0 };
                let angle = turn * 4.0 * PI;
                let distance = 0.4 * short * turn;
                center.offset(distance * angle.cos(), distance * angle.sin())
            }
        }
        .clamp_to(canvas)
    }

    /// Orb radius as a fraction of the canvas short side (0.3..=0.6).
    pub fn radius_factor(self, index: usize, count: usize) -> f64 {
        match self {
            GradientPattern::CornerBlobs => 0.6,
            GradientPattern::HorizontalWaves => 0.5,
            GradientPattern::RadialBurst => 0.35,
            GradientPattern::VerticalFlow => 0.5,
            GradientPattern::DiagonalDrift => 0.45,
            GradientPattern::OrganicScatter => 0.4,
            GradientPattern::CircularRipple => {
                // Back layer largest, each ring inside the previous one.
                if count > 1 {
                    0.6 - 0.3 * index as f64 / (count - 1) as f64
                } else {
                    0.6
                }
            }
            GradientPattern::SpiralTwist => 0.35,
        }
    }

    pub fn falloff(self) -> Falloff {
        match self {
            GradientPattern::HorizontalWaves | GradientPattern::VerticalFlow => Falloff::Soft,
            GradientPattern::RadialBurst => Falloff::Sharp,
            _ => Falloff::Standard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GradientPattern::CornerBlobs => "corner-blobs",
            GradientPattern::HorizontalWaves => "horizontal-waves",
            GradientPattern::RadialBurst => "radial-burst",
            GradientPattern::VerticalFlow => "vertical-flow",
            GradientPattern::DiagonalDrift => "diagonal-drift",
            GradientPattern::OrganicScatter => "organic-scatter",
            GradientPattern::CircularRipple => "circular-ripple",
            GradientPattern::SpiralTwist => "spiral-twist",
        }
    }
}

impl std::fmt::Display for GradientPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 64-bit FNV-1a.
fn fnv1a(bytes: impl IntoIterator<Item = u8>) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes
        .into_iter()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}
