//! The final role-assigned palette.

use serde::{Deserialize, Serialize};

use crate::color::{Hsb, Rgb};

/// Palette slot. Each role carries a minimum saturation enforced by the
/// synthesizer's final pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Secondary,
    Tertiary,
    Accent,
    Highlight,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Primary,
        Role::Secondary,
        Role::Tertiary,
        Role::Accent,
        Role::Highlight,
    ];

    /// Saturation floor for this role.
    pub fn min_saturation(self) -> f64 {
        match self {
            Role::Primary | Role::Secondary | Role::Tertiary => 0.7,
            Role::Accent => 0.8,
            Role::Highlight => 0.4,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Color temperature of the palette's dominant hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Cool,
    Warm,
    Neutral,
}

impl Temperature {
    /// [0.4, 0.7] is cool, <= 0.15 or >= 0.85 warm, anything else neutral.
    pub fn from_hue(hue: f64) -> Self {
        if (0.4..=0.7).contains(&hue) {
            Temperature::Cool
        } else if hue <= 0.15 || hue >= 0.85 {
            Temperature::Warm
        } else {
            Temperature::Neutral
        }
    }
}

/// Which synthesis rule produced a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteFormula {
    /// Cream base, cover accent, genre mood, dark anchor (40/30/20/10).
    WhiteCover,
    /// One hue at stepped saturation/brightness plus a complementary accent.
    Monochromatic,
    /// Boosted top clusters, padded with complementary variants.
    Colorful,
    /// Genre table only: the cover was unreadable or had no usable color.
    GenreFallback,
}

/// Five role colors plus compositing metadata.
///
/// `layer_opacity` is indexed by [`Role::index`]. The white-cover formula
/// encodes its blend weights here instead of averaging colors, so the
/// layered gradient composites them later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Hsb,
    pub secondary: Hsb,
    pub tertiary: Hsb,
    pub accent: Hsb,
    pub highlight: Hsb,
    pub layer_opacity: [f64; 5],
    pub is_monochrome: bool,
    pub dominant_hue: f64,
    pub temperature: Temperature,
    pub formula: PaletteFormula,
}

impl Palette {
    #[inline]
    pub fn color(&self, role: Role) -> Hsb {
        match role {
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Tertiary => self.tertiary,
            Role::Accent => self.accent,
            Role::Highlight => self.highlight,
        }
    }

    #[inline]
    pub fn opacity(&self, role: Role) -> f64 {
        self.layer_opacity[role.index()]
    }

    /// All role colors in role order.
    pub fn colors(&self) -> [Hsb; 5] {
        Role::ALL.map(|role| self.color(role))
    }

    /// All role colors as RGB, in role order.
    pub fn rgb(&self) -> [Rgb; 5] {
        self.colors().map(Hsb::to_rgb)
    }

    /// Number of colors; always 5.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        Role::ALL.len()
    }

    /// Roles that actually paint (non-zero layer opacity).
    pub fn visible_roles(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL
            .into_iter()
            .filter(move |role| self.opacity(*role) > 0.0)
    }
}
