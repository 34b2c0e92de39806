//! Legibility-driven opacity and scrim parameters.

use serde::{Deserialize, Serialize};

use crate::classify::{CoverProfile, DARK_COVER_THRESHOLD};

/// Upper edge of the top zone (fraction of height).
pub const TOP_ZONE_END: f64 = 0.3;
/// Lower edge of the bottom zone.
pub const BOTTOM_ZONE_START: f64 = 0.7;

/// Average brightness above which a cover counts as bright.
const BRIGHT_COVER_THRESHOLD: f64 = 0.7;

/// Scrim under the navigation bar on light covers.
const TOP_SCRIM: f64 = 0.02;
const BOTTOM_SCRIM: f64 = 0.05;
const BOTTOM_SCRIM_STRONG: f64 = 0.1;

/// Fixed opacity of the flat reduce-transparency gradient.
pub const FLAT_OPACITY: f64 = 0.3;

/// Host appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// Accessibility flags supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub reduce_transparency: bool,
    #[serde(default)]
    pub differentiate_without_color: bool,
}

/// How the gradient is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerMode {
    /// Radial orbs, one per visible palette role.
    Layered,
    /// One two-stop linear gradient, no orbs.
    Flat,
}

/// Brightness bucket used by the opacity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrightnessBucket {
    Dark,
    Mid,
    Bright,
}

impl BrightnessBucket {
    pub fn of(profile: &CoverProfile) -> Self {
        if profile.average_brightness < DARK_COVER_THRESHOLD {
            BrightnessBucket::Dark
        } else if profile.average_brightness > BRIGHT_COVER_THRESHOLD
            || profile.has_white_background
        {
            BrightnessBucket::Bright
        } else {
            BrightnessBucket::Mid
        }
    }

    /// Overall gradient opacity for this bucket under `scheme`.
    pub fn opacity(self, scheme: ColorScheme) -> f64 {
        match (self, scheme) {
            (BrightnessBucket::Dark, ColorScheme::Dark) => 0.5,
            (BrightnessBucket::Dark, ColorScheme::Light) => 0.6,
            (BrightnessBucket::Bright, ColorScheme::Dark) => 0.6,
            (BrightnessBucket::Bright, ColorScheme::Light) => 0.8,
            (BrightnessBucket::Mid, ColorScheme::Dark) => 0.6,
            (BrightnessBucket::Mid, ColorScheme::Light) => 0.7,
        }
    }
}

/// Output of [`CompositionAdvisor::advise`].
///
/// Darkening values are the alpha of a black scrim laid over each vertical
/// zone; `opacity` is the overall gradient opacity before zone attenuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionParams {
    pub mode: LayerMode,
    pub scheme: ColorScheme,
    pub brightness: BrightnessBucket,
    pub opacity: f64,
    pub top_darkening: f64,
    pub middle_darkening: f64,
    pub bottom_darkening: f64,
}

impl Default for CompositionParams {
    fn default() -> Self {
        CompositionAdvisor::new().advise(
            &CoverProfile::default(),
            AccessibilitySettings::default(),
            ColorScheme::default(),
        )
    }
}

impl CompositionParams {
    /// Scrim alpha at a vertical position (0.0 = top edge, 1.0 = bottom).
    pub fn darkening_at(&self, vertical_fraction: f64) -> f64 {
        let y = if vertical_fraction.is_nan() {
            0.0
        } else {
            vertical_fraction.clamp(0.0, 1.0)
        };
        if y < TOP_ZONE_END {
            self.top_darkening
        } else if y >= BOTTOM_ZONE_START {
            self.bottom_darkening
        } else {
            self.middle_darkening
        }
    }

    /// Effective gradient opacity at a vertical position.
    ///
    /// The flat gradient keeps its fixed opacity everywhere; scrims only
    /// attenuate the layered composition.
    pub fn opacity_at(&self, vertical_fraction: f64) -> f64 {
        if self.is_flat() {
            return self.opacity;
        }
        self.opacity * (1.0 - self.darkening_at(vertical_fraction))
    }

    pub fn is_flat(&self) -> bool {
        self.mode == LayerMode::Flat
    }
}

/// Picks opacity and scrims from the cover profile and host settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositionAdvisor;

impl CompositionAdvisor {
    pub fn new() -> Self {
        Self
    }

    pub fn advise(
        &self,
        profile: &CoverProfile,
        accessibility: AccessibilitySettings,
        scheme: ColorScheme,
    ) -> CompositionParams {
        let brightness = BrightnessBucket::of(profile);

        let top_darkening = if profile.is_dark { 0.0 } else { TOP_SCRIM };
        let bottom_darkening =
            if accessibility.differentiate_without_color || brightness == BrightnessBucket::Bright {
                BOTTOM_SCRIM_STRONG
            } else {
                BOTTOM_SCRIM
            };

        let (mode, opacity) = if accessibility.reduce_transparency {
            (LayerMode::Flat, FLAT_OPACITY)
        } else {
            (LayerMode::Layered, brightness.opacity(scheme))
        };

        CompositionParams {
            mode,
            scheme,
            brightness,
            opacity,
            top_darkening,
            middle_darkening: 0.0,
            bottom_darkening,
        }
    }
}
