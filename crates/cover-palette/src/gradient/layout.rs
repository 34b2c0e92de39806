//! Orb layout and the serializable gradient description.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::composition::{ColorScheme, CompositionParams, LayerMode};
use crate::palette::{Palette, Role};

use super::geometry::{CanvasSize, Point};
use super::pattern::{GradientPattern, STOP_LOCATIONS};

/// Amplitude of the breathing radius oscillation.
pub const BREATHING_AMPLITUDE: f64 = 0.02;
/// Per-orb phase offset of the breathing oscillation.
pub const BREATHING_PHASE_STEP: f64 = PI / 3.0;
/// Position drift as a fraction of the canvas short side.
pub const DRIFT_FRACTION: f64 = 0.01;

/// One stop of a radial or linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: Rgb,
    pub opacity: f64,
    /// 0.0 (center) to 1.0 (edge)
    pub location: f64,
}

/// How a layer composites onto the ones below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    Normal,
    Screen,
    SoftLight,
}

impl BlendMode {
    /// The first layer paints normally; later layers lighten on dark
    /// backgrounds and soft-light on light ones.
    pub fn for_layer(index: usize, scheme: ColorScheme) -> Self {
        match (index, scheme) {
            (0, _) => BlendMode::Normal,
            (_, ColorScheme::Dark) => BlendMode::Screen,
            (_, ColorScheme::Light) => BlendMode::SoftLight,
        }
    }
}

/// One radial gradient layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub role: Role,
    #[serde(flatten)]
    pub position: Point,
    pub radius: f64,
    pub stops: Vec<ColorStop>,
    pub blend_mode: BlendMode,
}

/// Flat two-stop gradient used when transparency is reduced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: [ColorStop; 2],
}

/// Complete, renderer-ready description of an ambient background.
///
/// Static orbs are the rest state; [`GradientSpec::at_phase`] returns the
/// breathing variant for a caller-driven phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientSpec {
    pub canvas: CanvasSize,
    pub pattern: GradientPattern,
    pub orbs: Vec<Orb>,
    pub linear: Option<LinearGradient>,
    pub composition: CompositionParams,
}

impl GradientSpec {
    pub fn mode(&self) -> LayerMode {
        self.composition.mode
    }

    /// Orbs perturbed for breathing phase `phase` (radians).
    ///
    /// Orb `i` has its radius scaled by `1 + 0.02 sin(phase + i * pi/3)` and
    /// its center moved on a small circle of radius 1% of the short side.
    pub fn at_phase(&self, phase: f64) -> Vec<Orb> {
        let phase = if phase.is_finite() { phase } else { 0.0 };
        let drift = DRIFT_FRACTION * self.canvas.short_side();

        self.orbs
            .iter()
            .enumerate()
            .map(|(i, orb)| {
                let angle = phase + i as f64 * BREATHING_PHASE_STEP;
                Orb {
                    position: orb
                        .position
                        .offset(drift * angle.cos(), drift * angle.sin())
                        .clamp_to(self.canvas),
                    radius: orb.radius * (1.0 + BREATHING_AMPLITUDE * angle.sin()),
                    ..orb.clone()
                }
            })
            .collect()
    }

    /// Effective gradient opacity at a vertical position (0.0 top, 1.0 bottom).
    pub fn opacity_at(&self, vertical_fraction: f64) -> f64 {
        self.composition.opacity_at(vertical_fraction)
    }

    /// Blend mode of each orb, bottom layer first.
    pub fn blend_modes(&self) -> Vec<BlendMode> {
        self.orbs.iter().map(|orb| orb.blend_mode).collect()
    }
}

/// Places palette roles on the canvas according to a [`GradientPattern`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientLayoutEngine;

impl GradientLayoutEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn layout(
        &self,
        palette: &Palette,
        canvas: CanvasSize,
        pattern: GradientPattern,
        composition: &CompositionParams,
    ) -> GradientSpec {
        let canvas = CanvasSize::new(canvas.width, canvas.height);

        if composition.is_flat() {
            return GradientSpec {
                canvas,
                pattern,
                orbs: Vec::new(),
                linear: Some(flat_gradient(palette, canvas)),
                composition: *composition,
            };
        }

        let roles: Vec<Role> = palette.visible_roles().collect();
        let count = roles.len();
        let falloff = pattern.falloff().opacities();

        let orbs = roles
            .iter()
            .enumerate()
            .map(|(index, &role)| {
                let color = palette.color(role).to_rgb();
                let weight = palette.opacity(role);
                let stops = STOP_LOCATIONS
                    .iter()
                    .zip(falloff)
                    .map(|(&location, opacity)| ColorStop {
                        color,
                        opacity: opacity * weight,
                        location,
                    })
                    .collect();

                Orb {
                    role,
                    position: pattern.position(index, count, canvas),
                    radius: canvas.short_side() * pattern.radius_factor(index, count),
                    stops,
                    blend_mode: BlendMode::for_layer(index, composition.scheme),
                }
            })
            .collect();

        GradientSpec {
            canvas,
            pattern,
            orbs,
            linear: None,
            composition: *composition,
        }
    }
}

fn flat_gradient(palette: &Palette, canvas: CanvasSize) -> LinearGradient {
    let stop = |color: Rgb, location: f64| ColorStop {
        color,
        opacity: 1.0,
        location,
    };

    LinearGradient {
        start: Point::new(canvas.width / 2.0, 0.0),
        end: Point::new(canvas.width / 2.0, canvas.height),
        stops: [
            stop(palette.primary.to_rgb(), 0.0),
            stop(palette.secondary.to_rgb(), 1.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Genre;
    use crate::composition::{AccessibilitySettings, CompositionAdvisor};
    use crate::CoverProfile;

    fn params(settings: AccessibilitySettings, scheme: ColorScheme) -> CompositionParams {
        CompositionAdvisor::new().advise(&CoverProfile::default(), settings, scheme)
    }

    fn spec(pattern: GradientPattern) -> GradientSpec {
        GradientLayoutEngine::new().layout(
            &Palette::for_genre(Genre::Fantasy),
            CanvasSize::default(),
            pattern,
            &params(AccessibilitySettings::default(), ColorScheme::Dark),
        )
    }

    #[test]
    fn test_one_orb_per_visible_role() {
        let spec = spec(GradientPattern::CornerBlobs);
        assert_eq!(spec.orbs.len(), 5);
        assert!(spec.linear.is_none());
        assert_eq!(spec.mode(), LayerMode::Layered);
        assert_eq!(spec.orbs[0].role, Role::Primary);
        assert_eq!(spec.orbs[4].role, Role::Highlight);
    }

    #[test]
    fn test_stops_monotonic_and_transparent_at_edge() {
        for pattern in GradientPattern::ALL {
            for orb in spec(pattern).orbs {
                assert_eq!(orb.stops.len(), 5);
                assert!(orb.stops.windows(2).all(|w| w[0].opacity >= w[1].opacity));
                assert!(orb.stops.windows(2).all(|w| w[0].location < w[1].location));
                assert_eq!(orb.stops[4].opacity, 0.0);
            }
        }
    }

    #[test]
    fn test_layer_opacity_scales_stops() {
        let spec = spec(GradientPattern::CornerBlobs);
        // fallback palette layer opacities are 1.0, 0.9, ...
        assert_eq!(spec.orbs[0].stops[0].opacity, 1.0);
        assert!((spec.orbs[1].stops[0].opacity - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_zero_opacity_roles_are_skipped() {
        let mut palette = Palette::for_genre(Genre::Literary);
        palette.layer_opacity = [0.4, 0.3, 0.2, 0.1, 0.0];

        let spec = GradientLayoutEngine::new().layout(
            &palette,
            CanvasSize::default(),
            GradientPattern::RadialBurst,
            &CompositionParams::default(),
        );
        assert_eq!(spec.orbs.len(), 4);
        assert!(spec.orbs.iter().all(|orb| orb.role != Role::Highlight));
    }

    #[test]
    fn test_blend_modes_follow_scheme() {
        let dark = spec(GradientPattern::CornerBlobs);
        assert_eq!(dark.blend_modes()[0], BlendMode::Normal);
        assert!(dark.blend_modes()[1..].iter().all(|m| *m == BlendMode::Screen));

        let light = GradientLayoutEngine::new().layout(
            &Palette::for_genre(Genre::Fantasy),
            CanvasSize::default(),
            GradientPattern::CornerBlobs,
            &params(AccessibilitySettings::default(), ColorScheme::Light),
        );
        assert!(light.blend_modes()[1..].iter().all(|m| *m == BlendMode::SoftLight));
    }

    #[test]
    fn test_breathing_perturbs_within_bounds() {
        let spec = spec(GradientPattern::OrganicScatter);
        for step in 0..16 {
            let phase = step as f64 * PI / 8.0;
            let orbs = spec.at_phase(phase);
            assert_eq!(orbs.len(), spec.orbs.len());
            for (rest, moved) in spec.orbs.iter().zip(&orbs) {
                let ratio = moved.radius / rest.radius;
                assert!((0.98 - 1e-12..=1.02 + 1e-12).contains(&ratio));
                let drift = (moved.position.x - rest.position.x)
                    .hypot(moved.position.y - rest.position.y);
                assert!(drift <= DRIFT_FRACTION * spec.canvas.short_side() + 1e-9);
                assert_eq!(moved.stops, rest.stops);
            }
        }
        assert_eq!(spec.at_phase(1.5), spec.at_phase(1.5));
    }

    #[test]
    fn test_breathing_phase_offsets_differ_per_orb() {
        let spec = spec(GradientPattern::CornerBlobs);
        let orbs = spec.at_phase(0.0);
        // sin(0) vs sin(pi/3)
        assert_eq!(orbs[0].radius, spec.orbs[0].radius);
        assert!(orbs[1].radius > spec.orbs[1].radius);
    }

    #[test]
    fn test_reduce_transparency_is_flat() {
        let palette = Palette::for_genre(Genre::Thriller);
        let composition = params(
            AccessibilitySettings {
                reduce_transparency: true,
                ..Default::default()
            },
            ColorScheme::Light,
        );
        let spec = GradientLayoutEngine::new().layout(
            &palette,
            CanvasSize::default(),
            GradientPattern::RadialBurst,
            &composition,
        );

        assert!(spec.orbs.is_empty());
        assert!(spec.at_phase(2.0).is_empty());
        let linear = spec.linear.expect("flat gradient");
        assert_eq!(linear.stops[0].color, palette.primary.to_rgb());
        assert_eq!(linear.stops[1].color, palette.secondary.to_rgb());
        assert_eq!(spec.composition.opacity, 0.3);
    }

    #[test]
    fn test_orbs_serialize_with_flat_position() {
        let spec = spec(GradientPattern::CornerBlobs);
        let json = serde_json::to_value(&spec.orbs[0]).unwrap();
        assert!(json.get("x").is_some());
        assert!(json.get("y").is_some());
        assert!(json.get("radius").is_some());
        assert_eq!(json["role"], "primary");
    }
}
