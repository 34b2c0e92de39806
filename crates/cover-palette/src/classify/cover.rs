//! Cover-level statistics: brightness, white background, hue spread.

use serde::{Deserialize, Serialize};

use crate::color::{wrap_hue, Hsb};
use crate::quantize::ColorCluster;
use crate::sample::Pixel;

/// A pixel counts as "white background" above this brightness...
const WHITE_MIN_BRIGHTNESS: f64 = 0.85;
/// ...and below this saturation.
const WHITE_MAX_SATURATION: f64 = 0.2;

/// White-pixel ratio above which the cover has a light background.
/// Consumed by the composition advisor.
pub const WHITE_BACKGROUND_THRESHOLD: f64 = 0.3;

/// White-pixel ratio above which the white-cover palette formula runs.
/// This is the canonical white-cover gate.
pub const WHITE_COVER_THRESHOLD: f64 = 0.6;

/// Average brightness below which a cover is considered dark.
pub const DARK_COVER_THRESHOLD: f64 = 0.3;

/// Clusters at or below this saturation carry no usable hue.
const CHROMATIC_MIN_SATURATION: f64 = 0.1;
/// Hue spread (in turns) below which a cover reads as one hue (~30 degrees).
const MONOCHROME_MAX_SPREAD: f64 = 0.083;

/// Minimum saturation for a cluster to define the dominant hue.
const DOMINANT_MIN_SATURATION: f64 = 0.2;
/// Neutral default (cyan) when no cluster is saturated enough.
pub const NEUTRAL_HUE: f64 = 0.5;

/// Aggregate color character of a cover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverProfile {
    /// Fraction of sampled pixels that are bright and unsaturated.
    pub white_pixel_ratio: f64,
    /// `white_pixel_ratio > 0.3`: light background.
    pub has_white_background: bool,
    /// `white_pixel_ratio > 0.6`: white-cover palette formula applies.
    pub is_white_cover: bool,
    pub is_monochromatic: bool,
    pub is_dark: bool,
    /// Unweighted mean brightness of all sampled pixels.
    pub average_brightness: f64,
    pub dominant_hue: f64,
}

impl Default for CoverProfile {
    /// Profile of a cover with no usable pixels: mid-brightness, neutral hue.
    fn default() -> Self {
        Self {
            white_pixel_ratio: 0.0,
            has_white_background: false,
            is_white_cover: false,
            is_monochromatic: false,
            is_dark: false,
            average_brightness: 0.5,
            dominant_hue: NEUTRAL_HUE,
        }
    }
}

/// Computes a [`CoverProfile`].
///
/// Runs on the unfiltered sample stream: near-black and near-white pixels
/// that the quantizer drops still count here.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverClassifier;

impl CoverClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, pixels: &[Pixel], clusters: &[ColorCluster]) -> CoverProfile {
        if pixels.is_empty() {
            return CoverProfile {
                is_monochromatic: is_monochromatic(clusters),
                dominant_hue: dominant_hue(clusters),
                ..CoverProfile::default()
            };
        }

        let mut white = 0usize;
        let mut brightness_sum = 0.0;
        for pixel in pixels {
            let hsb = Hsb::from(*pixel);
            brightness_sum += hsb.b;
            if hsb.b > WHITE_MIN_BRIGHTNESS && hsb.s < WHITE_MAX_SATURATION {
                white += 1;
            }
        }

        let count = pixels.len() as f64;
        let white_pixel_ratio = white as f64 / count;
        let average_brightness = brightness_sum / count;

        CoverProfile {
            white_pixel_ratio,
            has_white_background: white_pixel_ratio > WHITE_BACKGROUND_THRESHOLD,
            is_white_cover: white_pixel_ratio > WHITE_COVER_THRESHOLD,
            is_monochromatic: is_monochromatic(clusters),
            is_dark: average_brightness < DARK_COVER_THRESHOLD,
            average_brightness,
            dominant_hue: dominant_hue(clusters),
        }
    }
}

/// True when all chromatic clusters sit within ~30 degrees of hue.
///
/// Uses the hues of clusters with saturation above 0.1. Two or more such
/// clusters must fit in an arc narrower than the threshold; a cover whose
/// only chromatic content is a single cluster is one hue by definition and
/// also counts.
pub fn is_monochromatic(clusters: &[ColorCluster]) -> bool {
    let hues: Vec<f64> = clusters
        .iter()
        .filter(|c| c.color.s > CHROMATIC_MIN_SATURATION)
        .map(|c| wrap_hue(c.color.h))
        .collect();

    match hues.len() {
        0 => false,
        1 => true,
        _ => hue_spread(hues) < MONOCHROME_MAX_SPREAD,
    }
}

/// Length (in turns) of the shortest arc of the hue circle holding every hue.
///
/// The complement of the largest gap between neighbouring hues, including
/// the gap that wraps from the last hue back to the first. For two hues
/// this is `min(max - min, 1 - (max - min))`.
fn hue_spread(mut hues: Vec<f64>) -> f64 {
    hues.sort_by(f64::total_cmp);
    let (Some(&first), Some(&last)) = (hues.first(), hues.last()) else {
        return 0.0;
    };

    let largest_gap = hues
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold(1.0 - (last - first), f64::max);
    1.0 - largest_gap
}

/// Hue of the most populated cluster with saturation above 0.2.
pub fn dominant_hue(clusters: &[ColorCluster]) -> f64 {
    // First cluster wins ties
    let mut best: Option<&ColorCluster> = None;
    for cluster in clusters.iter().filter(|c| c.color.s > DOMINANT_MIN_SATURATION) {
        if best.map_or(true, |b| cluster.pixel_count > b.pixel_count) {
            best = Some(cluster);
        }
    }
    best.map_or(NEUTRAL_HUE, |c| c.color.h)
}
