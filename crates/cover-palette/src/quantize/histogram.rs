//! Bucketed HSB histogram with near-duplicate merging.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::color::Hsb;
use crate::sample::Pixel;

/// Maximum number of clusters returned.
pub const MAX_CLUSTERS: usize = 10;

const HUE_BINS: u32 = 24;
const SATURATION_BINS: u32 = 5;
const BRIGHTNESS_BINS: u32 = 5;

/// Near-black and near-white pixels do not contribute to clusters.
const MIN_BRIGHTNESS: f64 = 0.1;
const MAX_BRIGHTNESS: f64 = 0.95;

/// A quantization bucket: representative color plus population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorCluster {
    pub color: Hsb,
    pub pixel_count: u32,
}

impl ColorCluster {
    pub fn new(color: Hsb, pixel_count: u32) -> Self {
        Self { color, pixel_count }
    }
}

/// Quantized (hue, saturation, brightness) bin indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct BinKey {
    h: u32,
    s: u32,
    b: u32,
}

impl BinKey {
    fn of(color: Hsb) -> Self {
        let bin = |v: f64, bins: u32| (v * f64::from(bins)).round() as u32;
        Self {
            h: bin(color.h, HUE_BINS) % HUE_BINS,
            s: bin(color.s, SATURATION_BINS).min(SATURATION_BINS),
            b: bin(color.b, BRIGHTNESS_BINS).min(BRIGHTNESS_BINS),
        }
    }

    fn color(self) -> Hsb {
        Hsb::new(
            f64::from(self.h) / f64::from(HUE_BINS),
            f64::from(self.s) / f64::from(SATURATION_BINS),
            f64::from(self.b) / f64::from(BRIGHTNESS_BINS),
        )
    }

    /// Within one bin on every axis (hue measured around the wheel).
    fn is_adjacent(self, other: Self) -> bool {
        let dh = self.h.abs_diff(other.h);
        let hue_steps = dh.min(HUE_BINS - dh);
        hue_steps <= 1 && self.s.abs_diff(other.s) <= 1 && self.b.abs_diff(other.b) <= 1
    }
}

/// Buckets sampled pixels into an HSB histogram.
#[derive(Debug, Clone, Copy)]
pub struct ColorQuantizer {
    max_clusters: usize,
    merge_similar: bool,
}

impl Default for ColorQuantizer {
    fn default() -> Self {
        Self {
            max_clusters: MAX_CLUSTERS,
            merge_similar: true,
        }
    }
}

impl ColorQuantizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable near-duplicate merging (raw histogram buckets).
    #[inline]
    pub fn merge_similar(mut self, enabled: bool) -> Self {
        self.merge_similar = enabled;
        self
    }

    /// Cap the number of clusters returned (at most [`MAX_CLUSTERS`]).
    #[inline]
    pub fn max_clusters(mut self, max: usize) -> Self {
        self.max_clusters = max.min(MAX_CLUSTERS);
        self
    }

    /// Build clusters ordered by descending pixel count.
    ///
    /// Ties are broken by bin order so the output never depends on hash
    /// iteration order.
    pub fn quantize<I>(&self, pixels: I) -> Vec<ColorCluster>
    where
        I: IntoIterator<Item = Pixel>,
    {
        let mut histogram: HashMap<BinKey, u32> = HashMap::new();

        for pixel in pixels {
            let hsb = Hsb::from(pixel);
            if hsb.b < MIN_BRIGHTNESS || hsb.b > MAX_BRIGHTNESS {
                continue;
            }
            *histogram.entry(BinKey::of(hsb)).or_insert(0) += 1;
        }

        let mut buckets: Vec<(BinKey, u32)> = histogram.into_iter().collect();
        sort_buckets(&mut buckets);

        if self.merge_similar {
            buckets = merge_adjacent(buckets);
        }

        buckets
            .into_iter()
            .take(self.max_clusters)
            .map(|(key, count)| ColorCluster::new(key.color(), count))
            .collect()
    }
}

/// Quantize with default settings.
pub fn quantize<I>(pixels: I) -> Vec<ColorCluster>
where
    I: IntoIterator<Item = Pixel>,
{
    ColorQuantizer::default().quantize(pixels)
}

fn sort_buckets(buckets: &mut [(BinKey, u32)]) {
    buckets.sort_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)));
}

/// Fold each bucket into the first larger bucket adjacent to it.
///
/// Input must be sorted; larger buckets absorb smaller neighbours, so the
/// representative color is always the most populated bin of the group.
fn merge_adjacent(sorted: Vec<(BinKey, u32)>) -> Vec<(BinKey, u32)> {
    let mut merged: Vec<(BinKey, u32)> = Vec::with_capacity(sorted.len());

    for (key, count) in sorted {
        match merged.iter_mut().find(|(kept, _)| kept.is_adjacent(key)) {
            Some((_, kept_count)) => *kept_count += count,
            None => merged.push((key, count)),
        }
    }

    sort_buckets(&mut merged);
    merged
}
