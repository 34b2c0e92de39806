//! CoverAnalyzer builder, the primary entry point for the crate.
//!
//! [`CoverAnalyzer`] wires the pipeline stages together:
//! sample, quantize, classify (cover and genre), synthesize, then on demand
//! lay out a gradient for a given canvas and host appearance.

use serde::{Deserialize, Serialize};

use crate::classify::{CoverClassifier, CoverProfile, Genre, GenreClassifier};
use crate::composition::{AccessibilitySettings, ColorScheme, CompositionAdvisor};
use crate::gradient::{CanvasSize, GradientLayoutEngine, GradientPattern, GradientSpec};
use crate::palette::{Palette, PaletteSynthesizer};
use crate::quantize::{ColorCluster, ColorQuantizer};
use crate::sample::{Bitmap, DecodeError, Pixel, PixelSampler};

use super::error::AnalyzeError;

/// Result of analyzing one cover.
///
/// `profile` is `None` when no pixels could be read; the palette is then
/// the genre fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub genre: Genre,
    pub pattern: GradientPattern,
    pub profile: Option<CoverProfile>,
    pub clusters: Vec<ColorCluster>,
    pub palette: Palette,
}

impl Analysis {
    /// Profile used for composition decisions; the neutral default when the
    /// cover was unreadable.
    pub fn effective_profile(&self) -> CoverProfile {
        self.profile.unwrap_or_default()
    }

    pub fn is_fallback(&self) -> bool {
        self.profile.is_none()
    }
}

/// High-level cover analysis builder.
///
/// # Design
///
/// - Configuration methods consume and return `self`
/// - [`analyze()`](Self::analyze) takes `&self`, so one analyzer serves
///   every request
/// - Bad cover input degrades to a genre fallback instead of failing
///
/// # Example
///
/// ```
/// use cover_palette::{
///     AccessibilitySettings, Bitmap, CanvasSize, ColorScheme, CoverAnalyzer, Genre, Rgb,
/// };
///
/// let cover = Bitmap::filled(50, 50, Rgb::new(0.8, 0.1, 0.1)).unwrap();
/// let analyzer = CoverAnalyzer::new().max_dimension(64);
///
/// let analysis = analyzer.analyze(Some(&cover), Some("Thriller Title"), None);
/// assert_eq!(analysis.genre, Genre::Thriller);
///
/// let spec = analyzer.render_spec(
///     &analysis,
///     CanvasSize::default(),
///     AccessibilitySettings::default(),
///     ColorScheme::Dark,
/// );
/// assert!(!spec.orbs.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct CoverAnalyzer {
    sampler: PixelSampler,
    quantizer: ColorQuantizer,
}

impl Default for CoverAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverAnalyzer {
    /// Analyzer with default sampling (100 px long side, stride 2).
    pub fn new() -> Self {
        Self {
            sampler: PixelSampler::default(),
            quantizer: ColorQuantizer::new(),
        }
    }

    /// Long side of the downscaled cover, clamped into 8..=400.
    #[inline]
    pub fn max_dimension(mut self, max_dimension: u32) -> Self {
        self.sampler = PixelSampler::new(max_dimension, self.sampler.stride());
        self
    }

    /// Row/column step over the downscaled cover (at least 1).
    #[inline]
    pub fn stride(mut self, stride: u32) -> Self {
        self.sampler = PixelSampler::new(self.sampler.max_dimension(), stride);
        self
    }

    /// Toggle merging of near-duplicate histogram buckets.
    #[inline]
    pub fn merge_similar(mut self, enabled: bool) -> Self {
        self.quantizer = self.quantizer.merge_similar(enabled);
        self
    }

    pub fn sampler(&self) -> &PixelSampler {
        &self.sampler
    }

    /// Analyze a cover, or only the title/author when `cover` is `None`.
    ///
    /// Never fails: a missing cover, or one with no usable pixels, yields
    /// the genre fallback palette.
    pub fn analyze(
        &self,
        cover: Option<&Bitmap>,
        title: Option<&str>,
        author: Option<&str>,
    ) -> Analysis {
        let pixels: Vec<Pixel> = cover
            .map(|bitmap| self.sampler.sample(bitmap).collect())
            .unwrap_or_default();
        self.analyze_pixels(&pixels, title, author)
    }

    /// Analyze a raw RGBA8 buffer, degrading to the genre fallback when the
    /// buffer is invalid.
    pub fn analyze_rgba(
        &self,
        width: u32,
        height: u32,
        data: Vec<u8>,
        title: Option<&str>,
        author: Option<&str>,
    ) -> Analysis {
        match self.try_analyze_rgba(width, height, data, title, author) {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::warn!(
                    width,
                    height,
                    error = %err,
                    "cover rejected, using genre fallback palette"
                );
                self.analyze(None, title, author)
            }
        }
    }

    /// Strict variant of [`analyze_rgba`](Self::analyze_rgba).
    ///
    /// # Errors
    ///
    /// [`AnalyzeError::Decode`] for zero dimensions or a mismatched buffer.
    pub fn try_analyze_rgba(
        &self,
        width: u32,
        height: u32,
        data: Vec<u8>,
        title: Option<&str>,
        author: Option<&str>,
    ) -> Result<Analysis, AnalyzeError> {
        let bitmap = Bitmap::new(width, height, data)?;
        Ok(self.analyze(Some(&bitmap), title, author))
    }

    /// Analyze the outcome of an external decode step.
    pub fn analyze_decoded(
        &self,
        decoded: Result<Bitmap, DecodeError>,
        title: Option<&str>,
        author: Option<&str>,
    ) -> Analysis {
        match decoded {
            Ok(bitmap) => self.analyze(Some(&bitmap), title, author),
            Err(err) => {
                tracing::warn!(error = %err, "cover decode failed, using genre fallback palette");
                self.analyze(None, title, author)
            }
        }
    }

    fn analyze_pixels(
        &self,
        pixels: &[Pixel],
        title: Option<&str>,
        author: Option<&str>,
    ) -> Analysis {
        let genre = GenreClassifier::new().classify(title, author);
        let pattern = GradientPattern::select(genre, title);

        if pixels.is_empty() {
            return Analysis {
                genre,
                pattern,
                profile: None,
                clusters: Vec::new(),
                palette: Palette::for_genre(genre),
            };
        }

        let clusters = self.quantizer.quantize(pixels.iter().copied());
        let profile = CoverClassifier::new().classify(pixels, &clusters);
        let palette = PaletteSynthesizer::new().synthesize(&clusters, &profile, genre);

        tracing::debug!(
            %genre,
            %pattern,
            clusters = clusters.len(),
            formula = ?palette.formula,
            "cover analyzed"
        );

        Analysis {
            genre,
            pattern,
            profile: Some(profile),
            clusters,
            palette,
        }
    }

    /// Lay out the gradient for a finished analysis.
    pub fn render_spec(
        &self,
        analysis: &Analysis,
        canvas: CanvasSize,
        accessibility: AccessibilitySettings,
        scheme: ColorScheme,
    ) -> GradientSpec {
        let composition =
            CompositionAdvisor::new().advise(&analysis.effective_profile(), accessibility, scheme);
        GradientLayoutEngine::new().layout(&analysis.palette, canvas, analysis.pattern, &composition)
    }
}
