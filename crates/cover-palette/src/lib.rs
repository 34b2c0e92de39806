#![allow(clippy::module_inception)]

//! cover-palette: cover-driven adaptive color and gradient engine
//!
//! Given a decoded book cover (and optional title/author), this library
//! derives a five-role palette, classifies the cover and its genre, and
//! describes a layered radial gradient for an ambient reading background.
//! It draws nothing: the output is plain data for a host renderer.
//!
//! # Quick Start
//!
//! The [`CoverAnalyzer`] builder is the primary entry point:
//!
//! ```
//! use cover_palette::{
//!     AccessibilitySettings, Bitmap, CanvasSize, ColorScheme, CoverAnalyzer, Rgb,
//! };
//!
//! let cover = Bitmap::filled(60, 90, Rgb::new(0.2, 0.4, 0.8)).unwrap();
//!
//! let analyzer = CoverAnalyzer::new();
//! let analysis = analyzer.analyze(Some(&cover), Some("Cosmos"), Some("Carl Sagan"));
//! let spec = analyzer.render_spec(
//!     &analysis,
//!     CanvasSize::new(390.0, 844.0),
//!     AccessibilitySettings::default(),
//!     ColorScheme::Dark,
//! );
//!
//! assert!(analysis.palette.primary.s >= 0.7);
//! assert!(!spec.orbs.is_empty());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Bitmap -> PixelSampler -> ColorQuantizer -> CoverClassifier  -\
//!                                          \-> GenreClassifier -+-> PaletteSynthesizer
//!                                                                        |
//!                       CompositionAdvisor -> GradientLayoutEngine <-----/
//! ```
//!
//! - [`PixelSampler`]: area-average downscale, then every `stride`-th
//!   row/column
//! - [`ColorQuantizer`]: 24x5x5 HSB histogram, near-duplicate merge, top 10
//! - [`CoverClassifier`]: white ratio, brightness, hue spread
//! - [`GenreClassifier`]: ordered keyword rules over title and author
//! - [`PaletteSynthesizer`]: white-cover, monochromatic or colorful formula,
//!   then role saturation floors
//! - [`GradientLayoutEngine`]: pattern placement and radial falloff stops
//! - [`CompositionAdvisor`]: zone scrims and overall opacity
//!
//! # Color Spaces
//!
//! - [`Rgb`]: gamma-encoded input and output
//! - [`Hsb`]: palette math (boosts, floors, complementary hues)
//!
//! # Failure Model
//!
//! Nothing in the pipeline is fatal. A cover that cannot be read (zero
//! dimension, wrong buffer length, failed decode, fully transparent)
//! produces the genre's fallback palette; unknown text produces
//! [`Genre::Unknown`], which paints with Literary colors.
//!
//! # Determinism
//!
//! Identical inputs give identical output. Pattern selection for genres
//! without a fixed pattern hashes the genre and title instead of drawing a
//! random value, and breathing is a pure function of the phase passed to
//! [`GradientSpec::at_phase`].

pub mod api;
pub mod classify;
pub mod color;
pub mod composition;
pub mod gradient;
pub mod palette;
pub mod quantize;
pub mod sample;


pub use api::{Analysis, AnalyzeError, CoverAnalyzer};
pub use classify::{CoverClassifier, CoverProfile, Genre, GenreClassifier, ParseGenreError};
pub use color::{Hsb, ParseColorError, Rgb};
pub use composition::{
    AccessibilitySettings, ColorScheme, CompositionAdvisor, CompositionParams, LayerMode,
};
pub use gradient::{
    BlendMode, CanvasSize, ColorStop, GradientLayoutEngine, GradientPattern, GradientSpec,
    LinearGradient, Orb, Point,
};
pub use palette::{Palette, PaletteFormula, PaletteSynthesizer, Role, Temperature};
pub use quantize::{ColorCluster, ColorQuantizer};
pub use sample::{Bitmap, DecodeError, Pixel, PixelSampler, Samples};
