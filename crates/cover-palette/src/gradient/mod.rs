//! Gradient layout
//!
//! [`GradientLayoutEngine::layout`] turns a [`Palette`] into a
//! [`GradientSpec`]: one radial orb per visible palette role, placed by a
//! [`GradientPattern`], with radial color stops that fade to transparent.
//!
//! Nothing here animates. [`GradientSpec::at_phase`] is a pure function of
//! the phase the host renderer passes in.
//!
//! ```
//! use cover_palette::{
//!     CanvasSize, CompositionParams, Genre, GradientLayoutEngine, GradientPattern, Palette,
//! };
//!
//! let palette = Palette::for_genre(Genre::SciFi);
//! let pattern = GradientPattern::select(Genre::SciFi, Some("Dune"));
//! let spec = GradientLayoutEngine::new().layout(
//!     &palette,
//!     CanvasSize::default(),
//!     pattern,
//!     &CompositionParams::default(),
//! );
//! assert_eq!(spec.orbs.len(), 5);
//! ```
//!
//! [`Palette`]: crate::Palette

mod geometry;
mod layout;
mod pattern;

pub use geometry::{CanvasSize, Point};
pub use layout::{
    BlendMode, ColorStop, GradientLayoutEngine, GradientSpec, LinearGradient, Orb,
    BREATHING_AMPLITUDE, BREATHING_PHASE_STEP, DRIFT_FRACTION,
};
pub use pattern::{Falloff, GradientPattern, STOP_LOCATIONS};
