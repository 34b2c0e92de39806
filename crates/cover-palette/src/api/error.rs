//! Unified error type for the cover-palette public API.
//!
//! [`AnalyzeError`] wraps the crate's error types into a single enum for
//! `?` propagation in host code. The analysis pipeline itself never returns
//! it for a bad cover (see [`CoverAnalyzer::analyze`]); it surfaces only
//! from the strict entry points.
//!
//! [`CoverAnalyzer::analyze`]: crate::CoverAnalyzer::analyze

use thiserror::Error;

use crate::classify::ParseGenreError;
use crate::color::ParseColorError;
use crate::sample::DecodeError;

/// Unified error type for the cover-palette public API.
///
/// # Example
///
/// ```
/// use cover_palette::{AnalyzeError, Genre, Rgb};
///
/// fn parse(color: &str, genre: &str) -> Result<(Rgb, Genre), AnalyzeError> {
///     Ok((color.parse()?, genre.parse()?))
/// }
///
/// assert!(parse("#FF0000", "sci-fi").is_ok());
/// assert!(parse("#FF00", "sci-fi").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyzeError {
    /// Cover bitmap rejected (zero dimension, wrong buffer size, bad encoding)
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// Invalid hex color
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Unrecognized genre name
    #[error(transparent)]
    ParseGenre(#[from] ParseGenreError),
}
