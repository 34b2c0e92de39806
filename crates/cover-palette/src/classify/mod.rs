//! Cover and genre classification.
//!
//! - [`CoverClassifier`] reads pixel statistics: white background ratio,
//!   average brightness, hue spread of the clusters.
//! - [`GenreClassifier`] reads title/author text.
//!
//! Both feed the palette synthesizer; neither can fail.

mod cover;
mod genre;

pub use cover::{
    dominant_hue, is_monochromatic, CoverClassifier, CoverProfile, DARK_COVER_THRESHOLD,
    NEUTRAL_HUE, WHITE_BACKGROUND_THRESHOLD, WHITE_COVER_THRESHOLD,
};
pub use genre::{Genre, GenreClassifier, ParseGenreError};
