//! Color types and conversion utilities
//!
//! Two representations are used throughout the engine:
//!
//! - **Rgb**: what decoded bitmaps contain and what the renderer consumes.
//! - **Hsb**: where palette math happens (saturation boosts, brightness
//!   curves, complementary hues).
//!
//! # Example
//!
//! ```
//! use cover_palette::{Hsb, Rgb};
//!
//! let cover_red = Rgb::new(0.8, 0.1, 0.1);
//! let boosted = Hsb::from(cover_red).scale_saturation(1.5);
//! assert_eq!(boosted.s, 1.0);
//!
//! let back = boosted.to_rgb();
//! assert!(back.r > back.g);
//! ```

mod error;
mod hsb;
mod rgb;

pub use error::ParseColorError;
pub use hsb::{hue_distance, wrap_hue, Hsb};
pub use rgb::Rgb;
