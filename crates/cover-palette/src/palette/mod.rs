//! Palette types and synthesis
//!
//! [`PaletteSynthesizer`] turns quantized clusters, a [`CoverProfile`] and a
//! [`Genre`] into a five-role [`Palette`].
//!
//! [`CoverProfile`]: crate::CoverProfile
//! [`Genre`]: crate::Genre

mod palette;
mod synthesizer;

pub use palette::{Palette, PaletteFormula, Role, Temperature};
pub use synthesizer::{pad_with_complements, PaletteSynthesizer};
