//! Cover sampling: bitmap validation, area-average downscaling and
//! strided pixel iteration.
//!
//! The pipeline never point-samples the full-resolution cover. The bitmap
//! is first reduced so its longer side is about `max_dimension` (box
//! filter), then every `stride`-th row and column is visited.
//!
//! ```
//! use cover_palette::{Bitmap, PixelSampler, Rgb};
//!
//! let cover = Bitmap::filled(600, 900, Rgb::new(0.8, 0.1, 0.1)).unwrap();
//! let samples = PixelSampler::new(100, 2).sample(&cover);
//! assert_eq!(samples.resized_dimensions(), (67, 100));
//! ```

mod bitmap;
mod error;
mod resize;
mod sampler;

pub use bitmap::Bitmap;
pub use error::DecodeError;
pub use resize::{resize_area, target_dimensions};
pub use sampler::{Pixel, PixelSampler, Samples, DEFAULT_MAX_DIMENSION, DEFAULT_STRIDE};
