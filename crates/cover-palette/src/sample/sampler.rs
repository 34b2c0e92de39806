//! Strided pixel sampling over a downscaled cover.

use image::RgbaImage;

use super::bitmap::Bitmap;
use super::error::DecodeError;
use super::resize::resize_area;
use crate::color::Rgb;

/// A sampled cover pixel (normalized RGB).
pub type Pixel = Rgb;

/// Default longest side after downscaling.
pub const DEFAULT_MAX_DIMENSION: u32 = 100;
/// Default row/column stride over the downscaled buffer.
pub const DEFAULT_STRIDE: u32 = 2;

/// Bounds for `max_dimension`; callers historically used 64-200.
const MIN_DIMENSION: u32 = 8;
const MAX_DIMENSION: u32 = 400;

/// Pixels with alpha below this are treated as absent.
const ALPHA_CUTOFF: u8 = 8;

/// Downscales a cover and yields every `stride`-th row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSampler {
    max_dimension: u32,
    stride: u32,
}

impl Default for PixelSampler {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            stride: DEFAULT_STRIDE,
        }
    }
}

impl PixelSampler {
    /// Create a sampler. `max_dimension` is clamped into 8..=400 and
    /// `stride` to at least 1.
    pub fn new(max_dimension: u32, stride: u32) -> Self {
        Self {
            max_dimension: max_dimension.clamp(MIN_DIMENSION, MAX_DIMENSION),
            stride: stride.max(1),
        }
    }

    #[inline]
    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Sample a validated bitmap.
    ///
    /// A [`Bitmap`] cannot have zero dimensions, so this cannot fail; use
    /// [`Bitmap::new`] to validate raw buffers first.
    pub fn sample(&self, bitmap: &Bitmap) -> Samples {
        let resized = resize_area(bitmap.image(), self.max_dimension);
        Samples {
            image: resized,
            stride: self.stride,
            x: 0,
            y: 0,
        }
    }

    /// Validate a raw RGBA8 buffer and sample it.
    ///
    /// # Errors
    ///
    /// Fails fast with [`DecodeError`] for zero dimensions or a buffer whose
    /// length does not match the stated size.
    pub fn sample_rgba(
        &self,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Result<Samples, DecodeError> {
        let bitmap = Bitmap::new(width, height, data)?;
        Ok(self.sample(&bitmap))
    }
}

/// Iterator over sampled pixels of a downscaled cover, row-major.
#[derive(Debug, Clone)]
pub struct Samples {
    image: RgbaImage,
    stride: u32,
    x: u32,
    y: u32,
}

impl Samples {
    /// Dimensions of the downscaled buffer being sampled.
    pub fn resized_dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

impl Iterator for Samples {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        let (width, height) = self.image.dimensions();

        while self.y < height {
            let (x, y) = (self.x, self.y);

            self.x += self.stride;
            if self.x >= width {
                self.x = 0;
                self.y += self.stride;
            }

            let [r, g, b, a] = self.image.get_pixel(x, y).0;
            if a >= ALPHA_CUTOFF {
                return Some(Rgb::from_u8(r, g, b));
            }
        }

        None
    }
}
