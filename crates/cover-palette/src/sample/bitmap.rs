//! Decoded cover bitmap.

use image::RgbaImage;

use super::error::DecodeError;
use crate::color::Rgb;

/// A decoded RGBA8 cover image (row-major, 4 bytes per pixel).
///
/// Construction validates the buffer, so a `Bitmap` always has non-zero
/// dimensions and a correctly sized buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    /// Wrap a raw RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// [`DecodeError::ZeroDimension`] if either dimension is zero,
    /// [`DecodeError::BufferSize`] if `data.len() != width * height * 4`.
    ///
    /// # Example
    /// ```
    /// use cover_palette::Bitmap;
    ///
    /// let bitmap = Bitmap::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    /// assert_eq!(bitmap.width(), 2);
    ///
    /// assert!(Bitmap::new(0, 1, vec![]).is_err());
    /// ```
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::ZeroDimension { width, height });
        }

        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(DecodeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        let actual = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(|image| Self { image })
            .ok_or(DecodeError::BufferSize { expected, actual })
    }

    /// Create an opaque bitmap filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self, DecodeError> {
        let [r, g, b] = color.to_bytes();
        let data = [r, g, b, 255].repeat(width as usize * height as usize);
        Self::new(width, height, data)
    }

    /// Adopt an already decoded image.
    pub fn from_image(image: RgbaImage) -> Result<Self, DecodeError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::ZeroDimension { width, height });
        }
        Ok(Self { image })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA8 bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    #[inline]
    pub(crate) fn image(&self) -> &RgbaImage {
        &self.image
    }
}
