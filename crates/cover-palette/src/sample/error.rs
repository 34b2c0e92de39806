//! Error type for cover bitmap validation and decoding.

use thiserror::Error;

/// The cover could not be turned into pixels.
///
/// Callers never surface this to the reader: the pipeline degrades to the
/// genre fallback palette instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Width or height is zero
    #[error("bitmap has zero dimension: {width}x{height}")]
    ZeroDimension {
        /// Reported width
        width: u32,
        /// Reported height
        height: u32,
    },
    /// Buffer length does not match `width * height * 4`
    #[error("bitmap buffer is {actual} bytes, expected {expected}")]
    BufferSize {
        /// Bytes required for an RGBA8 image of the stated size
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },
    /// Encoded image bytes could not be decoded
    #[error("image decode failed: {0}")]
    Format(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DecodeError::ZeroDimension {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "bitmap has zero dimension: 0x10");

        let err = DecodeError::BufferSize {
            expected: 400,
            actual: 12,
        };
        assert_eq!(err.to_string(), "bitmap buffer is 12 bytes, expected 400");

        let err = DecodeError::Format("truncated PNG".to_string());
        assert_eq!(err.to_string(), "image decode failed: truncated PNG");
    }
}
