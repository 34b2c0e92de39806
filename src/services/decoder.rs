//! Cover decoding: encoded bytes (PNG, JPEG, GIF, WebP) to an RGBA bitmap.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use cover_palette::{Bitmap, DecodeError};

/// Decode an encoded cover image
pub fn decode_cover(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let image = image::load_from_memory(bytes).map_err(|e| DecodeError::Format(e.to_string()))?;
    Bitmap::from_image(image.to_rgba8())
}

/// Decode a base64 cover payload to raw bytes.
///
/// Accepts an optional `data:<mime>;base64,` prefix and ignores whitespace.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let data = match payload.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => payload,
    };
    let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();

    STANDARD
        .decode(compact)
        .map_err(|e| DecodeError::Format(format!("invalid base64: {e}")))
}
