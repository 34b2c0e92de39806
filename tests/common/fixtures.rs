//! Test fixtures: encoded cover images and request bodies.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Cover colors used across tests
pub mod colors {
    /// Saturated red, reads as a bright colorful cover
    pub const RED: [u8; 4] = [204, 26, 26, 255];
    /// Near white, triggers the white-cover palette
    pub const PAPER: [u8; 4] = [250, 248, 245, 255];
    /// Deep navy, reads as a dark cover
    pub const NAVY: [u8; 4] = [15, 20, 60, 255];
}

/// Encode an image in the given format
fn encode(image: RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("Failed to encode test image");
    buf
}

/// Solid-color PNG cover
pub fn solid_png(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
    encode(RgbaImage::from_pixel(width, height, Rgba(pixel)), ImageFormat::Png)
}

/// PNG cover split into a left and right half
pub fn split_png(width: u32, height: u32, left: [u8; 4], right: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, _| {
        Rgba(if x < width / 2 { left } else { right })
    });
    encode(image, ImageFormat::Png)
}

/// Solid-color JPEG cover (JPEG has no alpha channel)
pub fn solid_jpeg(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
    let rgb = image::RgbImage::from_pixel(width, height, image::Rgb([pixel[0], pixel[1], pixel[2]]));
    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .expect("Failed to encode test image");
    buf
}

/// Base64 payload for inline covers
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
