//! Area-average downscaling.
//!
//! Every output pixel is the mean of the source region it covers, so
//! fine cover detail (halftone dots, text strokes) cannot alias into
//! spurious color clusters.

use image::{imageops, RgbaImage};

/// Target dimensions so that the longer side is `max_dimension`.
///
/// Never upscales; the shorter side is at least 1.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height);
    }

    let scale = f64::from(max_dimension) / f64::from(longest);
    let scaled = |v: u32| ((f64::from(v) * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

/// Downscale with box (area-average) filtering.
///
/// Returns a copy of the input unchanged when no downscale is needed.
pub fn resize_area(image: &RgbaImage, max_dimension: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let (new_width, new_height) = target_dimensions(width, height, max_dimension);

    if (new_width, new_height) == (width, height) {
        return image.clone();
    }

    imageops::thumbnail(image, new_width, new_height)
}
