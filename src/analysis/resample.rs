//! Two-pass bilinear resize and centre crop to exact output bounds

use crate::io::configuration::NORMALIZED_SHORTEST_SIDE;
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Scale so the shortest side equals `side`, keeping the aspect ratio
pub fn normalize_shortest_side(source: &RgbaImage, side: u32) -> RgbaImage {
    let (width, height) = source.dimensions();
    let shortest = width.min(height).max(1);
    let scale = f64::from(side) / f64::from(shortest);
    let scaled_width = ((f64::from(width) * scale) as u32).max(1);
    let scaled_height = ((f64::from(height) * scale) as u32).max(1);
    imageops::resize(source, scaled_width, scaled_height, FilterType::Triangle)
}

/// Scale to fully cover `width`×`height`, then crop the centre
pub fn cover_and_crop(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (source_width, source_height) = source.dimensions();
    let ratio = (f64::from(width) / f64::from(source_width.max(1)))
        .max(f64::from(height) / f64::from(source_height.max(1)));

    let cover_width = ((f64::from(source_width) * ratio) as u32).max(width);
    let cover_height = ((f64::from(source_height) * ratio) as u32).max(height);
    let covered = imageops::resize(source, cover_width, cover_height, FilterType::Triangle);

    let left = (cover_width - width) / 2;
    let top = (cover_height - height) / 2;
    imageops::crop_imm(&covered, left, top, width, height).to_image()
}

/// Normalise a photograph and fit it to exactly `width`×`height`
///
/// Empty sources or targets produce a blank image of the target size.
pub fn resize_and_crop(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if source.width() == 0 || source.height() == 0 || width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }
    let normalized = normalize_shortest_side(source, NORMALIZED_SHORTEST_SIDE);
    cover_and_crop(&normalized, width, height)
}
