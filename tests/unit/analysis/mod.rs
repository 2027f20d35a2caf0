pub mod kmeans;

use image::{Rgba, RgbaImage};

/// Four solid quadrants: dark green, brown, tan, black
pub fn quadrants(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| match (x < width / 2, y < height / 2) {
        (true, true) => Rgba([40, 80, 30, 255]),
        (false, true) => Rgba([110, 70, 40, 255]),
        (true, false) => Rgba([200, 180, 130, 255]),
        (false, false) => Rgba([10, 10, 10, 255]),
    })
}
