//! Max-pool downsampling and gentle Laplacian sharpening

use image::{Rgba, RgbaImage};

/// Sharpening kernel applied before blending with the original
pub const LAPLACIAN_KERNEL: [[f64; 3]; 3] = [[0.0, -0.25, 0.0], [-0.25, 2.0, -0.25], [0.0, -0.25, 0.0]];

/// Share of the original pixel kept when blending in the filtered response
const ORIGINAL_WEIGHT: f64 = 0.7;
/// Scale applied to the kernel response before blending
const RESPONSE_SCALE: f64 = 0.3;

/// Downsample by taking the per-channel maximum over `window`×`window` blocks
///
/// Output dimensions round up, so a partial block at the right or bottom edge
/// still produces a pixel from whatever it covers. The result is opaque.
pub fn max_pool(image: &RgbaImage, window: usize) -> RgbaImage {
    let window = window.max(1) as u32;
    let (width, height) = image.dimensions();
    let pooled_width = width.div_ceil(window);
    let pooled_height = height.div_ceil(window);

    RgbaImage::from_fn(pooled_width, pooled_height, |px, py| {
        let mut maximum = [0_u8; 3];
        for sy in py * window..((py + 1) * window).min(height) {
            for sx in px * window..((px + 1) * window).min(width) {
                let [r, g, b, _] = image.get_pixel(sx, sy).0;
                for (channel, value) in maximum.iter_mut().zip([r, g, b]) {
                    *channel = (*channel).max(value);
                }
            }
        }
        let [r, g, b] = maximum;
        Rgba([r, g, b, 255])
    })
}

/// Blend each pixel 70/30 with its Laplacian-sharpened value
///
/// For an original channel value `o` and kernel response `s` the output is
/// `0.7·o + 0.3·(o + 0.3·s)`, clamped to `0..=255`. Kernel taps outside the
/// image are skipped.
pub fn laplacian(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let mut response = [0.0_f64; 3];
        for (ky, row) in LAPLACIAN_KERNEL.iter().enumerate() {
            for (kx, &weight) in row.iter().enumerate() {
                let nx = i64::from(x) + kx as i64 - 1;
                let ny = i64::from(y) + ky as i64 - 1;
                if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                    continue;
                }
                let [r, g, b, _] = image.get_pixel(nx as u32, ny as u32).0;
                for (sum, value) in response.iter_mut().zip([r, g, b]) {
                    *sum += f64::from(value) * weight;
                }
            }
        }

        let [r, g, b, _] = image.get_pixel(x, y).0;
        let blend = |original: u8, sum: f64| {
            let original = f64::from(original);
            let mixed = original * ORIGINAL_WEIGHT
                + (original + sum * RESPONSE_SCALE) * (1.0 - ORIGINAL_WEIGHT);
            mixed.clamp(0.0, 255.0) as u8
        };
        let [sr, sg, sb] = response;
        Rgba([blend(r, sr), blend(g, sg), blend(b, sb), 255])
    })
}
