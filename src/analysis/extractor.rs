//! Photograph-derived camouflage
//!
//! A source image is fitted to the output bounds, pooled down to block
//! resolution, lightly sharpened and clustered into `k` dominant colors. The
//! output maps every pixel back onto that pooled image and snaps it to the
//! nearest color, softening boundaries where two colors are almost equally
//! close.

use crate::analysis::filters::{laplacian, max_pool};
use crate::analysis::kmeans::{kmeans_palette, squared_distance};
use crate::analysis::resample::resize_and_crop;
use crate::io::configuration::{
    GenerationConfig, KMEANS_ITERATIONS, SOFT_BLEND_FLOOR, SOFT_BLEND_GAP,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::load_image;
use crate::pattern::postprocess::{add_edge_details, add_noise};
use image::{Rgb, Rgba, RgbaImage};
use rand::Rng;
use std::path::Path;

/// Output of an image-derived generation
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Rendered pattern of exactly the configured size
    pub image: RgbaImage,
    /// Extracted colors, darkest first by R+G+B
    pub palette: Vec<Rgb<u8>>,
}

/// Load `path` and derive a pattern from it
///
/// # Errors
///
/// Returns a decode error if the source cannot be read, and an invalid
/// parameter error for `k < 1` or zero output dimensions.
pub fn generate_from_image<R: Rng>(
    config: &GenerationConfig,
    path: &Path,
    rng: &mut R,
) -> Result<Extraction> {
    validate(config)?;
    let source = load_image(path)?;
    tracing::debug!(
        path = %path.display(),
        width = source.width(),
        height = source.height(),
        "decoded source image"
    );
    extract_from_image(config, &source, rng)
}

fn validate(config: &GenerationConfig) -> Result<()> {
    if config.k < 1 {
        return Err(invalid_parameter("k", &config.k, &"must be at least 1"));
    }
    if config.width == 0 {
        return Err(invalid_parameter("width", &config.width, &"must be at least 1"));
    }
    if config.height == 0 {
        return Err(invalid_parameter("height", &config.height, &"must be at least 1"));
    }
    Ok(())
}

/// Derive a pattern from an already decoded image
///
/// # Errors
///
/// Returns an invalid parameter error for `k < 1`, zero output dimensions or
/// an empty source image.
pub fn extract_from_image<R: Rng>(
    config: &GenerationConfig,
    source: &RgbaImage,
    rng: &mut R,
) -> Result<Extraction> {
    validate(config)?;
    if source.width() == 0 || source.height() == 0 {
        return Err(invalid_parameter("source", &"0 pixels", &"image is empty"));
    }

    let block = config.reconciled_block_size();
    let (width, height) = (config.width as u32, config.height as u32);

    let fitted = resize_and_crop(source, width, height);
    let pooled = max_pool(&fitted, block);
    let filtered = laplacian(&pooled);

    let mut palette = kmeans_palette(&filtered, config.k, KMEANS_ITERATIONS, rng)?;
    let mut image = render_soft(&filtered, &palette, width, height);

    if config.add_noise {
        add_noise(&mut image, &palette, rng);
    }
    if config.add_edge {
        add_edge_details(&mut image, block, rng);
    }

    palette.sort_by_key(|color| color.0.iter().map(|&c| u16::from(c)).sum::<u16>());
    Ok(Extraction { image, palette })
}

fn distance(a: Rgb<u8>, b: Rgb<u8>) -> f64 {
    let point = |color: Rgb<u8>| color.0.map(f64::from);
    squared_distance(&point(a), &point(b)).sqrt()
}

/// Render `filtered` at `width`×`height` using only `palette`
///
/// Each output pixel samples `filtered` by integer coordinate scaling. When the
/// two nearest colors are within 30 of each other and the nearest is farther
/// than 10, the pixel is a distance-weighted mix of both instead.
pub fn render_soft(
    filtered: &RgbaImage,
    palette: &[Rgb<u8>],
    width: u32,
    height: u32,
) -> RgbaImage {
    let (source_width, source_height) = filtered.dimensions();
    let Some(&first) = palette.first() else {
        return RgbaImage::new(width, height);
    };

    RgbaImage::from_fn(width, height, |x, y| {
        let sx = (u64::from(x) * u64::from(source_width) / u64::from(width)) as u32;
        let sy = (u64::from(y) * u64::from(source_height) / u64::from(height)) as u32;
        let [r, g, b, _] = filtered
            .get_pixel_checked(sx, sy)
            .map_or([0, 0, 0, 255], |pixel| pixel.0);
        let pixel = Rgb([r, g, b]);

        let mut closest = first;
        let mut closest_distance = distance(pixel, first);
        let mut second = first;
        let mut second_distance = f64::INFINITY;
        for &candidate in palette.iter().skip(1) {
            let d = distance(pixel, candidate);
            if d < closest_distance {
                second = closest;
                second_distance = closest_distance;
                closest = candidate;
                closest_distance = d;
            } else if d < second_distance {
                second = candidate;
                second_distance = d;
            }
        }

        let close_call = second_distance - closest_distance < SOFT_BLEND_GAP;
        if close_call && closest_distance > SOFT_BLEND_FLOOR {
            let blend = closest_distance / (closest_distance + second_distance);
            let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - blend) + f64::from(b) * blend) as u8;
            let [r1, g1, b1] = closest.0;
            let [r2, g2, b2] = second.0;
            Rgba([mix(r1, r2), mix(g1, g2), mix(b1, b2), 255])
        } else {
            let [cr, cg, cb] = closest.0;
            Rgba([cr, cg, cb, 255])
        }
    })
}
