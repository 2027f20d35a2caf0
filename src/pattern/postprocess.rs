//! Optional finishing passes applied to any recipe's output
//!
//! Both passes work on the opaque RGBA buffer and leave alpha at 255, so they
//! can run in either order.

use crate::io::configuration::{EDGE_BAND, NOISE_CHANCE};
use image::{Rgb, Rgba, RgbaImage};
use rand::Rng;

/// Jitter chance and magnitude for each distance from a cell boundary
const EDGE_PROFILE: [(f64, i16); EDGE_BAND] = [(0.4, 20), (0.2, 8)];

/// Average a few pixels 50/50 with a random palette color
///
/// Each pixel is affected with a 5% chance.
pub fn add_noise<R: Rng + ?Sized>(image: &mut RgbaImage, palette: &[Rgb<u8>], rng: &mut R) {
    if palette.is_empty() {
        return;
    }
    for pixel in image.pixels_mut() {
        if rng.random::<f64>() >= NOISE_CHANCE {
            continue;
        }
        let Some(noise) = palette.get(rng.random_range(0..palette.len())) else {
            continue;
        };
        let [r, g, b, _] = pixel.0;
        let [nr, ng, nb] = noise.0;
        let mix = |current: u8, other: u8| ((u16::from(current) + u16::from(other)) / 2) as u8;
        *pixel = Rgba([mix(r, nr), mix(g, ng), mix(b, nb), 255]);
    }
}

/// Distance in pixels to the nearest cell boundary along either axis
fn boundary_distance(x: u32, y: u32, block: u32) -> u32 {
    let along = |v: u32| {
        let offset = v % block;
        offset.min(block - 1 - offset)
    };
    along(x).min(along(y))
}

/// Roughen cell boundaries with signed per-channel jitter
///
/// Pixels on a boundary change with 40% chance by up to ±20 per channel;
/// pixels one step in change with 20% chance by up to ±8. Anything deeper
/// inside a cell is untouched.
pub fn add_edge_details<R: Rng + ?Sized>(image: &mut RgbaImage, block: usize, rng: &mut R) {
    let block = block.max(1) as u32;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let distance = boundary_distance(x, y, block) as usize;
        let Some(&(chance, magnitude)) = EDGE_PROFILE.get(distance) else {
            continue;
        };
        if rng.random::<f64>() >= chance {
            continue;
        }

        let [r, g, b, _] = pixel.0;
        let mut jitter = |channel: u8| {
            let shift = rng.random_range(-magnitude..=magnitude);
            (i16::from(channel) + shift).clamp(0, 255) as u8
        };
        *pixel = Rgba([jitter(r), jitter(g), jitter(b), 255]);
    }
}
