//! Grid drawing helpers shared by recipes
//!
//! All helpers clip to the grid; positions outside it are skipped.

use crate::math::noise::sine_noise;
use crate::spatial::grid::ColorGrid;
use rand::Rng;

/// Fill a `width`×`height` rectangle whose top-left cell is `(x, y)`
pub fn fill_rect(
    grid: &mut ColorGrid,
    x: isize,
    y: isize,
    width: usize,
    height: usize,
    color: usize,
) {
    for dy in 0..height as isize {
        for dx in 0..width as isize {
            grid.set_signed(x + dx, y + dy, color);
        }
    }
}

/// Paint cells within `radius` of a centre, each with probability `chance`
///
/// With `wrap` set, positions past an edge continue on the opposite side.
pub fn scatter_disc<R: Rng + ?Sized>(
    grid: &mut ColorGrid,
    center: (isize, isize),
    radius: isize,
    color: usize,
    chance: f64,
    wrap: bool,
    rng: &mut R,
) {
    let (width, height) = (grid.width() as isize, grid.height() as isize);
    if width == 0 || height == 0 {
        return;
    }

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let (mut x, mut y) = (center.0 + dx, center.1 + dy);
            if wrap {
                x = x.rem_euclid(width);
                y = y.rem_euclid(height);
            } else if !grid.contains(x, y) {
                continue;
            }
            if rng.random::<f64>() < chance {
                grid.set_signed(x, y, color);
            }
        }
    }
}

/// Noisy-edged ellipse with a soft probability falloff towards its rim
///
/// `(half_width, half_height)` are the semi-axes in cells. The rim is pushed
/// in and out by sine-hash noise sampled at three frequencies.
pub fn elliptical_blob<R: Rng + ?Sized>(
    grid: &mut ColorGrid,
    center: (isize, isize),
    half_width: isize,
    half_height: isize,
    color: usize,
    rng: &mut R,
) {
    let (sx, sy) = (half_width.max(1), half_height.max(1));
    for dy in -sy..=sy {
        for dx in -sx..=sx {
            let (x, y) = (center.0 + dx, center.1 + dy);
            if !grid.contains(x, y) {
                continue;
            }
            let (fx, fy) = (x as f64, y as f64);
            let nx = dx as f64 / sx as f64;
            let ny = dy as f64 / sy as f64;
            let distance = nx * nx + ny * ny;

            let noise = sine_noise(fx * 0.12, fy * 0.12)
                + sine_noise(fx * 0.25, fy * 0.25) * 0.4
                + sine_noise(fx * 0.5, fy * 0.5) * 0.15;
            let rim = 1.0 + noise * 0.6;
            if distance > rim {
                continue;
            }

            let falloff = (1.0 - (distance / rim).sqrt()).powf(1.8);
            let texture = sine_noise(fx * 0.4, fy * 0.4) * 0.1;
            let chance = falloff * (0.85 + texture + rng.random::<f64>() * 0.15);
            if rng.random::<f64>() < chance {
                grid.set_signed(x, y, color);
            }
        }
    }
}

/// Round blob whose radius wobbles with two octaves of sine-hash noise
pub fn organic_blob<R: Rng + ?Sized>(
    grid: &mut ColorGrid,
    center: (isize, isize),
    size: isize,
    color: usize,
    rng: &mut R,
) {
    for dy in -size..=size {
        for dx in -size..=size {
            let (x, y) = (center.0 + dx, center.1 + dy);
            if !grid.contains(x, y) {
                continue;
            }
            let (fx, fy) = (x as f64, y as f64);
            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            let noise = sine_noise(fx * 0.08, fy * 0.08) + sine_noise(fx * 0.2, fy * 0.2) * 0.3;
            let radius = size as f64 + noise * 2.5;
            if radius <= 0.0 || distance > radius {
                continue;
            }

            let chance = (1.0 - distance / radius).powf(1.5);
            if rng.random::<f64>() < chance * (0.8 + rng.random::<f64>() * 0.2) {
                grid.set_signed(x, y, color);
            }
        }
    }
}
