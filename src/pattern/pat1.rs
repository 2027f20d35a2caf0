//! Layered military recipe
//!
//! A flat background is overlaid with three layers of decreasing scale (large
//! organic shapes, woodland strokes, small digital rectangles) and then
//! lightly smoothed.

use crate::math::noise::fractal_noise;
use crate::math::probability::{select_weighted, select_weighted_excluding};
use crate::pattern::shapes::{fill_rect, scatter_disc};
use crate::pattern::{Canvas, Generator};
use crate::spatial::cellular::{Boundary, CellularSmoother};
use crate::spatial::grid::ColorGrid;
use image::RgbaImage;
use rand::{Rng, RngCore};

/// Layered military recipe (`pat1`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Pat1Generator;

impl Generator for Pat1Generator {
    fn generate(&self, canvas: &Canvas<'_>, rng: &mut dyn RngCore) -> RgbaImage {
        let background = rng.random_range(0..canvas.colors());
        let mut grid = canvas.grid(background);

        add_large_shapes(&mut grid, canvas, background, rng);
        add_woodland_elements(&mut grid, canvas, rng);
        add_digital_details(&mut grid, canvas, rng);

        CellularSmoother::new(2, 0.5)
            .with_boundary(Boundary::Clamp)
            .apply(&mut grid, rng);

        grid.render(canvas.palette, canvas.block)
    }
}

fn add_large_shapes(
    grid: &mut ColorGrid,
    canvas: &Canvas<'_>,
    background: usize,
    rng: &mut dyn RngCore,
) {
    if grid.area() == 0 {
        return;
    }
    for _ in 0..grid.area() / 200 {
        let cx = rng.random_range(0..grid.width()) as isize;
        let cy = rng.random_range(0..grid.height()) as isize;
        let color = select_weighted_excluding(canvas.ratios, &[background], canvas.colors(), rng);
        let size_x = rng.random_range(8..20_usize) as isize;
        let size_y = rng.random_range(6..16_usize) as isize;
        organic_shape(grid, (cx, cy), size_x, size_y, color, rng);
    }
}

// Ellipse whose rim is displaced by smooth fractal noise plus a little jitter
fn organic_shape(
    grid: &mut ColorGrid,
    center: (isize, isize),
    size_x: isize,
    size_y: isize,
    color: usize,
    rng: &mut dyn RngCore,
) {
    for dy in -size_y..=size_y {
        for dx in -size_x..=size_x {
            let (x, y) = (center.0 + dx, center.1 + dy);
            if !grid.contains(x, y) {
                continue;
            }

            let nx = dx as f64 / size_x as f64;
            let ny = dy as f64 / size_y as f64;
            let distance = nx * nx + ny * ny;

            let smooth = (fractal_noise(x as f64 * 2.0, y as f64 * 2.0) - 0.5) * 0.3;
            let jitter = rng.random::<f64>() * 0.1 - 0.05;
            let threshold = 1.0 + smooth + jitter;

            if distance <= threshold && rng.random::<f64>() < 1.0 - distance / threshold {
                grid.set_signed(x, y, color);
            }
        }
    }
}

fn add_woodland_elements(grid: &mut ColorGrid, canvas: &Canvas<'_>, rng: &mut dyn RngCore) {
    if grid.area() == 0 {
        return;
    }
    for _ in 0..grid.area() / 100 {
        let x = rng.random_range(0..grid.width()) as isize;
        let y = rng.random_range(0..grid.height()) as isize;
        let color = select_weighted(canvas.ratios, canvas.colors(), rng);

        match rng.random_range(0..3) {
            // Trunk
            0 => {
                let height = rng.random_range(4..12);
                let width = rng.random_range(1..=2);
                fill_rect(grid, x, y, width, height, color);
            }
            // Branch
            1 => {
                let width = rng.random_range(4..12);
                let height = rng.random_range(1..=2);
                fill_rect(grid, x, y, width, height, color);
            }
            // Leaf cluster
            _ => {
                let radius = rng.random_range(2..=4_usize) as isize;
                scatter_disc(grid, (x, y), radius, color, 0.7, false, rng);
            }
        }
    }
}

fn add_digital_details(grid: &mut ColorGrid, canvas: &Canvas<'_>, rng: &mut dyn RngCore) {
    if grid.width() < 2 || grid.height() < 2 {
        return;
    }
    for _ in 0..grid.area() / 50 {
        let x = rng.random_range(0..grid.width() - 1) as isize;
        let y = rng.random_range(0..grid.height() - 1) as isize;
        let color = select_weighted(canvas.ratios, canvas.colors(), rng);
        let width = rng.random_range(1..=2);
        let height = rng.random_range(1..=2);
        fill_rect(grid, x, y, width, height, color);
    }
}
