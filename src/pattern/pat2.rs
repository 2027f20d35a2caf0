//! Scattered multi-scale recipe
//!
//! Large right-biased elliptical blobs, boundary color transitions, medium
//! organic blobs, horizontal flow strokes, tiny clusters and small L/T/cross
//! marks, finished with a consensus-gated blend.

use crate::math::noise::sine_noise;
use crate::math::probability::select_weighted;
use crate::pattern::shapes::{elliptical_blob, organic_blob};
use crate::pattern::{Canvas, Generator};
use crate::spatial::cellular::{Boundary, CellularSmoother};
use crate::spatial::grid::ColorGrid;
use image::RgbaImage;
use rand::{Rng, RngCore};

/// Marks stamped by the fractal-detail layer, as cell offsets
const MARKS: [&[(isize, isize)]; 3] = [
    &[(0, 0), (1, 0), (0, 1)],
    &[(0, 0), (-1, 0), (1, 0), (0, 1)],
    &[(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)],
];

/// Scattered multi-scale recipe (`pat2`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Pat2Generator;

impl Generator for Pat2Generator {
    fn generate(&self, canvas: &Canvas<'_>, rng: &mut dyn RngCore) -> RgbaImage {
        let base = rng.random_range(0..canvas.colors());
        let mut grid = canvas.grid(base);

        if grid.area() > 0 {
            large_blobs(&mut grid, rng);
            color_transitions(&mut grid, rng);
            medium_elements(&mut grid, canvas, rng);
            directional_flow(&mut grid, canvas, rng);
            small_clusters(&mut grid, canvas, rng);
            fractal_marks(&mut grid, canvas, rng);
        }

        CellularSmoother::new(1, 0.3)
            .with_boundary(Boundary::Clamp)
            .with_min_consensus(6)
            .apply(&mut grid, rng);

        grid.render(canvas.palette, canvas.block)
    }
}

fn random_cell(grid: &ColorGrid, rng: &mut dyn RngCore) -> (isize, isize) {
    (
        rng.random_range(0..grid.width()) as isize,
        rng.random_range(0..grid.height()) as isize,
    )
}

fn large_blobs(grid: &mut ColorGrid, rng: &mut dyn RngCore) {
    let (width, height) = (grid.width(), grid.height());
    for _ in 0..grid.area() / 120 {
        let center = if rng.random::<f64>() < 0.3 {
            let x = rng.random_range(0..(width / 4).max(1)) + width * 3 / 4;
            (x as isize, rng.random_range(0..height) as isize)
        } else {
            random_cell(grid, rng)
        };
        let color = rng.random_range(0..grid.colors());
        let half_width = rng.random_range(6..20_usize) as isize;
        let half_height = rng.random_range(4..14_usize) as isize;
        elliptical_blob(grid, center, half_width, half_height, color, rng);
    }
}

// Interior cells on a color boundary sometimes take a third color
fn color_transitions(grid: &mut ColorGrid, rng: &mut dyn RngCore) {
    let colors = grid.colors();
    for y in 1..grid.height().saturating_sub(1) {
        for x in 1..grid.width().saturating_sub(1) {
            let current = grid.get(x, y);
            let neighbors = [
                grid.get(x, y - 1),
                grid.get(x, y + 1),
                grid.get(x - 1, y),
                grid.get(x + 1, y),
            ];
            for neighbor in neighbors {
                if neighbor == current || rng.random::<f64>() >= 0.15 {
                    continue;
                }
                if let Some(third) = intermediate_color(current, neighbor, colors, rng) {
                    grid.set(x, y, third);
                }
            }
        }
    }
}

fn intermediate_color(
    first: usize,
    second: usize,
    colors: usize,
    rng: &mut dyn RngCore,
) -> Option<usize> {
    if rng.random::<f64>() >= 0.5 {
        return None;
    }
    (0..5)
        .map(|_| rng.random_range(0..colors))
        .find(|&candidate| candidate != first && candidate != second)
}

fn medium_elements(grid: &mut ColorGrid, canvas: &Canvas<'_>, rng: &mut dyn RngCore) {
    for _ in 0..grid.area() / 80 {
        let center = random_cell(grid, rng);
        let color = select_weighted(canvas.ratios, canvas.colors(), rng);
        let size = rng.random_range(3..9_usize) as isize;
        if rng.random::<f64>() < 0.9 {
            organic_blob(grid, center, size, color, rng);
        } else {
            soft_angular(grid, center, size, color, rng);
        }
    }
}

// Square with a noise-softened rim
fn soft_angular(
    grid: &mut ColorGrid,
    center: (isize, isize),
    size: isize,
    color: usize,
    rng: &mut dyn RngCore,
) {
    for dy in -size..=size {
        for dx in -size..=size {
            let (x, y) = (center.0 + dx, center.1 + dy);
            if !grid.contains(x, y) {
                continue;
            }
            let distance = dx.abs().max(dy.abs()) as f64;
            let extent = size as f64 + sine_noise(x as f64 * 0.3, y as f64 * 0.3) * 1.5;
            if extent <= 0.0 || distance > extent {
                continue;
            }
            let chance = (1.0 - distance / extent).powf(1.2) * 0.85;
            if rng.random::<f64>() < chance {
                grid.set_signed(x, y, color);
            }
        }
    }
}

// Left-anchored horizontal strokes drifting slightly up or down
fn directional_flow(grid: &mut ColorGrid, canvas: &Canvas<'_>, rng: &mut dyn RngCore) {
    let (width, height) = (grid.width(), grid.height());
    for _ in 0..grid.area() / 300 {
        let start_x = rng.random_range(0..(width / 3).max(1));
        let mut row = rng.random_range(0..height) as f64;
        let color = select_weighted(canvas.ratios, canvas.colors(), rng);
        let length = rng.random_range(8..23);

        for step in 0..length {
            let x = start_x + step;
            let y = row as isize;
            if x >= width || y < 0 || y as usize >= height {
                break;
            }
            if rng.random::<f64>() < 0.7 {
                grid.set(x, y as usize, color);
            }
            row += (rng.random::<f64>() - 0.5) * 0.4;
        }
    }
}

fn small_clusters(grid: &mut ColorGrid, canvas: &Canvas<'_>, rng: &mut dyn RngCore) {
    for _ in 0..grid.area() / 30 {
        let (cx, cy) = random_cell(grid, rng);
        let color = select_weighted(canvas.ratios, canvas.colors(), rng);
        let size = rng.random_range(1..=2_usize) as isize;

        for dy in -size..=size {
            for dx in -size..=size {
                let (x, y) = (cx + dx, cy + dy);
                if !grid.contains(x, y) {
                    continue;
                }
                let distance = ((dx * dx + dy * dy) as f64).sqrt();
                let radius = size as f64 + sine_noise(x as f64 * 0.8, y as f64 * 0.8) * 0.8;
                if radius > 0.0
                    && distance <= radius
                    && rng.random::<f64>() < (1.0 - distance / radius) * 0.9
                {
                    grid.set_signed(x, y, color);
                }
            }
        }
    }
}

fn fractal_marks(grid: &mut ColorGrid, canvas: &Canvas<'_>, rng: &mut dyn RngCore) {
    for _ in 0..grid.area() / 200 {
        let (cx, cy) = random_cell(grid, rng);
        let color = select_weighted(canvas.ratios, canvas.colors(), rng);
        let mark = MARKS
            .get(rng.random_range(0..MARKS.len()))
            .copied()
            .unwrap_or(&[]);
        for &(dx, dy) in mark {
            grid.set_signed(cx + dx, cy + dy, color);
        }
    }
}
