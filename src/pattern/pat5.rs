//! Digital fractal recipe
//!
//! Sharp hash noise is mapped through the color ratios, clumped into small
//! rectangular pixel blocks, mixed with an IFS fractal layer and finished with
//! weighted rectangle clusters and a sprinkle of single-cell texture.

use crate::math::noise::hash_noise;
use crate::math::probability::cumulative_index;
use crate::pattern::{Canvas, Generator};
use crate::spatial::cellular::{Boundary, CellularSmoother, Neighborhood};
use crate::spatial::fractal::{ifs_layer, quadrant_maps};
use crate::spatial::grid::ColorGrid;
use image::RgbaImage;
use rand::{Rng, RngCore};

/// Sampling scale of the initial hash noise
const NOISE_SCALE: f64 = 0.3;
/// Share of cells copied straight from the fractal layer
const FRACTAL_WEIGHT: f64 = 0.1;
/// Per-cell chance of a random texture color
const TEXTURE_CHANCE: f64 = 0.05;

/// Rectangle shapes for the clustering pass
#[derive(Debug, Clone, Copy, PartialEq)]
struct RectangleCluster {
    width: usize,
    height: usize,
    fill: f64,
    weight: f64,
}

const fn cluster(width: usize, height: usize, fill: f64, weight: f64) -> RectangleCluster {
    RectangleCluster {
        width,
        height,
        fill,
        weight,
    }
}

/// Full blocks fill solidly, quarters fragment, rectangles sit between
const CLUSTERS: [RectangleCluster; 9] = [
    cluster(4, 4, 0.9, 0.25),
    cluster(6, 6, 0.9, 0.15),
    cluster(6, 3, 0.85, 0.12),
    cluster(8, 2, 0.85, 0.10),
    cluster(4, 2, 0.85, 0.08),
    cluster(2, 2, 0.75, 0.12),
    cluster(3, 3, 0.75, 0.08),
    cluster(2, 6, 0.85, 0.05),
    cluster(3, 4, 0.85, 0.05),
];

/// Digital fractal recipe (`pat5`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Pat5Generator;

impl Generator for Pat5Generator {
    fn generate(&self, canvas: &Canvas<'_>, rng: &mut dyn RngCore) -> RgbaImage {
        let colors = canvas.colors();
        let mut grid = ColorGrid::from_fn(canvas.columns(), canvas.rows(), colors, |x, y| {
            let value = (hash_noise(x as f64 * NOISE_SCALE, y as f64 * NOISE_SCALE) + 1.0) / 2.0;
            cumulative_index(value, canvas.ratios, colors)
        });

        let light = CellularSmoother::new(1, 0.3)
            .with_neighborhood(Neighborhood::VonNeumann)
            .with_boundary(Boundary::Clamp)
            .with_min_consensus(3);
        for _ in 0..2 {
            stamp_pixel_blocks(&mut grid, rng);
            light.apply(&mut grid, rng);
        }

        let layer = ifs_layer(grid.width(), grid.height(), colors, &quadrant_maps(), rng);
        blend_layer(&mut grid, &layer, rng);
        cluster_rectangles(&mut grid, &layer, rng);
        add_texture(&mut grid, rng);

        grid.render(canvas.palette, canvas.block)
    }
}

// Extend a cell's color right, down or both
fn stamp_pixel_blocks(grid: &mut ColorGrid, rng: &mut dyn RngCore) {
    for y in 0..grid.height().saturating_sub(1) {
        for x in 0..grid.width().saturating_sub(1) {
            if rng.random::<f64>() >= 0.4 {
                continue;
            }
            let color = grid.get(x, y);
            match rng.random_range(0..3) {
                0 => grid.set(x + 1, y, color),
                1 => grid.set(x, y + 1, color),
                _ => {
                    grid.set(x + 1, y, color);
                    grid.set(x, y + 1, color);
                    grid.set(x + 1, y + 1, color);
                }
            }
        }
    }
}

fn blend_layer(grid: &mut ColorGrid, layer: &ColorGrid, rng: &mut dyn RngCore) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if rng.random::<f64>() < FRACTAL_WEIGHT {
                grid.set(x, y, layer.get(x, y));
            }
        }
    }
}

fn choose_cluster(rng: &mut dyn RngCore) -> RectangleCluster {
    let draw = rng.random::<f64>();
    let mut cumulative = 0.0;
    for candidate in CLUSTERS {
        cumulative += candidate.weight;
        if draw <= cumulative {
            return candidate;
        }
    }
    CLUSTERS[0]
}

// Paint weighted rectangles in the fractal color or the local majority
fn cluster_rectangles(grid: &mut ColorGrid, layer: &ColorGrid, rng: &mut dyn RngCore) {
    let (width, height) = (grid.width(), grid.height());
    for _ in 0..grid.area() / 30 {
        let shape = choose_cluster(rng);
        if shape.width >= width || shape.height >= height {
            continue;
        }

        let left = rng.random_range(0..=width - shape.width);
        let top = rng.random_range(0..=height - shape.height);
        let color = if rng.random::<f64>() < 0.4 {
            layer.get(left + shape.width / 2, top + shape.height / 2)
        } else {
            grid.dominant_in(left, top, shape.width, shape.height)
        };

        for y in top..top + shape.height {
            for x in left..left + shape.width {
                if rng.random::<f64>() < shape.fill {
                    grid.set(x, y, color);
                }
            }
        }
    }
}

fn add_texture(grid: &mut ColorGrid, rng: &mut dyn RngCore) {
    let colors = grid.colors();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if rng.random::<f64>() < TEXTURE_CHANCE {
                grid.set(x, y, rng.random_range(0..colors));
            }
        }
    }
}
