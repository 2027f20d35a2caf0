//! First-generation grid recipes, selectable as `box` and `blob`

use crate::pattern::shapes::{fill_rect, scatter_disc};
use crate::pattern::{Canvas, Generator};
use crate::spatial::cellular::{CellularSmoother, Neighborhood};
use crate::spatial::grid::ColorGrid;
use image::{Rgb, RgbaImage};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Uniform noise smoothed into square clusters (`box`)
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxGenerator;

impl Generator for BoxGenerator {
    fn generate(&self, canvas: &Canvas<'_>, rng: &mut dyn RngCore) -> RgbaImage {
        let colors = canvas.colors();
        let mut grid = ColorGrid::from_fn(canvas.columns(), canvas.rows(), colors, |_, _| {
            rng.random_range(0..colors)
        });
        CellularSmoother::new(3, 0.7).apply(&mut grid, rng);

        let step = 4;
        for y in (0..grid.height()).step_by(step) {
            for x in (0..grid.width()).step_by(step) {
                if rng.random::<f64>() < 0.3 {
                    let color = grid.get(x, y);
                    let size = rng.random_range(1..=step);
                    fill_rect(&mut grid, x as isize, y as isize, size, size, color);
                }
            }
        }

        grid.render(canvas.palette, canvas.block)
    }
}

/// Coarse, shuffled-palette round blobs over a wrapped grid (`blob`)
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobGenerator;

impl Generator for BlobGenerator {
    fn generate(&self, canvas: &Canvas<'_>, rng: &mut dyn RngCore) -> RgbaImage {
        let mut palette: Vec<Rgb<u8>> = canvas.palette.to_vec();
        palette.shuffle(rng);
        let colors = palette.len();

        let cell = canvas.block * rng.random_range(1..=3);
        let columns = (canvas.width / cell).max(1);
        let rows = (canvas.height / cell).max(1);
        let mut grid = ColorGrid::from_fn(columns, rows, colors, |_, _| rng.random_range(0..colors));

        let passes = rng.random_range(2..=4);
        CellularSmoother::new(passes, 1.0)
            .with_neighborhood(Neighborhood::RandomMoore { max: 2 })
            .apply(&mut grid, rng);

        for _ in 0..grid.area() / 20 {
            let center = (
                rng.random_range(0..columns) as isize,
                rng.random_range(0..rows) as isize,
            );
            let color = rng.random_range(0..colors);
            let radius = rng.random_range(0..(rows / 4).max(1)) + rows / 8;
            scatter_disc(&mut grid, center, radius as isize, color, 0.7, true, rng);
        }

        grid.render_tiled(&palette, cell, canvas.width, canvas.height)
    }
}
