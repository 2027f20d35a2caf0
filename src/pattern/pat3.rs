//! Geometric box recipe
//!
//! Weighted noise is clustered by a variable-radius automaton, then blocky
//! squares and rectangles are grown from sampled cells and finally the
//! template library is stamped over the result.

use crate::math::probability::select_weighted;
use crate::pattern::shapes::fill_rect;
use crate::pattern::{Canvas, Generator};
use crate::spatial::cellular::{CellularSmoother, Neighborhood};
use crate::spatial::grid::ColorGrid;
use crate::spatial::templates::{library, place_templates};
use image::RgbaImage;
use rand::{Rng, RngCore};

/// Largest side of an overlaid shape, in cells
const MAX_SHAPE: usize = 8;

/// Geometric box recipe (`pat3`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Pat3Generator;

impl Generator for Pat3Generator {
    fn generate(&self, canvas: &Canvas<'_>, rng: &mut dyn RngCore) -> RgbaImage {
        let mut grid = ColorGrid::from_fn(canvas.columns(), canvas.rows(), canvas.colors(), |_, _| {
            select_weighted(canvas.ratios, canvas.colors(), rng)
        });

        CellularSmoother::new(3, 0.7)
            .with_neighborhood(Neighborhood::RandomMoore { max: 2 })
            .apply(&mut grid, rng);

        add_geometric_shapes(&mut grid, rng);
        place_templates(&mut grid, &library(), rng);

        grid.render(canvas.palette, canvas.block)
    }
}

// Every MAX_SHAPE/2 cells, sometimes extend the sampled color into a box
fn add_geometric_shapes(grid: &mut ColorGrid, rng: &mut dyn RngCore) {
    let step = MAX_SHAPE / 2;
    for y in (0..grid.height()).step_by(step) {
        for x in (0..grid.width()).step_by(step) {
            if rng.random::<f64>() >= 0.3 {
                continue;
            }

            let (width, height) = match rng.random_range(0..3) {
                // Wide
                1 => (
                    rng.random_range(0..MAX_SHAPE) + step,
                    rng.random_range(0..step) + 1,
                ),
                // Tall
                2 => (
                    rng.random_range(0..step) + 1,
                    rng.random_range(0..MAX_SHAPE) + step,
                ),
                _ => (
                    rng.random_range(0..MAX_SHAPE) + 1,
                    rng.random_range(0..MAX_SHAPE) + 1,
                ),
            };

            let color = grid.get(x, y);
            fill_rect(grid, x as isize, y as isize, width, height, color);
        }
    }
}
