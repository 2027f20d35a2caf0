//! Organic cellular recipe
//!
//! Weighted noise is fully smoothed into soft regions, rendered, and then
//! overlaid at pixel resolution with organically grown clusters.

use crate::math::probability::select_weighted;
use crate::pattern::{Canvas, Generator};
use crate::spatial::cellular::CellularSmoother;
use crate::spatial::grid::ColorGrid;
use crate::spatial::growth::{grow_clusters, place_seeds, render_clusters};
use image::RgbaImage;
use rand::RngCore;

/// Organic cellular recipe (`pat4`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Pat4Generator;

impl Generator for Pat4Generator {
    fn generate(&self, canvas: &Canvas<'_>, rng: &mut dyn RngCore) -> RgbaImage {
        let mut grid = ColorGrid::from_fn(canvas.columns(), canvas.rows(), canvas.colors(), |_, _| {
            select_weighted(canvas.ratios, canvas.colors(), rng)
        });
        CellularSmoother::new(3, 1.0).apply(&mut grid, rng);

        let mut image = grid.render(canvas.palette, canvas.block);

        let seeds = place_seeds(canvas.width, canvas.height, canvas.block, canvas.colors(), rng);
        let clusters = grow_clusters(canvas.width, canvas.height, &seeds, canvas.block, rng);
        render_clusters(&mut image, &clusters, canvas.palette, canvas.block, rng);

        image
    }
}
