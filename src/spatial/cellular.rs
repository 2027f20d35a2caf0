//! Majority-vote cellular automaton that coarsens noisy grids into regions
//!
//! One parameterised smoother serves every recipe. Each pass reads from a
//! snapshot of the previous pass, so update order never leaks into the result.

use crate::spatial::grid::{ColorGrid, most_frequent};
use ndarray::Array2;
use rand::Rng;

/// Which neighbors vote for a cell (the cell always votes for itself)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// Square neighborhood of the given radius
    Moore(usize),
    /// Square neighborhood whose radius is drawn per cell from `1..=max`
    RandomMoore {
        /// Largest radius that may be drawn
        max: usize,
    },
    /// The four edge-adjacent neighbors only
    VonNeumann,
}

/// How neighborhoods behave at the grid edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Opposite edges are adjacent
    Wrap,
    /// Positions outside the grid do not vote
    Clamp,
}

/// Parameterised majority-vote smoother
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellularSmoother {
    /// Neighborhood shape
    pub neighborhood: Neighborhood,
    /// Number of full-grid passes
    pub passes: usize,
    /// Chance that a cell adopts the majority color in a pass
    pub probability: f64,
    /// Edge handling
    pub boundary: Boundary,
    /// Minimum vote count the majority needs before a cell may change
    pub min_consensus: usize,
}

impl CellularSmoother {
    /// Radius-1 wrapping smoother with no consensus threshold
    pub const fn new(passes: usize, probability: f64) -> Self {
        Self {
            neighborhood: Neighborhood::Moore(1),
            passes,
            probability,
            boundary: Boundary::Wrap,
            min_consensus: 0,
        }
    }

    /// Use a different neighborhood shape
    #[must_use]
    pub const fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Use a different edge mode
    #[must_use]
    pub const fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Require at least `votes` for the majority color before changing a cell
    #[must_use]
    pub const fn with_min_consensus(mut self, votes: usize) -> Self {
        self.min_consensus = votes;
        self
    }

    /// Run every pass over `grid` in place
    pub fn apply<R: Rng + ?Sized>(&self, grid: &mut ColorGrid, rng: &mut R) {
        if grid.area() == 0 {
            return;
        }

        let mut counts = vec![0_usize; grid.colors()];
        for _ in 0..self.passes {
            let (height, width) = grid.cells().dim();
            let mut next = Array2::zeros((height, width));

            for y in 0..height {
                for x in 0..width {
                    let current = grid.get(x, y);
                    counts.iter_mut().for_each(|count| *count = 0);
                    self.tally(grid, x, y, rng, &mut counts);

                    let majority = most_frequent(&counts);
                    let votes = counts.get(majority).copied().unwrap_or(0);
                    let adopt = votes >= self.min_consensus && rng.random::<f64>() < self.probability;

                    if let Some(cell) = next.get_mut([y, x]) {
                        *cell = if adopt { majority } else { current };
                    }
                }
            }

            grid.replace_cells(next);
        }
    }

    fn tally<R: Rng + ?Sized>(
        &self,
        grid: &ColorGrid,
        x: usize,
        y: usize,
        rng: &mut R,
        counts: &mut [usize],
    ) {
        let radius = match self.neighborhood {
            Neighborhood::Moore(radius) => radius as isize,
            Neighborhood::RandomMoore { max } => rng.random_range(1..=max.max(1)) as isize,
            Neighborhood::VonNeumann => {
                for (dx, dy) in [(0, 0), (0, -1), (-1, 0), (1, 0), (0, 1)] {
                    self.vote(grid, x, y, dx, dy, counts);
                }
                return;
            }
        };

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                self.vote(grid, x, y, dx, dy, counts);
            }
        }
    }

    fn vote(
        &self,
        grid: &ColorGrid,
        x: usize,
        y: usize,
        dx: isize,
        dy: isize,
        counts: &mut [usize],
    ) {
        let width = grid.width() as isize;
        let height = grid.height() as isize;
        let nx = x as isize + dx;
        let ny = y as isize + dy;

        let color = match self.boundary {
            Boundary::Wrap => Some(grid.get(
                nx.rem_euclid(width) as usize,
                ny.rem_euclid(height) as usize,
            )),
            Boundary::Clamp => grid.get_signed(nx, ny),
        };

        if let Some(count) = color.and_then(|index| counts.get_mut(index)) {
            *count += 1;
        }
    }
}
