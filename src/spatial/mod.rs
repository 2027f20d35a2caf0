//! Spatial primitives operating on block-resolution color grids
//!
//! This module contains the building blocks every recipe composes:
//! - The color index grid and its renderer
//! - Majority-vote cellular automaton smoothing
//! - Seeded organic growth
//! - Template stamping and IFS fractal layers

/// Majority-vote smoothing passes
pub mod cellular;
/// Iterated function system layers
pub mod fractal;
/// Color index grid and rendering
pub mod grid;
/// Poisson-disk seeding and organic cluster growth
pub mod growth;
/// Stamp library and overlap-limited placement
pub mod templates;

pub use cellular::{Boundary, CellularSmoother, Neighborhood};
pub use grid::ColorGrid;
