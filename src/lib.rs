//! Digital camouflage texture synthesis
//!
//! Patterns are grown on a coarse grid of palette indices with cellular
//! automata, organic flood fills, template stamps and fractal layers, then
//! rendered at block resolution. Palettes come from hex codes or are
//! extracted from photographs by k-means clustering.

#![forbid(unsafe_code)]

/// Image-derived palettes and rendering
pub mod analysis;
/// Configuration, palettes, batch execution and error handling
pub mod io;
/// Weighted selection, block-size reconciliation and noise
pub mod math;
/// Camouflage recipes and post-processing
pub mod pattern;
/// Index grids and the algorithms that shape them
pub mod spatial;

pub use io::error::{CamoError, Result};
