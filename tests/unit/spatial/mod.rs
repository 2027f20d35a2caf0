pub mod fractal;
pub mod grid;
