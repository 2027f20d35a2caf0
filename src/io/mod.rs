//! File formats, batch orchestration and the command-line surface

/// Parallel job execution with per-job timeouts
pub mod batch;
/// Command-line argument parsing and the top-level run
pub mod cli;
/// Constants and generation parameters
pub mod configuration;
/// Error types for all operations
pub mod error;
/// Image decoding and PNG export
pub mod image;
/// Output file name conventions
pub mod naming;
/// Hex colors, palette files and image discovery
pub mod palette;
/// Batch progress display
pub mod progress;
