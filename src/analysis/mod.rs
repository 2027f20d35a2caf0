//! Image-derived palette extraction and rendering

/// Pipeline from a source photograph to a finished pattern
pub mod extractor;
/// Max pooling and Laplacian sharpening
pub mod filters;
/// k-means color clustering
pub mod kmeans;
/// Resize and centre crop to the output bounds
pub mod resample;
