//! Source image decoding and PNG export

use crate::io::error::{CamoError, Result, file_system};
use image::RgbaImage;
use std::path::Path;

/// Decode any supported image format into an RGBA buffer
///
/// # Errors
///
/// Returns [`CamoError::ImageDecode`] if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let decoded = image::open(path).map_err(|source| CamoError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decoded.to_rgba8())
}

/// Write an image as PNG, creating the parent directory on demand
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)
            .map_err(|source| file_system(parent, "create directory", source))?;
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|source| CamoError::ImageExport {
            path: output_path.to_path_buf(),
            source,
        })
}
