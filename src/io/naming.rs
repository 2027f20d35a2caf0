//! Output file name conventions
//!
//! Both schemes carry the `gocamo` prefix and a zero-padded job index.

use crate::io::configuration::OUTPUT_PREFIX;
use crate::io::palette::{Palette, strip_hash, to_hex};
use crate::pattern::PatternKind;
use image::Rgb;
use std::path::Path;

/// `gocamo_{index:03}_{name}_{codes}_{pattern}_w{W}x{H}.png`
///
/// Codes are the palette's original hex strings without `#`, joined by `_`.
pub fn pattern_file_name(
    index: usize,
    palette: &Palette,
    pattern: PatternKind,
    width: usize,
    height: usize,
) -> String {
    let codes: Vec<&str> = palette.codes.iter().map(|code| strip_hash(code)).collect();
    format!(
        "{OUTPUT_PREFIX}_{index:03}_{}_{}_{pattern}_w{width}x{height}.png",
        palette.name,
        codes.join("_")
    )
}

/// `gocamo_from_image_{stem}_{index:03}_{hex}_k{K}_w{W}x{H}.png`
///
/// `colors` should already be in the order they are to appear.
pub fn image_file_name(
    source: &Path,
    index: usize,
    colors: &[Rgb<u8>],
    k: usize,
    width: usize,
    height: usize,
) -> String {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    let hex: Vec<String> = colors.iter().copied().map(to_hex).collect();
    format!(
        "{OUTPUT_PREFIX}_from_image_{stem}_{index:03}_{}_k{k}_w{width}x{height}.png",
        hex.join("_")
    )
}
