//! Hex color parsing, palette files and source image discovery

use crate::io::error::{CamoError, Result, file_system};
use image::Rgb;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File extensions accepted as source photographs
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

fn invalid_color(value: &str, reason: impl Into<String>) -> CamoError {
    CamoError::InvalidColor {
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` into a color
///
/// Hex digits are case-insensitive; any whitespace is rejected.
///
/// # Errors
///
/// Returns [`CamoError::InvalidColor`] for whitespace, a length other than
/// 3 or 6 digits, or a non-hex character.
pub fn parse_hex(code: &str) -> Result<Rgb<u8>> {
    if code.chars().any(char::is_whitespace) {
        return Err(invalid_color(code, "contains spaces"));
    }
    let digits = code.strip_prefix('#').unwrap_or(code);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_color(code, "invalid hex character"));
    }

    let expanded: String = match digits.len() {
        6 => digits.to_string(),
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => {
            return Err(invalid_color(
                code,
                "should be 6 characters or 3 for short form",
            ));
        }
    };

    let channel = |offset: usize| {
        expanded
            .get(offset..offset + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| invalid_color(code, "invalid hex character"))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Hex code as written in file names, without the leading `#`
pub fn strip_hash(code: &str) -> &str {
    code.strip_prefix('#').unwrap_or(code)
}

/// Lowercase six-digit hex for a color
pub fn to_hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("{r:02x}{g:02x}{b:02x}")
}

/// A named list of colors together with the codes they were parsed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Name used in output file names
    pub name: String,
    /// Original hex codes, kept for naming
    pub codes: Vec<String>,
    /// Parsed colors in the same order
    pub colors: Vec<Rgb<u8>>,
}

impl Palette {
    /// Parse every code of a named palette
    ///
    /// # Errors
    ///
    /// Returns [`CamoError::NoColors`] for an empty list,
    /// [`CamoError::TooFewColors`] for a single color and
    /// [`CamoError::InvalidColor`] for any bad code.
    pub fn from_hex(name: impl Into<String>, codes: &[String]) -> Result<Self> {
        match codes.len() {
            0 => return Err(CamoError::NoColors),
            1 => return Err(CamoError::TooFewColors { count: 1 }),
            _ => {}
        }
        let colors = codes
            .iter()
            .map(|code| parse_hex(code))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: name.into(),
            codes: codes.to_vec(),
            colors,
        })
    }
}

/// Split a comma-separated color list into a `custom` palette
///
/// Spaces around entries and empty entries are dropped before parsing.
///
/// # Errors
///
/// Fails if fewer than two colors remain or any code is invalid.
pub fn parse_color_list(list: &str) -> Result<Palette> {
    let codes: Vec<String> = list
        .replace(' ', "")
        .split(',')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();
    Palette::from_hex("custom", &codes)
}

/// One entry of a palette file
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteEntry {
    /// Palette name
    pub name: String,
    /// Hex color codes
    pub colors: Vec<String>,
}

/// Decode the palette entries of a JSON document
///
/// Entries are returned unparsed so a bad color only fails its own job.
///
/// # Errors
///
/// Returns [`CamoError::PaletteFile`] for malformed JSON and an invalid
/// parameter error when the array is empty.
pub fn parse_palette_json(text: &str, path: &Path) -> Result<Vec<PaletteEntry>> {
    let entries: Vec<PaletteEntry> =
        serde_json::from_str(text).map_err(|source| CamoError::PaletteFile {
            path: path.to_path_buf(),
            source,
        })?;
    if entries.is_empty() {
        return Err(crate::io::error::invalid_parameter(
            "json",
            &path.display(),
            &"no color palettes found in JSON file",
        ));
    }
    Ok(entries)
}

/// Read and decode a palette file
///
/// # Errors
///
/// Fails if the file cannot be read or does not hold a non-empty palette array.
pub fn load_palette_file(path: &Path) -> Result<Vec<PaletteEntry>> {
    let text =
        std::fs::read_to_string(path).map_err(|source| file_system(path, "read", source))?;
    parse_palette_json(&text, path)
}

/// Whether a path has one of the accepted image extensions
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|accepted| extension.eq_ignore_ascii_case(accepted))
        })
}

/// Recursively collect source images under `dir`, sorted by path
///
/// # Errors
///
/// Returns a file system error if any directory cannot be read.
pub fn find_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current)
            .map_err(|source| file_system(&current, "read directory", source))?;
        for entry in entries {
            let path = entry
                .map_err(|source| file_system(&current, "read directory entry", source))?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if is_image_file(&path) {
                images.push(path);
            }
        }
    }

    images.sort();
    Ok(images)
}
