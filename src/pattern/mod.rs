//! Palette-driven camouflage recipes
//!
//! Every recipe implements [`Generator`] and is reached through the closed
//! [`PatternKind`] enum. [`generate`] validates the palette, resolves color
//! ratios, runs the recipe and applies the optional post-processing passes.

/// Legacy box and blob recipes
pub mod legacy;
/// Layered military recipe
pub mod pat1;
/// Scattered multi-scale recipe
pub mod pat2;
/// Geometric box recipe
pub mod pat3;
/// Organic cellular recipe
pub mod pat4;
/// Digital fractal recipe
pub mod pat5;
/// Noise and edge post-processing
pub mod postprocess;
/// Grid drawing helpers shared by recipes
pub mod shapes;

use crate::io::configuration::GenerationConfig;
use crate::io::error::{CamoError, Result, invalid_parameter};
use crate::math::probability::{equal_ratios, marpat_ratios};
use crate::spatial::grid::ColorGrid;
use image::{Rgb, RgbaImage};
use rand::{Rng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Inputs shared by every recipe for one generation call
#[derive(Debug, Clone, Copy)]
pub struct Canvas<'a> {
    /// Output width in pixels
    pub width: usize,
    /// Output height in pixels
    pub height: usize,
    /// Reconciled block size
    pub block: usize,
    /// Palette colors
    pub palette: &'a [Rgb<u8>],
    /// One weight per palette color, summing to one
    pub ratios: &'a [f64],
}

impl Canvas<'_> {
    /// Grid columns at block resolution
    pub const fn columns(&self) -> usize {
        self.width / self.block
    }

    /// Grid rows at block resolution
    pub const fn rows(&self) -> usize {
        self.height / self.block
    }

    /// Palette length
    pub const fn colors(&self) -> usize {
        self.palette.len()
    }

    /// Empty grid at block resolution filled with `index`
    pub fn grid(&self, index: usize) -> ColorGrid {
        ColorGrid::filled(self.columns(), self.rows(), self.colors(), index)
    }
}

/// A camouflage recipe
///
/// Implementations are total: the palette has already been validated, so a
/// recipe always produces an image of exactly `canvas.width`×`canvas.height`.
pub trait Generator {
    /// Produce the raw pattern before post-processing
    fn generate(&self, canvas: &Canvas<'_>, rng: &mut dyn RngCore) -> RgbaImage;
}

/// Closed set of recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Layered military shapes
    Pat1,
    /// Scattered multi-scale blobs and flows
    Pat2,
    /// Geometric boxes with template stamps
    Pat3,
    /// Cellular regions with organic cluster overlay
    Pat4,
    /// Digital pixel clustering with fractal layer
    Pat5,
    /// Legacy square clusters
    Box,
    /// Legacy round blobs
    Blob,
}

impl PatternKind {
    /// The recipes `all` expands to, in index order
    pub const ALL: [Self; 5] = [Self::Pat1, Self::Pat2, Self::Pat3, Self::Pat4, Self::Pat5];

    /// Name used on the command line and in file names
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pat1 => "pat1",
            Self::Pat2 => "pat2",
            Self::Pat3 => "pat3",
            Self::Pat4 => "pat4",
            Self::Pat5 => "pat5",
            Self::Box => "box",
            Self::Blob => "blob",
        }
    }

    /// Recipe implementation for this kind
    pub fn generator(self) -> Box<dyn Generator> {
        match self {
            Self::Pat1 => Box::new(pat1::Pat1Generator),
            Self::Pat2 => Box::new(pat2::Pat2Generator),
            Self::Pat3 => Box::new(pat3::Pat3Generator),
            Self::Pat4 => Box::new(pat4::Pat4Generator),
            Self::Pat5 => Box::new(pat5::Pat5Generator),
            Self::Box => Box::new(legacy::BoxGenerator),
            Self::Blob => Box::new(legacy::BlobGenerator),
        }
    }

    /// Ratios used when the caller does not specify any
    pub fn default_ratios(self, colors: usize) -> Vec<f64> {
        match self {
            Self::Pat5 => marpat_ratios(colors),
            _ => equal_ratios(colors),
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKind {
    type Err = CamoError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pat1" => Ok(Self::Pat1),
            "pat2" => Ok(Self::Pat2),
            "pat3" => Ok(Self::Pat3),
            "pat4" => Ok(Self::Pat4),
            "pat5" => Ok(Self::Pat5),
            "box" => Ok(Self::Box),
            "blob" => Ok(Self::Blob),
            _ => Err(CamoError::UnknownPattern {
                name: name.to_string(),
            }),
        }
    }
}

/// Check that a palette can drive a recipe
///
/// # Errors
///
/// Returns [`CamoError::NoColors`] for an empty palette and
/// [`CamoError::TooFewColors`] for a single color.
pub fn validate_palette(palette: &[Rgb<u8>]) -> Result<()> {
    match palette.len() {
        0 => Err(CamoError::NoColors),
        1 => Err(CamoError::TooFewColors { count: 1 }),
        _ => Ok(()),
    }
}

/// Generate one pattern image from a palette
///
/// Always returns an image of exactly the configured size when it succeeds.
///
/// # Errors
///
/// Fails on an empty or single-color palette and on zero output dimensions.
pub fn generate<R: Rng>(
    config: &GenerationConfig,
    palette: &[Rgb<u8>],
    rng: &mut R,
) -> Result<RgbaImage> {
    validate_palette(palette)?;
    if config.width == 0 {
        return Err(invalid_parameter("width", &config.width, &"must be at least 1"));
    }
    if config.height == 0 {
        return Err(invalid_parameter("height", &config.height, &"must be at least 1"));
    }

    let ratios = config.ratios.as_ref().map_or_else(
        || config.pattern.default_ratios(palette.len()),
        |spec| spec.resolve(palette.len(), rng),
    );
    let block = config.reconciled_block_size();
    tracing::debug!(
        pattern = %config.pattern,
        block,
        requested = config.block_size,
        colors = palette.len(),
        "generating pattern"
    );

    let canvas = Canvas {
        width: config.width,
        height: config.height,
        block,
        palette,
        ratios: &ratios,
    };
    let mut image = config.pattern.generator().generate(&canvas, rng);

    if config.add_noise {
        postprocess::add_noise(&mut image, palette, rng);
    }
    if config.add_edge {
        postprocess::add_edge_details(&mut image, block, rng);
    }

    Ok(image)
}
