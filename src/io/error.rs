//! Error types and classification for generation jobs

use std::fmt;
use std::path::PathBuf;

/// Coarse classification of a [`CamoError`]
///
/// Callers aggregating batch results only need to know which side of the
/// boundary failed: bad input, an unreadable source image, or the file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid palette, recipe name or parameter
    Input,
    /// Source image could not be read or decoded
    Decode,
    /// Failure at the file-write boundary
    Io,
}

/// Main error type for all generation operations
#[derive(Debug)]
pub enum CamoError {
    /// Palette is empty
    NoColors,

    /// Palette has fewer than the two colors every recipe needs
    TooFewColors {
        /// Number of colors supplied
        count: usize,
    },

    /// Recipe name does not match any known pattern
    UnknownPattern {
        /// The unrecognised name
        name: String,
    },

    /// A color code could not be parsed
    InvalidColor {
        /// The offending color text
        value: String,
        /// What is wrong with it
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to open or decode a source image
    ImageDecode {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode or write a generated image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Palette file is not valid palette JSON
    PaletteFile {
        /// Path of the palette file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// A batch job did not finish within its time budget
    Timeout {
        /// Budget that was exceeded
        seconds: u64,
    },

    /// A worker thread could not be started or stopped without reporting
    Worker {
        /// What went wrong
        reason: String,
    },
}

impl CamoError {
    /// Classify the error for aggregation and reporting
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoColors
            | Self::TooFewColors { .. }
            | Self::UnknownPattern { .. }
            | Self::InvalidColor { .. }
            | Self::InvalidParameter { .. }
            | Self::PaletteFile { .. } => ErrorKind::Input,
            Self::ImageDecode { .. } => ErrorKind::Decode,
            Self::ImageExport { .. }
            | Self::FileSystem { .. }
            | Self::Timeout { .. }
            | Self::Worker { .. } => ErrorKind::Io,
        }
    }
}

impl fmt::Display for CamoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoColors => write!(f, "no colors provided"),
            Self::TooFewColors { count } => {
                write!(f, "at least 2 colors are required, got {count}")
            }
            Self::UnknownPattern { name } => write!(f, "unknown pattern type: {name}"),
            Self::InvalidColor { value, reason } => {
                write!(f, "invalid hex color '{value}': {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageDecode { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::PaletteFile { path, source } => {
                write!(
                    f,
                    "Failed to decode palette file '{}': {source}",
                    path.display()
                )
            }
            Self::Timeout { seconds } => {
                write!(f, "operation timed out after {seconds}s")
            }
            Self::Worker { reason } => write!(f, "worker failure: {reason}"),
        }
    }
}

impl std::error::Error for CamoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::PaletteFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, CamoError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CamoError {
    CamoError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for `operation` on `path`
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> CamoError {
    CamoError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
