//! Error types for cropmatch.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for cropmatch operations.
pub type CropMatchResult<T> = std::result::Result<T, CropMatchError>;

/// Errors that can occur when preparing or running a crop match.
///
/// A failed match is not an error: the matcher reports it as `None`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CropMatchError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Template has no intensity variation, so ZNCC is undefined.
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// A matcher parameter is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Input path does not point at a regular file.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    /// Input file is not one of the supported image formats.
    #[error("unsupported image format for {}: {found}", path.display())]
    UnsupportedFormat { path: PathBuf, found: String },
    /// Decoding or encoding failed inside the `image` crate.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
