//! Loading and saving image files.
//!
//! Inputs are sniffed by their magic bytes, not their extension, and must be
//! one of `SUPPORTED_FORMATS`.

use crate::util::{CropMatchError, CropMatchResult};
use ::image::{ImageFormat, ImageReader, RgbImage};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Bytes read to recognise a format's magic number.
const HEADER_LEN: u64 = 32;

/// Formats accepted as match inputs.
pub const SUPPORTED_FORMATS: [ImageFormat; 3] =
    [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Bmp];

fn io_error(err: impl std::fmt::Display) -> CropMatchError {
    CropMatchError::ImageIo {
        reason: err.to_string(),
    }
}

fn checked_reader(path: &Path) -> CropMatchResult<(ImageReader<BufReader<File>>, ImageFormat)> {
    if !path.is_file() {
        return Err(CropMatchError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut file = File::open(path).map_err(io_error)?;
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    (&mut file)
        .take(HEADER_LEN)
        .read_to_end(&mut header)
        .map_err(io_error)?;
    file.rewind().map_err(io_error)?;

    match ::image::guess_format(&header) {
        Ok(format) if SUPPORTED_FORMATS.contains(&format) => Ok((
            ImageReader::with_format(BufReader::new(file), format),
            format,
        )),
        other => Err(CropMatchError::UnsupportedFormat {
            path: path.to_path_buf(),
            found: other.map_or_else(|_| "unknown".to_string(), |f| format!("{f:?}")),
        }),
    }
}

/// Detects the format of the file at `path` and checks it is supported.
pub fn sniff_format<P: AsRef<Path>>(path: P) -> CropMatchResult<ImageFormat> {
    checked_reader(path.as_ref()).map(|(_, format)| format)
}

/// Sniffs, decodes and converts the file at `path` to 8-bit RGB.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> CropMatchResult<RgbImage> {
    let (reader, _) = checked_reader(path.as_ref())?;
    let img = reader.decode().map_err(io_error)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(CropMatchError::InvalidDimensions {
            width: img.width() as usize,
            height: img.height() as usize,
        });
    }
    Ok(img.to_rgb8())
}

/// Writes `img`, choosing the encoder from the path's extension.
pub fn save_rgb_image<P: AsRef<Path>>(path: P, img: &RgbImage) -> CropMatchResult<()> {
    img.save(path.as_ref()).map_err(io_error)
}
