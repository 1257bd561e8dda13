//! Conversions between `image` crate buffers and scoring views.

use crate::image::{ImageView, OwnedImage};
use crate::util::CropMatchResult;
use ::image::{GrayImage, RgbImage};

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &GrayImage) -> CropMatchResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Reduces an RGB buffer to an owned luma image for scoring.
///
/// Uses the `image` crate's luma weights; canvas and template go through the
/// same conversion, so an exact crop stays an exact crop.
pub fn gray_from_rgb(img: &RgbImage) -> CropMatchResult<OwnedImage> {
    let gray = ::image::imageops::grayscale(img);
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    OwnedImage::new(gray.into_raw(), width, height)
}
