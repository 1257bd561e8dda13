//! Template rescaling and ZNCC planning.
//!
//! A color template is resized once per sweep scale, reduced to grayscale and
//! turned into a `TemplatePlan` that the kernel scores against the canvas.

use crate::image::{gray_from_rgb, resize_bilinear, ImageView, OwnedImage};
use crate::util::math::pct_to_factor;
use crate::util::CropMatchResult;
use ::image::RgbImage;

mod plan;

pub use plan::{FlatTemplate, TemplatePlan};

/// A template resized to one scale percentage, in grayscale.
#[derive(Clone, Debug)]
pub struct ScaledTemplate {
    scale_pct: u32,
    gray: OwnedImage,
}

impl ScaledTemplate {
    /// Resizes `template` by `scale_pct / 100` and converts it to grayscale.
    pub fn build(template: &RgbImage, scale_pct: u32) -> CropMatchResult<Self> {
        let resized = resize_bilinear(template, pct_to_factor(scale_pct));
        let gray = gray_from_rgb(&resized)?;
        Ok(Self { scale_pct, gray })
    }

    pub fn scale_pct(&self) -> u32 {
        self.scale_pct
    }

    pub fn width(&self) -> usize {
        self.gray.width()
    }

    pub fn height(&self) -> usize {
        self.gray.height()
    }

    pub fn view(&self) -> ImageView<'_, u8> {
        self.gray.view()
    }

    /// Builds the ZNCC plan; fails with `DegenerateTemplate` if flat.
    pub fn plan(&self) -> CropMatchResult<TemplatePlan> {
        TemplatePlan::from_view(self.view())
    }

    /// The constant-intensity form, when every pixel is the same.
    pub fn flat(&self) -> Option<FlatTemplate> {
        FlatTemplate::from_view(self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::ScaledTemplate;
    use ::image::{Rgb, RgbImage};

    #[test]
    fn build_scales_both_axes() {
        let tpl = RgbImage::from_fn(40, 20, |x, y| Rgb([(x * 6) as u8, (y * 12) as u8, 0]));
        let scaled = ScaledTemplate::build(&tpl, 25).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (10, 5));
        assert_eq!(scaled.scale_pct(), 25);
        let scaled = ScaledTemplate::build(&tpl, 125).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (50, 25));
    }

    #[test]
    fn flat_template_has_no_plan() {
        let tpl = RgbImage::from_pixel(8, 8, Rgb([255, 0, 0]));
        let scaled = ScaledTemplate::build(&tpl, 50).unwrap();
        assert!(scaled.plan().is_err());
        let flat = scaled.flat().unwrap();
        assert_eq!((flat.width(), flat.height()), (4, 4));
        assert_eq!(
            flat.value(),
            scaled.view().get(0, 0).copied().unwrap()
        );
    }

    #[test]
    fn textured_template_is_not_flat() {
        let tpl = RgbImage::from_fn(8, 8, |x, _| Rgb([(x * 30) as u8, 0, 0]));
        let scaled = ScaledTemplate::build(&tpl, 100).unwrap();
        assert!(scaled.flat().is_none());
        assert!(scaled.plan().is_ok());
    }
}
