//! Multi-scale crop search.
//!
//! `Matcher::find` orients the two inputs, halves the image into a canvas,
//! sweeps the template over the configured scales and keeps the single best
//! ZNCC placement. Every negative outcome (crossed dimensions, a template that
//! never fits, a best score under the threshold) is reported as `None`.

mod best;
mod config;
pub(crate) mod sweep;

pub use best::{BestMatch, ScaleMatch};
pub use config::{MatchConfig, ScaleRange};

use crate::annotate::draw_box;
use crate::image::{gray_from_rgb, resize_bilinear, OwnedImage};
use crate::orient::{select_orientation, OrientedPair};
use crate::trace::{trace_event, trace_span};
use crate::util::{CropMatchError, CropMatchResult};
use ::image::RgbImage;

/// Where and how well the template matched, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchReport {
    pub score: f32,
    pub scale_pct: u32,
    pub top_left: (u32, u32),
    /// `top_left` plus the scaled template size.
    pub bottom_right: (u32, u32),
    pub template_size: (u32, u32),
    pub canvas_size: (u32, u32),
    /// Factor the image was resized by to produce the canvas.
    pub downsample: f64,
    /// True when the second input was taken as the image.
    pub swapped: bool,
}

impl MatchReport {
    /// The match box mapped back to full-resolution image coordinates.
    pub fn source_box(&self) -> ((u32, u32), (u32, u32)) {
        let map = |v: u32| (f64::from(v) / self.downsample).round() as u32;
        (
            (map(self.top_left.0), map(self.top_left.1)),
            (map(self.bottom_right.0), map(self.bottom_right.1)),
        )
    }
}

/// An accepted match: the annotated canvas and its report.
#[derive(Clone, Debug)]
pub struct CropMatch {
    pub canvas: RgbImage,
    pub report: MatchReport,
}

/// The downsampled image in color (for drawing) and gray (for scoring).
struct Canvas {
    rgb: RgbImage,
    gray: OwnedImage,
}

impl Canvas {
    fn from_image(image: &RgbImage, downsample: f64) -> CropMatchResult<Self> {
        let rgb = resize_bilinear(image, downsample);
        let gray = gray_from_rgb(&rgb)?;
        Ok(Self { rgb, gray })
    }
}

/// Crop matcher holding a validated configuration.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    pub fn new(cfg: MatchConfig) -> CropMatchResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Decides whether one input is a scaled crop of the other and returns
    /// the annotated canvas on success. Argument order does not matter.
    pub fn find(&self, a: &RgbImage, b: &RgbImage) -> CropMatchResult<Option<CropMatch>> {
        ensure_non_empty(a)?;
        ensure_non_empty(b)?;
        match select_orientation(a, b) {
            Some(pair) => self.match_oriented(pair),
            None => {
                trace_event!("no_orientation");
                Ok(None)
            }
        }
    }

    /// Like `find` but skips drawing the outline.
    pub fn locate(&self, a: &RgbImage, b: &RgbImage) -> CropMatchResult<Option<MatchReport>> {
        ensure_non_empty(a)?;
        ensure_non_empty(b)?;
        let Some(pair) = select_orientation(a, b) else {
            return Ok(None);
        };
        let canvas = Canvas::from_image(pair.image, self.cfg.downsample)?;
        let best = self.sweep(&canvas, pair.template)?;
        Ok(self.accept(&canvas, &best, pair.swapped))
    }

    /// Matches an already oriented pair.
    pub fn match_oriented(&self, pair: OrientedPair<'_>) -> CropMatchResult<Option<CropMatch>> {
        let canvas = Canvas::from_image(pair.image, self.cfg.downsample)?;
        let best = self.sweep(&canvas, pair.template)?;
        let Some(report) = self.accept(&canvas, &best, pair.swapped) else {
            return Ok(None);
        };
        let mut annotated = canvas.rgb;
        draw_box(
            &mut annotated,
            report.top_left,
            report.bottom_right,
            self.cfg.style,
        );
        Ok(Some(CropMatch {
            canvas: annotated,
            report,
        }))
    }

    /// Runs the sweep and returns the raw best match without thresholding.
    ///
    /// An unset `top_left` means no scale fit or nothing scored above zero;
    /// a set one with a low score means the best candidate was not confident.
    pub fn best_match(&self, pair: OrientedPair<'_>) -> CropMatchResult<BestMatch> {
        ensure_non_empty(pair.image)?;
        ensure_non_empty(pair.template)?;
        let canvas = Canvas::from_image(pair.image, self.cfg.downsample)?;
        self.sweep(&canvas, pair.template)
    }

    fn sweep(&self, canvas: &Canvas, template: &RgbImage) -> CropMatchResult<BestMatch> {
        let _span = trace_span!(
            "crop_match",
            canvas_width = canvas.rgb.width(),
            canvas_height = canvas.rgb.height(),
            template_width = template.width(),
            template_height = template.height()
        )
        .entered();

        let view = canvas.gray.view();
        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            return sweep::sweep_parallel(view, template, &self.cfg);
        }
        sweep::sweep_sequential(view, template, &self.cfg)
    }

    fn accept(&self, canvas: &Canvas, best: &BestMatch, swapped: bool) -> Option<MatchReport> {
        if !best.passes(self.cfg.threshold) {
            trace_event!("match_rejected", score = best.score);
            return None;
        }
        let top_left = best.top_left?;
        let bottom_right = best.bottom_right()?;
        let scale_pct = best.scale_pct?;
        trace_event!("match_accepted", score = best.score, scale_pct = scale_pct);
        Some(MatchReport {
            score: best.score,
            scale_pct,
            top_left,
            bottom_right,
            template_size: best.template_size,
            canvas_size: canvas.rgb.dimensions(),
            downsample: self.cfg.downsample,
            swapped,
        })
    }
}

fn ensure_non_empty(img: &RgbImage) -> CropMatchResult<()> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(CropMatchError::InvalidDimensions {
            width: width as usize,
            height: height as usize,
        });
    }
    Ok(())
}

/// Returns the annotated canvas when one image is a scaled crop of the
/// other, using the default configuration.
pub fn find_crop(a: &RgbImage, b: &RgbImage) -> CropMatchResult<Option<RgbImage>> {
    Ok(Matcher::default().find(a, b)?.map(|found| found.canvas))
}
