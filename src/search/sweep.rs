//! Scale sweep: score the template at each scale against the canvas.
//!
//! The sequential sweep stops at the first scale whose template no longer
//! fits the canvas. Scaled sizes grow with the percentage, so the parallel
//! sweep computes that feasible prefix up front, scores it on the rayon pool
//! and folds the results in ascending scale order.

use crate::image::ImageView;
use crate::kernel::scalar::{FlatScalar, ZnccScalar};
use crate::kernel::{Kernel, ScanParams};
use crate::search::best::{BestMatch, ScaleMatch};
use crate::search::MatchConfig;
use crate::template::ScaledTemplate;
use crate::trace::trace_scale;
use crate::util::{CropMatchError, CropMatchResult};
use ::image::RgbImage;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Scores one scaled template; `None` when no window scored.
///
/// A constant template is matched by `FlatScalar` against windows flat at the
/// same intensity, each scoring 1.
pub(crate) fn score_scale(
    canvas: ImageView<'_, u8>,
    scaled: &ScaledTemplate,
    params: ScanParams,
) -> CropMatchResult<Option<ScaleMatch>> {
    let peaks = match scaled.plan() {
        Ok(plan) => ZnccScalar::scan_full(canvas, &plan, params)?,
        Err(CropMatchError::DegenerateTemplate { .. }) => {
            trace_scale!("flat_template", scaled.scale_pct());
            match scaled.flat() {
                Some(flat) => FlatScalar::scan_full(canvas, &flat, params)?,
                None => Vec::new(),
            }
        }
        Err(err) => return Err(err),
    };
    Ok(peaks.into_iter().next().map(|peak| ScaleMatch {
        scale_pct: scaled.scale_pct(),
        x: peak.x as u32,
        y: peak.y as u32,
        width: scaled.width() as u32,
        height: scaled.height() as u32,
        score: peak.score,
    }))
}

fn scan_params(cfg: &MatchConfig) -> ScanParams {
    ScanParams {
        topk: 1,
        min_var_i: cfg.min_var_i,
        min_score: f32::NEG_INFINITY,
    }
}

fn record(best: &mut BestMatch, found: Option<ScaleMatch>, scale_pct: u32) {
    match found {
        Some(candidate) => {
            let replaced = best.offer(candidate);
            trace_scale!(
                "scale_scored",
                scale_pct,
                score = candidate.score,
                replaced = replaced
            );
        }
        None => {
            trace_scale!("scale_unscored", scale_pct);
        }
    }
}

/// Sweeps scales in ascending order, stopping at the first misfit.
pub(crate) fn sweep_sequential(
    canvas: ImageView<'_, u8>,
    template: &RgbImage,
    cfg: &MatchConfig,
) -> CropMatchResult<BestMatch> {
    let params = scan_params(cfg);
    let mut best = BestMatch::new();
    for scale_pct in cfg.scales.iter() {
        let scaled = ScaledTemplate::build(template, scale_pct)?;
        if !canvas.fits(scaled.width(), scaled.height()) {
            trace_scale!(
                "template_exceeds_canvas",
                scale_pct,
                width = scaled.width(),
                height = scaled.height()
            );
            break;
        }
        let found = score_scale(canvas, &scaled, params)?;
        record(&mut best, found, scale_pct);
    }
    Ok(best)
}

/// Scales of the sweep before the first one whose template exceeds the canvas.
#[cfg(feature = "rayon")]
fn feasible_scales(canvas: ImageView<'_, u8>, template: &RgbImage, cfg: &MatchConfig) -> Vec<u32> {
    use crate::util::math::{pct_to_factor, scaled_len};

    let (tpl_width, tpl_height) = template.dimensions();
    cfg.scales
        .iter()
        .take_while(|&pct| {
            let factor = pct_to_factor(pct);
            canvas.fits(
                scaled_len(tpl_width, factor) as usize,
                scaled_len(tpl_height, factor) as usize,
            )
        })
        .collect()
}

/// Parallel sweep with the same result as `sweep_sequential`.
#[cfg(feature = "rayon")]
pub(crate) fn sweep_parallel(
    canvas: ImageView<'_, u8>,
    template: &RgbImage,
    cfg: &MatchConfig,
) -> CropMatchResult<BestMatch> {
    let params = scan_params(cfg);
    let scales = feasible_scales(canvas, template, cfg);
    crate::trace::trace_event!("parallel_sweep", scales = scales.len());

    let results: Vec<CropMatchResult<Option<ScaleMatch>>> = scales
        .par_iter()
        .map(|&scale_pct| {
            let scaled = ScaledTemplate::build(template, scale_pct)?;
            score_scale(canvas, &scaled, params)
        })
        .collect();

    let mut best = BestMatch::new();
    for (scale_pct, result) in scales.into_iter().zip(results) {
        record(&mut best, result?, scale_pct);
    }
    Ok(best)
}
