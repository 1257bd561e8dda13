//! Scalar reference kernels.
//!
//! `ZnccScalar` scores match `TM_CCOEFF_NORMED`: the dot product of the
//! zero-mean template with the window, divided by the product of both
//! standard deviations. Window sums come from summed-area tables and the dot
//! product is accumulated in `f64` because a template at 125% of a full-size
//! crop can span hundreds of thousands of pixels.
//!
//! `FlatScalar` handles constant templates, where ZNCC is undefined: a window
//! scores 1 when it is flat at the template's intensity.

use crate::candidate::topk::{Peak, TopK};
use crate::kernel::integral::WindowStats;
use crate::kernel::{Kernel, ScanParams};
use crate::template::{FlatTemplate, TemplatePlan};
use crate::util::{CropMatchError, CropMatchResult};
use crate::ImageView;

/// Largest gap between window mean and flat template value still counted as equal.
const FLAT_MEAN_TOL: f64 = 0.5;

/// Scalar unmasked ZNCC kernel.
pub struct ZnccScalar;

/// Scalar kernel for constant templates.
pub struct FlatScalar;

/// Sum of the zero-mean template times the window at `(x, y)`.
#[inline]
fn window_dot(image: ImageView<'_, u8>, tpl: &TemplatePlan, x: usize, y: usize) -> Option<f64> {
    let tpl_width = tpl.width();
    let t_prime = tpl.t_prime();
    let mut dot = 0.0f64;
    for ty in 0..tpl.height() {
        let img_row = image.row(y + ty)?.get(x..x + tpl_width)?;
        let tpl_row = &t_prime[ty * tpl_width..(ty + 1) * tpl_width];
        for (&value, &t) in img_row.iter().zip(tpl_row) {
            dot += f64::from(t) * f64::from(value);
        }
    }
    Some(dot)
}

/// `(sum_i, sum_i2)` over one window without a summed-area table.
fn window_moments(
    image: ImageView<'_, u8>,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> Option<(f64, f64)> {
    let mut sum_i = 0.0f64;
    let mut sum_i2 = 0.0f64;
    for ty in 0..height {
        for &value in image.row(y + ty)?.get(x..x + width)? {
            let value = f64::from(value);
            sum_i += value;
            sum_i2 += value * value;
        }
    }
    Some((sum_i, sum_i2))
}

/// Sum of squared deviations of a window with `n` pixels.
#[inline]
fn window_var(moments: (f64, f64), n: f64) -> f64 {
    let (sum_i, sum_i2) = moments;
    sum_i2 - (sum_i * sum_i) / n
}

#[inline]
fn zncc(tpl: &TemplatePlan, dot: f64, moments: (f64, f64), n: f64, min_var_i: f64) -> Option<f32> {
    let var_i = window_var(moments, n);
    if var_i <= min_var_i {
        return None;
    }
    let score = (dot / (tpl.var_t() * var_i).sqrt()) as f32;
    score.is_finite().then_some(score)
}

#[inline]
fn flat_score(tpl: &FlatTemplate, moments: (f64, f64), n: f64, min_var_i: f64) -> Option<f32> {
    if window_var(moments, n) > min_var_i {
        return None;
    }
    let mean = moments.0 / n;
    ((mean - f64::from(tpl.value())).abs() <= FLAT_MEAN_TOL).then_some(1.0)
}

/// Inclusive placement bounds, or an error when the template does not fit.
fn placement_range(
    image: ImageView<'_, u8>,
    width: usize,
    height: usize,
) -> CropMatchResult<(usize, usize)> {
    if !image.fits(width, height) {
        return Err(CropMatchError::InvalidDimensions { width, height });
    }
    Ok((image.width() - width, image.height() - height))
}

fn in_range(image: ImageView<'_, u8>, width: usize, height: usize, x: usize, y: usize) -> bool {
    image.fits(width, height) && x <= image.width() - width && y <= image.height() - height
}

fn stats_for(image: ImageView<'_, u8>) -> CropMatchResult<WindowStats> {
    WindowStats::from_view(image).ok_or(CropMatchError::InvalidDimensions {
        width: image.width(),
        height: image.height(),
    })
}

impl Kernel for ZnccScalar {
    type Plan = TemplatePlan;

    fn score_at(
        image: ImageView<'_, u8>,
        tpl: &Self::Plan,
        x: usize,
        y: usize,
        min_var_i: f64,
    ) -> f32 {
        if !in_range(image, tpl.width(), tpl.height(), x, y) {
            return f32::NEG_INFINITY;
        }
        let n = (tpl.width() * tpl.height()) as f64;
        window_dot(image, tpl, x, y)
            .zip(window_moments(image, x, y, tpl.width(), tpl.height()))
            .and_then(|(dot, moments)| zncc(tpl, dot, moments, n, min_var_i))
            .unwrap_or(f32::NEG_INFINITY)
    }

    fn scan_full(
        image: ImageView<'_, u8>,
        tpl: &Self::Plan,
        params: ScanParams,
    ) -> CropMatchResult<Vec<Peak>> {
        if params.topk == 0 {
            return Ok(Vec::new());
        }
        let (max_x, max_y) = placement_range(image, tpl.width(), tpl.height())?;
        let stats = stats_for(image)?;
        let n = (tpl.width() * tpl.height()) as f64;

        let mut topk_buf = TopK::new(params.topk);
        for y in 0..=max_y {
            for x in 0..=max_x {
                let moments = stats.window(x, y, tpl.width(), tpl.height());
                // Flat windows never score, so skip the dot product for them.
                if window_var(moments, n) <= params.min_var_i {
                    continue;
                }
                let Some(dot) = window_dot(image, tpl, x, y) else {
                    continue;
                };
                let Some(score) = zncc(tpl, dot, moments, n, params.min_var_i) else {
                    continue;
                };
                if score >= params.min_score {
                    topk_buf.push(Peak { x, y, score });
                }
            }
        }

        Ok(topk_buf.into_sorted_desc())
    }
}

impl Kernel for FlatScalar {
    type Plan = FlatTemplate;

    fn score_at(
        image: ImageView<'_, u8>,
        tpl: &Self::Plan,
        x: usize,
        y: usize,
        min_var_i: f64,
    ) -> f32 {
        if !in_range(image, tpl.width(), tpl.height(), x, y) {
            return f32::NEG_INFINITY;
        }
        let n = (tpl.width() * tpl.height()) as f64;
        window_moments(image, x, y, tpl.width(), tpl.height())
            .and_then(|moments| flat_score(tpl, moments, n, min_var_i))
            .unwrap_or(f32::NEG_INFINITY)
    }

    fn scan_full(
        image: ImageView<'_, u8>,
        tpl: &Self::Plan,
        params: ScanParams,
    ) -> CropMatchResult<Vec<Peak>> {
        if params.topk == 0 {
            return Ok(Vec::new());
        }
        let (max_x, max_y) = placement_range(image, tpl.width(), tpl.height())?;
        let stats = stats_for(image)?;
        let n = (tpl.width() * tpl.height()) as f64;

        let mut topk_buf = TopK::new(params.topk);
        for y in 0..=max_y {
            for x in 0..=max_x {
                let moments = stats.window(x, y, tpl.width(), tpl.height());
                let Some(score) = flat_score(tpl, moments, n, params.min_var_i) else {
                    continue;
                };
                if score >= params.min_score {
                    topk_buf.push(Peak { x, y, score });
                }
            }
        }

        Ok(topk_buf.into_sorted_desc())
    }
}
