//! Template plan precomputation for ZNCC.

use crate::image::ImageView;
use crate::util::{CropMatchError, CropMatchResult};

/// Minimum sum of squared deviations for a template to be scoreable.
const MIN_TEMPLATE_VAR: f64 = 1e-8;

/// Precomputed zero-mean buffer and energy for a grayscale template.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f32,
    var_t: f64,
    t_prime: Vec<f32>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    ///
    /// Returns `DegenerateTemplate` for a flat template, whose ZNCC against any
    /// window is undefined.
    pub fn from_view(tpl: ImageView<'_, u8>) -> CropMatchResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(CropMatchError::InvalidDimensions { width, height })?;

        let mut sum = 0.0f64;
        for y in 0..height {
            let row = template_row(tpl, y)?;
            sum += row.iter().map(|&v| f64::from(v)).sum::<f64>();
        }
        let mean = sum / count as f64;

        let mut var_t = 0.0f64;
        let mut t_prime = Vec::with_capacity(count);
        for y in 0..height {
            for &value in template_row(tpl, y)? {
                let d = f64::from(value) - mean;
                var_t += d * d;
                t_prime.push(d as f32);
            }
        }
        if var_t <= MIN_TEMPLATE_VAR {
            return Err(CropMatchError::DegenerateTemplate {
                reason: "zero variance",
            });
        }

        Ok(Self {
            width,
            height,
            mean: mean as f32,
            var_t,
            t_prime,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Mean intensity of the template.
    pub fn mean(&self) -> f32 {
        self.mean
    }

    /// Sum of squared deviations from the mean.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }

    /// Zero-mean template in row-major order.
    pub fn t_prime(&self) -> &[f32] {
        &self.t_prime
    }
}

/// A template of one constant intensity.
///
/// ZNCC is undefined for it, so it is matched against windows that are flat
/// at the same intensity instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatTemplate {
    width: usize,
    height: usize,
    value: u8,
}

impl FlatTemplate {
    /// Returns `None` unless every pixel of `tpl` has the same value.
    pub fn from_view(tpl: ImageView<'_, u8>) -> Option<Self> {
        let value = *tpl.get(0, 0)?;
        for y in 0..tpl.height() {
            if tpl.row(y)?.iter().any(|&v| v != value) {
                return None;
            }
        }
        Some(Self {
            width: tpl.width(),
            height: tpl.height(),
            value,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}

fn template_row<'a>(tpl: ImageView<'a, u8>, y: usize) -> CropMatchResult<&'a [u8]> {
    tpl.row(y).ok_or(CropMatchError::InvalidDimensions {
        width: tpl.width(),
        height: tpl.height(),
    })
}
