//! Correlation kernel implementations.

use crate::candidate::topk::Peak;
use crate::util::CropMatchResult;
use crate::ImageView;

/// Scan configuration for kernel evaluations.
#[derive(Clone, Copy, Debug)]
pub struct ScanParams {
    /// Maximum number of peaks to retain.
    pub topk: usize,
    /// Windows whose sum of squared deviations is at or below this are
    /// treated as flat and skipped.
    pub min_var_i: f64,
    /// Minimum score threshold (discard below this value).
    pub min_score: f32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            topk: 1,
            min_var_i: 1e-3,
            min_score: f32::NEG_INFINITY,
        }
    }
}

/// Kernel trait for scoring and scan operations.
pub trait Kernel {
    type Plan;

    /// Computes the score at a single placement (top-left coordinates).
    ///
    /// Returns `f32::NEG_INFINITY` for placements that do not fit or windows
    /// that are flat.
    fn score_at(
        image: ImageView<'_, u8>,
        plan: &Self::Plan,
        x: usize,
        y: usize,
        min_var_i: f64,
    ) -> f32;

    /// Scans the full valid placement range and returns top-K peaks.
    fn scan_full(
        image: ImageView<'_, u8>,
        plan: &Self::Plan,
        params: ScanParams,
    ) -> CropMatchResult<Vec<Peak>>;
}

pub(crate) mod integral;
pub mod scalar;
