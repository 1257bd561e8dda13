//! Matcher configuration.

use crate::annotate::BoxStyle;
use crate::util::{CropMatchError, CropMatchResult};

/// Inclusive, stepped range of template scale percentages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleRange {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl ScaleRange {
    /// Creates a range after checking `0 < start <= end` and `step > 0`.
    pub fn new(start: u32, end: u32, step: u32) -> CropMatchResult<Self> {
        let range = Self { start, end, step };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> CropMatchResult<()> {
        if self.start == 0 {
            return Err(CropMatchError::InvalidConfig("scale start must be positive"));
        }
        if self.step == 0 {
            return Err(CropMatchError::InvalidConfig("scale step must be positive"));
        }
        if self.start > self.end {
            return Err(CropMatchError::InvalidConfig("scale start exceeds end"));
        }
        Ok(())
    }

    /// Scale percentages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> {
        (self.start..=self.end).step_by(self.step.max(1) as usize)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl Default for ScaleRange {
    /// 25%, 30%, ..., 125%.
    fn default() -> Self {
        Self {
            start: 25,
            end: 125,
            step: 5,
        }
    }
}

/// Parameters of a crop match.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchConfig {
    /// Minimum best score for a match; a score equal to it passes.
    pub threshold: f32,
    /// Template scales to sweep.
    pub scales: ScaleRange,
    /// Factor applied to the image before searching.
    pub downsample: f64,
    /// Canvas windows with a sum of squared deviations at or below this are
    /// not scored.
    pub min_var_i: f64,
    /// Outline drawn around an accepted match.
    pub style: BoxStyle,
    /// Score scales on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            scales: ScaleRange::default(),
            downsample: 0.5,
            min_var_i: 1e-3,
            style: BoxStyle::default(),
            parallel: false,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> CropMatchResult<()> {
        if !self.threshold.is_finite() {
            return Err(CropMatchError::InvalidConfig("threshold must be finite"));
        }
        if !self.downsample.is_finite() || self.downsample <= 0.0 {
            return Err(CropMatchError::InvalidConfig(
                "downsample must be a positive finite factor",
            ));
        }
        if !self.min_var_i.is_finite() || self.min_var_i < 0.0 {
            return Err(CropMatchError::InvalidConfig(
                "min_var_i must be finite and non-negative",
            ));
        }
        self.scales.validate()
    }
}
