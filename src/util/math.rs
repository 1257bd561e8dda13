//! Numeric helpers shared by the resampler and the scale sweep.

/// Length of an axis after scaling by `factor`, rounded half to even.
///
/// Never returns zero so a heavily shrunk template still has one pixel.
pub(crate) fn scaled_len(len: u32, factor: f64) -> u32 {
    let scaled = (f64::from(len) * factor).round_ties_even();
    if scaled < 1.0 {
        1
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}

/// Converts an integer percentage to a scale factor.
pub(crate) fn pct_to_factor(pct: u32) -> f64 {
    f64::from(pct) / 100.0
}
