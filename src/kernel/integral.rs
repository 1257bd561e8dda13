//! Summed-area tables for window intensity statistics.

use crate::ImageView;

/// Integral images of intensity and squared intensity.
///
/// Both tables have one extra leading row and column of zeros, so the sum
/// over any window is four lookups.
pub(crate) struct WindowStats {
    stride: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl WindowStats {
    pub(crate) fn from_view(image: ImageView<'_, u8>) -> Option<Self> {
        let width = image.width();
        let height = image.height();
        let stride = width + 1;
        let len = stride * (height + 1);
        let mut sum = vec![0u64; len];
        let mut sum_sq = vec![0u64; len];
        for y in 0..height {
            let row = image.row(y)?;
            let mut run = 0u64;
            let mut run_sq = 0u64;
            for (x, &value) in row.iter().enumerate() {
                let value = u64::from(value);
                run += value;
                run_sq += value * value;
                let idx = (y + 1) * stride + x + 1;
                sum[idx] = sum[idx - stride] + run;
                sum_sq[idx] = sum_sq[idx - stride] + run_sq;
            }
        }
        Some(Self {
            stride,
            sum,
            sum_sq,
        })
    }

    fn region(&self, table: &[u64], x: usize, y: usize, width: usize, height: usize) -> u64 {
        let top = y * self.stride;
        let bottom = (y + height) * self.stride;
        table[bottom + x + width] + table[top + x] - table[top + x + width] - table[bottom + x]
    }

    /// `(sum_i, sum_i2)` over the window; caller guarantees it is in bounds.
    pub(crate) fn window(&self, x: usize, y: usize, width: usize, height: usize) -> (f64, f64) {
        (
            self.region(&self.sum, x, y, width, height) as f64,
            self.region(&self.sum_sq, x, y, width, height) as f64,
        )
    }
}
