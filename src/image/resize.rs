//! Bilinear resampling of RGB buffers.

use crate::util::math::scaled_len;
use ::image::RgbImage;

/// Source tap pair and the weight of the second tap for one output index.
#[derive(Clone, Copy, Debug)]
struct Tap {
    lo: usize,
    hi: usize,
    frac: f32,
}

fn axis_taps(src_len: u32, dst_len: u32, factor: f64) -> Vec<Tap> {
    let max = src_len as usize - 1;
    let inv = 1.0 / factor;
    (0..dst_len)
        .map(|d| {
            let s = ((f64::from(d) + 0.5) * inv - 0.5).max(0.0);
            let lo = (s.floor() as usize).min(max);
            let hi = (lo + 1).min(max);
            let frac = if lo == hi { 0.0 } else { (s - lo as f64) as f32 };
            Tap { lo, hi, frac }
        })
        .collect()
}

/// Resizes `src` by `factor` on both axes with bilinear interpolation.
///
/// Output pixel centres map back to `(d + 0.5) / factor - 0.5` in the source
/// and taps are clamped at the border. At `factor == 0.5` every output pixel
/// is the rounded mean of a 2x2 source block. Each output side is
/// `round(side * factor)`, never less than one pixel. An empty source yields
/// an empty buffer.
pub fn resize_bilinear(src: &RgbImage, factor: f64) -> RgbImage {
    if src.width() == 0 || src.height() == 0 {
        return RgbImage::new(0, 0);
    }
    let dst_width = scaled_len(src.width(), factor);
    let dst_height = scaled_len(src.height(), factor);
    if dst_width == src.width() && dst_height == src.height() {
        return src.clone();
    }

    let xs = axis_taps(src.width(), dst_width, factor);
    let ys = axis_taps(src.height(), dst_height, factor);
    let src_stride = src.width() as usize * 3;
    let raw = src.as_raw();
    let mut out = Vec::with_capacity(xs.len() * ys.len() * 3);

    for ty in &ys {
        let row0 = &raw[ty.lo * src_stride..(ty.lo + 1) * src_stride];
        let row1 = &raw[ty.hi * src_stride..(ty.hi + 1) * src_stride];
        let fy = ty.frac;
        for tx in &xs {
            let fx = tx.frac;
            let w00 = (1.0 - fx) * (1.0 - fy);
            let w10 = fx * (1.0 - fy);
            let w01 = (1.0 - fx) * fy;
            let w11 = fx * fy;
            for c in 0..3 {
                let a = f32::from(row0[tx.lo * 3 + c]);
                let b = f32::from(row0[tx.hi * 3 + c]);
                let d = f32::from(row1[tx.lo * 3 + c]);
                let e = f32::from(row1[tx.hi * 3 + c]);
                let value = a * w00 + b * w10 + d * w01 + e * w11;
                out.push(value.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    RgbImage::from_raw(dst_width, dst_height, out).unwrap_or_else(|| RgbImage::new(0, 0))
}

#[cfg(test)]
mod tests {
    use super::resize_bilinear;
    use ::image::{Rgb, RgbImage};

    #[test]
    fn half_scale_is_two_by_two_mean() {
        let src = RgbImage::from_fn(4, 2, |x, y| {
            let v = (x * 10 + y * 40) as u8;
            Rgb([v, v / 2, 255 - v])
        });
        let out = resize_bilinear(&src, 0.5);
        assert_eq!(out.dimensions(), (2, 1));
        // block (0..2, 0..2): 0, 10, 40, 50 -> 25
        assert_eq!(out.get_pixel(0, 0)[0], 25);
        // block (2..4, 0..2): 20, 30, 60, 70 -> 45
        assert_eq!(out.get_pixel(1, 0)[0], 45);
        assert_eq!(out.get_pixel(1, 0)[2], 210);
    }

    #[test]
    fn half_scale_of_even_offset_crop_matches_canvas_region() {
        let src = RgbImage::from_fn(16, 12, |x, y| {
            Rgb([((x * 13) ^ (y * 7)) as u8, (x * y) as u8, (x + y) as u8])
        });
        let crop = ::image::imageops::crop_imm(&src, 4, 2, 8, 6).to_image();
        let canvas = resize_bilinear(&src, 0.5);
        let small = resize_bilinear(&crop, 0.5);
        for y in 0..small.height() {
            for x in 0..small.width() {
                assert_eq!(small.get_pixel(x, y), canvas.get_pixel(x + 2, y + 1));
            }
        }
    }

    #[test]
    fn upscale_preserves_flat_color() {
        let src = RgbImage::from_pixel(3, 3, Rgb([12, 200, 77]));
        let out = resize_bilinear(&src, 1.25);
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.pixels().all(|p| *p == Rgb([12, 200, 77])));
    }

    #[test]
    fn tiny_factor_keeps_one_pixel() {
        let src = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        let out = resize_bilinear(&src, 0.1);
        assert_eq!(out.dimensions(), (1, 1));
    }

    #[test]
    fn unit_factor_returns_copy() {
        let src = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 9]));
        assert_eq!(resize_bilinear(&src, 1.0), src);
    }
}
