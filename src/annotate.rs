//! Drawing the match outline onto the canvas.

use ::image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

/// Outline color and stroke width for the match box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxStyle {
    pub color: Rgb<u8>,
    /// Stroke width in pixels, centred on the nominal outline.
    pub thickness: u32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            color: Rgb([255, 0, 0]),
            thickness: 4,
        }
    }
}

/// Draws a hollow rectangle with corners `top_left` and `bottom_right`
/// (both inclusive). Parts falling outside the canvas are clipped.
pub fn draw_box(
    canvas: &mut RgbImage,
    top_left: (u32, u32),
    bottom_right: (u32, u32),
    style: BoxStyle,
) {
    let (x0, y0) = (i64::from(top_left.0), i64::from(top_left.1));
    let (x1, y1) = (i64::from(bottom_right.0), i64::from(bottom_right.1));
    let t = i64::from(style.thickness);
    for k in -(t / 2)..(t - t / 2) {
        let width = x1 - x0 - 2 * k + 1;
        let height = y1 - y0 - 2 * k + 1;
        if width <= 0 || height <= 0 {
            continue;
        }
        let rect = Rect::at((x0 + k) as i32, (y0 + k) as i32).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, rect, style.color);
    }
}

#[cfg(test)]
mod tests {
    use super::{draw_box, BoxStyle};
    use ::image::{Rgb, RgbImage};

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn default_style_is_red_four_pixels() {
        let style = BoxStyle::default();
        assert_eq!(style.color, RED);
        assert_eq!(style.thickness, 4);
    }

    #[test]
    fn outline_spans_four_pixels_around_nominal_edge() {
        let mut canvas = RgbImage::new(30, 30);
        draw_box(&mut canvas, (10, 10), (20, 18), BoxStyle::default());
        for x in 8..=11 {
            assert_eq!(*canvas.get_pixel(x, 14), RED, "left edge at x={x}");
        }
        assert_ne!(*canvas.get_pixel(7, 14), RED);
        assert_ne!(*canvas.get_pixel(12, 14), RED);
        for y in 8..=11 {
            assert_eq!(*canvas.get_pixel(15, y), RED, "top edge at y={y}");
        }
        assert_eq!(*canvas.get_pixel(20, 18), RED);
        assert_ne!(*canvas.get_pixel(15, 14), RED);
    }

    #[test]
    fn outline_touching_border_is_clipped() {
        let mut canvas = RgbImage::new(10, 10);
        draw_box(&mut canvas, (0, 0), (9, 9), BoxStyle::default());
        assert_eq!(*canvas.get_pixel(0, 0), RED);
        assert_eq!(*canvas.get_pixel(9, 5), RED);
        assert_ne!(*canvas.get_pixel(5, 5), RED);
    }

    #[test]
    fn zero_thickness_draws_nothing() {
        let mut canvas = RgbImage::new(8, 8);
        let style = BoxStyle {
            thickness: 0,
            ..BoxStyle::default()
        };
        draw_box(&mut canvas, (1, 1), (6, 6), style);
        assert!(canvas.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
