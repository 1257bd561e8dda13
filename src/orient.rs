//! Orientation selection: which input is the image and which the template.
//!
//! The decision is a pure dimension-containment test. Pixel content is never
//! inspected and rescaling is not considered.

use ::image::RgbImage;

/// An (image, template) pair where the template fits inside the image.
#[derive(Clone, Copy, Debug)]
pub struct OrientedPair<'a> {
    /// The larger buffer that is searched.
    pub image: &'a RgbImage,
    /// The smaller buffer that is searched for.
    pub template: &'a RgbImage,
    /// True when the second argument became the image.
    pub swapped: bool,
}

/// Orders two buffers into an (image, template) pair.
///
/// `a` is the template when it is no taller and no wider than `b`; `a` is the
/// image when it is strictly taller and strictly wider than `b`. Crossed
/// dimensions yield `None`. Equal dimensions take the first branch.
pub fn select_orientation<'a>(a: &'a RgbImage, b: &'a RgbImage) -> Option<OrientedPair<'a>> {
    let (a_w, a_h) = a.dimensions();
    let (b_w, b_h) = b.dimensions();
    if a_h <= b_h && a_w <= b_w {
        Some(OrientedPair {
            image: b,
            template: a,
            swapped: true,
        })
    } else if a_h > b_h && a_w > b_w {
        Some(OrientedPair {
            image: a,
            template: b,
            swapped: false,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::select_orientation;
    use ::image::RgbImage;

    #[test]
    fn smaller_first_argument_becomes_template() {
        let a = RgbImage::new(20, 10);
        let b = RgbImage::new(40, 30);
        let pair = select_orientation(&a, &b).unwrap();
        assert_eq!(pair.image.dimensions(), (40, 30));
        assert_eq!(pair.template.dimensions(), (20, 10));
        assert!(pair.swapped);
    }

    #[test]
    fn larger_first_argument_becomes_image() {
        let a = RgbImage::new(40, 30);
        let b = RgbImage::new(20, 10);
        let pair = select_orientation(&a, &b).unwrap();
        assert_eq!(pair.image.dimensions(), (40, 30));
        assert!(!pair.swapped);
    }

    #[test]
    fn equal_dimensions_are_containment() {
        let a = RgbImage::new(16, 9);
        let b = RgbImage::new(16, 9);
        let pair = select_orientation(&a, &b).unwrap();
        assert!(std::ptr::eq(pair.image, &b));
        assert!(std::ptr::eq(pair.template, &a));
    }

    #[test]
    fn one_shared_axis_is_containment_only_one_way() {
        let a = RgbImage::new(16, 9);
        let b = RgbImage::new(20, 9);
        assert!(select_orientation(&a, &b).is_some());
        // b is wider but not taller than a, so neither strict branch holds.
        assert!(select_orientation(&b, &a).is_none());
    }

    #[test]
    fn crossed_dimensions_have_no_orientation() {
        let tall = RgbImage::new(10, 50);
        let wide = RgbImage::new(50, 10);
        assert!(select_orientation(&tall, &wide).is_none());
        assert!(select_orientation(&wide, &tall).is_none());
    }
}
