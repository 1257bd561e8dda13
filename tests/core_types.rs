use cropmatch::{
    CropMatchError, ImageView, MatchConfig, Matcher, OwnedImage, ScaleRange, ScaledTemplate,
    TemplatePlan,
};
use image::{Rgb, RgbImage};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        CropMatchError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        CropMatchError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, CropMatchError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn template_plan_matches_known_stats() {
    let tpl = OwnedImage::new(vec![0u8, 1, 2, 3], 2, 2).unwrap();
    let plan = TemplatePlan::from_view(tpl.view()).unwrap();

    assert_eq!(plan.width(), 2);
    assert_eq!(plan.height(), 2);
    assert!((plan.mean() - 1.5).abs() < 1e-6);
    assert!((plan.var_t() - 5.0).abs() < 1e-9);

    let expected = [-1.5f32, -0.5, 0.5, 1.5];
    for (value, expected) in plan.t_prime().iter().zip(expected.iter()) {
        assert!((value - expected).abs() < 1e-6);
    }
}

#[test]
fn template_plan_rejects_degenerate_templates() {
    let tpl = OwnedImage::new(vec![5u8; 4], 2, 2).unwrap();
    let err = TemplatePlan::from_view(tpl.view()).err().unwrap();
    assert_eq!(
        err,
        CropMatchError::DegenerateTemplate {
            reason: "zero variance",
        }
    );
}

#[test]
fn scaled_template_sizes_follow_rounding() {
    let tpl = RgbImage::from_fn(200, 150, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]));
    let sizes: Vec<(usize, usize)> = [25, 50, 100, 125]
        .iter()
        .map(|&pct| {
            let scaled = ScaledTemplate::build(&tpl, pct).unwrap();
            (scaled.width(), scaled.height())
        })
        .collect();
    assert_eq!(sizes, vec![(50, 38), (100, 75), (200, 150), (250, 188)]);
}

#[test]
fn matcher_rejects_invalid_config() {
    let cfg = MatchConfig {
        threshold: f32::NAN,
        ..MatchConfig::default()
    };
    assert_eq!(
        Matcher::new(cfg).unwrap_err(),
        CropMatchError::InvalidConfig("threshold must be finite")
    );

    let cfg = MatchConfig {
        scales: ScaleRange {
            start: 25,
            end: 125,
            step: 0,
        },
        ..MatchConfig::default()
    };
    assert!(Matcher::new(cfg).is_err());
}

#[test]
fn error_messages_are_readable() {
    let err = CropMatchError::InvalidDimensions {
        width: 0,
        height: 3,
    };
    assert_eq!(err.to_string(), "invalid dimensions 0x3");
    let err = CropMatchError::InvalidConfig("scale step must be positive");
    assert_eq!(err.to_string(), "invalid config: scale step must be positive");
}
