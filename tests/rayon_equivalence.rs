#![cfg(feature = "rayon")]

use cropmatch::image::resize_bilinear;
use cropmatch::{select_orientation, MatchConfig, Matcher};
use image::imageops::crop_imm;
use image::{Rgb, RgbImage};

fn make_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 11) ^ (y * 3) ^ (x * y)) as u8,
            ((x * 7 + y * 5) ^ (x / 3)) as u8,
            ((x * x + y * y) / 7) as u8,
        ])
    })
}

fn matchers() -> (Matcher, Matcher) {
    let sequential = Matcher::default();
    let parallel = Matcher::new(MatchConfig {
        parallel: true,
        ..MatchConfig::default()
    })
    .unwrap();
    (sequential, parallel)
}

#[test]
fn parallel_matches_sequential_on_native_crop() {
    let image = make_image(140, 100);
    let template = crop_imm(&image, 30, 20, 44, 32).to_image();
    let pair = select_orientation(&image, &template).unwrap();
    let (sequential, parallel) = matchers();

    assert_eq!(
        sequential.best_match(pair).unwrap(),
        parallel.best_match(pair).unwrap()
    );
}

#[test]
fn parallel_matches_sequential_on_rescaled_crop() {
    let image = make_image(140, 100);
    let template = resize_bilinear(&crop_imm(&image, 30, 20, 44, 32).to_image(), 1.1);
    let pair = select_orientation(&image, &template).unwrap();
    let (sequential, parallel) = matchers();

    assert_eq!(
        sequential.best_match(pair).unwrap(),
        parallel.best_match(pair).unwrap()
    );
}

#[test]
fn parallel_stops_at_same_scale_when_template_outgrows_canvas() {
    let image = make_image(80, 80);
    let template = crop_imm(&image, 0, 0, 76, 76).to_image();
    let pair = select_orientation(&image, &template).unwrap();
    let (sequential, parallel) = matchers();

    let seq = sequential.best_match(pair).unwrap();
    let par = parallel.best_match(pair).unwrap();
    assert_eq!(seq, par);
    assert!(seq.scale_pct.unwrap() <= 50);
}
