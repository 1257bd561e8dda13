use cropmatch::kernel::scalar::ZnccScalar;
use cropmatch::{Kernel, Matcher, OwnedImage, ScanParams, TemplatePlan};
use criterion::{criterion_group, criterion_main, Criterion};
use image::imageops::crop_imm;
use image::{Rgb, RgbImage};
use std::hint::black_box;

fn make_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 13) ^ (y * 7) ^ (x * y)) as u8,
            ((x * 5 + y * 3) ^ (y / 2)) as u8,
            ((x + y) * 3) as u8,
        ])
    })
}

fn bench_kernel(c: &mut Criterion) {
    let image = image::imageops::grayscale(&make_image(200, 150));
    let canvas = OwnedImage::new(image.as_raw().clone(), 200, 150).unwrap();
    let patch = crop_imm(&image, 60, 40, 50, 38).to_image();
    let tpl = OwnedImage::new(patch.into_raw(), 50, 38).unwrap();
    let plan = TemplatePlan::from_view(tpl.view()).unwrap();

    c.bench_function("zncc_scan_full_200x150_50x38", |b| {
        b.iter(|| {
            black_box(ZnccScalar::scan_full(canvas.view(), &plan, ScanParams::default()).unwrap())
        });
    });
}

fn bench_sweep(c: &mut Criterion) {
    let image = make_image(320, 240);
    let template = crop_imm(&image, 100, 60, 96, 72).to_image();

    let sequential = Matcher::default();
    c.bench_function("crop_sweep_320x240_sequential", |b| {
        b.iter(|| black_box(sequential.locate(&image, &template).unwrap()));
    });

    #[cfg(feature = "rayon")]
    {
        let parallel = Matcher::new(cropmatch::MatchConfig {
            parallel: true,
            ..cropmatch::MatchConfig::default()
        })
        .unwrap();
        c.bench_function("crop_sweep_320x240_parallel", |b| {
            b.iter(|| black_box(parallel.locate(&image, &template).unwrap()));
        });
    }
}

criterion_group!(benches, bench_kernel, bench_sweep);
criterion_main!(benches);
