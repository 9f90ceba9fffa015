use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use facepic::{
    encode_jpeg, reduce_by_dimensions, reduce_by_quality, to_png_bytes, ReducerConfig,
};
use image::{DynamicImage, Rgb, RgbImage};

fn photo_like(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        let v = ((x * 7 + y * 13) ^ (x * y)) as u8;
        Rgb([v, v.wrapping_add(40), v.wrapping_mul(3)])
    }))
}

fn bench_jpeg_encoding(c: &mut Criterion) {
    let img = photo_like(640, 480);
    let mut group = c.benchmark_group("jpeg_encoding");

    for quality in [100u8, 70, 30] {
        group.bench_with_input(BenchmarkId::new("quality", quality), &quality, |b, &q| {
            b.iter(|| encode_jpeg(black_box(&img), q))
        });
    }

    group.finish();
}

fn bench_quality_reducer(c: &mut Criterion) {
    let img = photo_like(640, 480);
    let full = encode_jpeg(&img, 100).unwrap();
    let target_kb = (full.len() / 1024 / 3).max(1) as u32;
    let mut group = c.benchmark_group("quality_reducer");

    for step in [5u8, 10] {
        let config = ReducerConfig::new(Some(step), Some(5), false).unwrap();
        group.bench_with_input(BenchmarkId::new("step", step), &config, |b, config| {
            b.iter(|| reduce_by_quality(black_box(&img), target_kb, config))
        });
    }

    group.finish();
}

fn bench_thumbnailing(c: &mut Criterion) {
    let mut group = c.benchmark_group("thumbnailing");

    for (width, height) in [(800, 600), (1920, 1080), (4000, 3000)] {
        let img = photo_like(width, height);
        group.bench_with_input(
            BenchmarkId::new("to_540x960", format!("{}x{}", width, height)),
            &img,
            |b, img| b.iter(|| reduce_by_dimensions(img.clone(), 540.0, 960.0)),
        );
    }

    group.finish();
}

fn bench_png_conversion(c: &mut Criterion) {
    let img = photo_like(640, 480);
    c.bench_function("png_conversion", |b| b.iter(|| to_png_bytes(black_box(&img))));
}

criterion_group!(
    benches,
    bench_jpeg_encoding,
    bench_quality_reducer,
    bench_thumbnailing,
    bench_png_conversion
);
criterion_main!(benches);
