//! Criterion benchmarks for the skew search.
//!
//! Uses the 400x700 synthetic page of the scenario tests: a centered black
//! block rotated by -1.4 degrees, searched over +/-2 degrees in 0.2 steps.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use scanfix_core::{
    apply_rotation, deskew, rotated_size, DecodedImage, InterpolationFilter, Raster, ScanConfig, SearchStrategy,
    SkewSearchConfig,
};

const WHITE: [u8; 3] = [255, 255, 255];

fn skewed_page() -> DecodedImage {
    let mut page = DecodedImage::filled(400, 700, WHITE);
    page.fill_rect(50, 50, 350, 650, [0, 0, 0]);
    apply_rotation(&page, -1.4, WHITE, InterpolationFilter::Bicubic)
}

fn config(strategy: SearchStrategy) -> SkewSearchConfig {
    SkewSearchConfig {
        max_rotation: 2.0,
        incr_step: 0.2,
        scan: ScanConfig {
            threshold: 220,
            ..Default::default()
        },
        strategy,
    }
}

fn bench_skew_search(c: &mut Criterion) {
    let raster = Raster::luminance(&skewed_page());

    c.bench_function("deskew hill climb (400x700)", |b| {
        b.iter(|| deskew(black_box(&raster), &config(SearchStrategy::HillClimb)));
    });

    c.bench_function("deskew exhaustive (400x700)", |b| {
        b.iter(|| deskew(black_box(&raster), &config(SearchStrategy::Exhaustive)));
    });
}

fn bench_rotation(c: &mut Criterion) {
    let page = skewed_page();

    c.bench_function("rotate page bicubic (400x700)", |b| {
        b.iter(|| apply_rotation(black_box(&page), 1.4, WHITE, InterpolationFilter::Bicubic));
    });

    c.bench_function("rotate page bilinear (400x700)", |b| {
        b.iter(|| apply_rotation(black_box(&page), 1.4, WHITE, InterpolationFilter::Bilinear));
    });

    c.bench_function("rotated_size", |b| {
        b.iter(|| rotated_size(black_box(400), black_box(700), black_box(1.4)));
    });
}

criterion_group!(benches, bench_skew_search, bench_rotation);
criterion_main!(benches);
