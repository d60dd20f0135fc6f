//! Compositing benchmarks.
//!
//! # Running Benchmarks
//! ```bash
//! cargo bench --package booth-media --bench composite
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use booth_media::{
    build_mask, composite_live_capture, composite_masked, fit_cover, geometry, Frame, OverlayAsset,
};
use booth_models::Viewport;

/// Create a synthetic RGBA frame with some variation.
fn create_test_frame(width: u32, height: u32) -> Frame {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                ((x * 7 + y * 11) % 256) as u8,
                ((x * 13 + y * 17) % 256) as u8,
                ((x * 19 + y * 23) % 256) as u8,
                255,
            ]);
        }
    }
    Frame::new(width, height, data).unwrap()
}

/// An oval-ish contour centered in the frame.
fn oval_polygon(width: u32, height: u32) -> Vec<(f64, f64)> {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let rx = width as f64 * 0.2;
    let ry = height as f64 * 0.3;
    (0..36)
        .map(|i| {
            let angle = i as f64 / 36.0 * std::f64::consts::TAU;
            (cx + rx * angle.cos(), cy + ry * angle.sin())
        })
        .collect()
}

fn bench_build_mask(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_mask");
    let polygon = oval_polygon(640, 480);
    group.throughput(Throughput::Elements(640 * 480));

    for feather in [0u32, 40] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("feather_{feather}")),
            &feather,
            |b, &feather| {
                b.iter(|| build_mask(black_box(&polygon), 640, 480, feather));
            },
        );
    }
    group.finish();
}

fn bench_composite_masked(c: &mut Criterion) {
    let frame = create_test_frame(640, 480);
    let polygon = oval_polygon(640, 480);
    let mask = build_mask(&polygon, 640, 480, 40);
    let bounds = geometry::bounding_box(&polygon, 640, 480);

    c.bench_function("composite_masked_640x480", |b| {
        b.iter(|| composite_masked(black_box(&frame), black_box(&mask), black_box(&bounds)));
    });
}

fn bench_live_capture(c: &mut Criterion) {
    let frame = create_test_frame(1280, 720);
    let viewport = Viewport::new(400, 800);
    let rect = fit_cover(1280, 720, 400, 800).unwrap();

    let overlay_data = vec![128u8; 400 * 800 * 4];
    let overlay = OverlayAsset::from_rgba(400, 800, overlay_data).unwrap();

    c.bench_function("composite_live_capture_720p_to_400x800", |b| {
        b.iter(|| {
            composite_live_capture(
                black_box(&frame),
                rect,
                true,
                black_box(&overlay),
                viewport,
            )
        });
    });
}

criterion_group!(
    benches,
    bench_build_mask,
    bench_composite_masked,
    bench_live_capture
);
criterion_main!(benches);
