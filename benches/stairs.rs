use criterion::{black_box, criterion_group, criterion_main, Criterion};

use plot_items::basics::collect_vertices;
use plot_items::histogram::{histogram_value, HistogramType};
use plot_items::image::ImageData;
use plot_items::profile::{compute_profiles, ProfileMethod, ProfileOptions, ProfileRoi};
use plot_items::stair_path::StairPath;
use plot_items::PointD;

fn make_series(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x = (0..n).map(|i| i as f64 * 0.5).collect();
    let y = (0..n).map(|i| ((i as f64) * 0.1).sin()).collect();
    (x, y)
}

fn bench_histogram(c: &mut Criterion) {
    let (x, y) = make_series(10_000);
    c.bench_function("histogram_center_10k", |b| {
        b.iter(|| {
            let steps = histogram_value(black_box(&x), black_box(&y), HistogramType::Center)
                .expect("fixture lengths match");
            black_box(steps)
        })
    });
}

fn bench_stair_path(c: &mut Criterion) {
    let (x, y) = make_series(10_000);
    let steps = histogram_value(&x, &y, HistogramType::Left).expect("fixture lengths match");
    c.bench_function("stair_path_filled_10k", |b| {
        b.iter(|| {
            let mut path = StairPath::with_baseline(steps.clone(), 0.0);
            black_box(collect_vertices(&mut path))
        })
    });
}

fn bench_line_profile(c: &mut Criterion) {
    let (w, h) = (512, 512);
    let data = (0..w * h).map(|i| (i % 251) as f64).collect();
    let image = ImageData::new(w, h, data).expect("fixture shape is consistent");
    let roi = ProfileRoi::Line {
        start: PointD::new(10.0, 20.0),
        end: PointD::new(500.0, 480.0),
    };
    let opts = ProfileOptions {
        method: ProfileMethod::Mean,
        line_width: 5,
    };
    c.bench_function("line_profile_512_w5", |b| {
        b.iter(|| black_box(compute_profiles(black_box(&roi), &image, &opts)))
    });
}

criterion_group!(stairs, bench_histogram, bench_stair_path, bench_line_profile);
criterion_main!(stairs);
