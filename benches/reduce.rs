use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};
use lumacast::light_pipeline::{
    Color, ColorReducer, DmxUniverse, RawFrame, ReduceConfig, ReductionStrategy, artnet,
};

fn generate_frame(width: u32, height: u32) -> RawFrame {
    let mut image = RgbImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        *pixel = Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
    }
    RawFrame::new(image)
}

fn benchmark_reduce_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_by_size");

    let sizes = vec![
        (100, 100, "100x100"),
        (800, 800, "800x800"),
        (1920, 1080, "1920x1080"),
    ];

    for (width, height, label) in sizes {
        let frame = generate_frame(width, height);

        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, frame| {
            let reducer = ColorReducer::new(ReduceConfig::default());

            b.iter(|| reducer.reduce(black_box(frame)));
        });
    }

    group.finish();
}

fn benchmark_adjustment_passes(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjustment_passes");
    let frame = generate_frame(800, 800);

    let configs = vec![
        (ReduceConfig::default(), "mean_only"),
        (
            ReduceConfig::builder()
                .brightness_gain(200)
                .saturation_factor(1.2)
                .build()
                .unwrap(),
            "hsv_adjusted",
        ),
        (
            ReduceConfig::builder()
                .pixelation_size(Some(128))
                .build()
                .unwrap(),
            "pixelated",
        ),
        (
            ReduceConfig::builder()
                .brightness_gain(200)
                .pixelation_size(Some(128))
                .build()
                .unwrap(),
            "hsv_and_pixelated",
        ),
    ];

    for (config, label) in configs {
        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, frame| {
            let reducer = ColorReducer::new(config.clone());

            b.iter(|| reducer.reduce(black_box(frame)));
        });
    }

    group.finish();
}

fn benchmark_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduction_strategies");
    let frame = generate_frame(800, 800);

    let strategies = vec![
        (
            ReductionStrategy::GainNormalize {
                gain_r: 1.0,
                gain_g: 0.95,
                gain_b: 0.8,
                normalize: true,
            },
            "gain_normalize",
        ),
        (
            ReductionStrategy::DominantBoost {
                dominant_gain: 1.2,
                base_gain: 0.85,
            },
            "dominant_boost",
        ),
    ];

    for (strategy, label) in strategies {
        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, frame| {
            let config = ReduceConfig::builder().strategy(strategy).build().unwrap();
            let reducer = ColorReducer::new(config);

            b.iter(|| reducer.reduce(black_box(frame)));
        });
    }

    group.finish();
}

fn benchmark_packet_encode(c: &mut Criterion) {
    c.bench_function("encode_art_dmx", |b| {
        let color = Color::new(120, 30, 240);

        b.iter(|| {
            let universe = DmxUniverse::with_rgb(black_box(1), black_box(color)).unwrap();
            artnet::encode(&universe)
        });
    });
}

criterion_group!(
    benches,
    benchmark_reduce_sizes,
    benchmark_adjustment_passes,
    benchmark_strategies,
    benchmark_packet_encode
);
criterion_main!(benches);
