use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use triagem::analysis::extract_features;
use triagem::audio::AudioBuffer;

fn sine_buffer(freq: f32, sample_rate: u32, seconds: f32) -> AudioBuffer {
    let len = (sample_rate as f32 * seconds) as usize;
    let samples = (0..len)
        .map(|i| 0.3 * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
        .collect();
    AudioBuffer::new(samples, sample_rate)
}

fn bench_extraction(c: &mut Criterion) {
    let short = sine_buffer(150.0, 16_000, 2.0);
    let long = sine_buffer(150.0, 44_100, 15.0);

    c.bench_function("extract_features_2s_16k", |b| {
        b.iter(|| extract_features(black_box(short.clone())).expect("extract"))
    });
    c.bench_function("extract_features_15s_44k", |b| {
        b.iter(|| extract_features(black_box(long.clone())).expect("extract"))
    });
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);
