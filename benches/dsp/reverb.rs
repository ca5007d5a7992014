//! Benchmarks for reverb processing.

use std::hint::black_box;

use algoverb::{AllPassStage, DelayTime, SchroederPatch, SchroederReverb};
use criterion::{BenchmarkId, Criterion};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    let sample_rate = 48_000;

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        // Five-stage natural preset
        let mut reverb = SchroederPatch::natural().build(sample_rate).unwrap();
        group.bench_with_input(BenchmarkId::new("natural", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f64;
                for &sample in &input {
                    reverb.tick(black_box(sample));
                    sum += reverb.output();
                }
                sum
            })
        });

        // Short two-stage room
        let mut reverb = SchroederReverb::new(
            sample_rate,
            DelayTime::Millis(12.0),
            0.5,
            0.6,
            &[AllPassStage::ms(5.0, 0.7), AllPassStage::ms(1.7, 0.7)],
        )
        .unwrap();
        group.bench_with_input(BenchmarkId::new("small_room", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f64;
                for &sample in &input {
                    reverb.tick(black_box(sample));
                    sum += reverb.output();
                }
                sum
            })
        });

        // Dense twelve-stage cascade
        let stages: Vec<AllPassStage> = (0..12)
            .map(|i| AllPassStage::ms(3.0 + 7.3 * i as f64, 0.65))
            .collect();
        let mut reverb =
            SchroederReverb::new(sample_rate, DelayTime::Millis(80.0), 0.7, 0.75, &stages)
                .unwrap();
        group.bench_with_input(BenchmarkId::new("dense", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f64;
                for &sample in &input {
                    reverb.tick(black_box(sample));
                    sum += reverb.output();
                }
                sum
            })
        });
    }

    group.finish();
}
