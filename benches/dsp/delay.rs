//! Benchmarks for delay line operations.

use std::hint::black_box;

use algoverb::{Delay, Interpolation, MultiTapDelay, Processor};
use criterion::{BenchmarkId, Criterion};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    let modes = [
        ("none", Interpolation::None),
        ("linear", Interpolation::Linear),
        ("hermite", Interpolation::Hermite),
    ];

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        // 10ms at 48kHz, fractional so every kernel does real work
        for (name, mode) in modes {
            let mut delay = Delay::from_samples(480.37, mode).unwrap();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    let mut sum = 0.0f64;
                    for &sample in &input {
                        delay.tick(black_box(sample));
                        sum += delay.output();
                    }
                    sum
                })
            });
        }

        let mut multitap = MultiTapDelay::new(&[199, 337, 541, 743, 1013, 1409]).unwrap();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("multi_tap_6", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                multitap.process_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
