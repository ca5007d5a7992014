//! Benchmarks for the recursive filter family.

use std::hint::black_box;

use algoverb::{
    AllPassDelay, CombFilter, Delay, Filter, Interpolation, LowpassFeedbackAllPass,
    LowpassFeedbackCombFilter, Processor,
};
use criterion::{BenchmarkId, Criterion};

use crate::{test_signal, BLOCK_SIZES};

fn line(samples: f64) -> Delay {
    Delay::from_samples(samples, Interpolation::None).unwrap()
}

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        let filters: Vec<(&str, Filter)> = vec![
            ("comb", CombFilter::new(line(1426.0), 0.84).unwrap().into()),
            ("all_pass", AllPassDelay::new(line(225.0), 0.7).unwrap().into()),
            (
                "lowpass_feedback_comb",
                LowpassFeedbackCombFilter::new(line(1426.0), 0.84, 0.2)
                    .unwrap()
                    .into(),
            ),
            (
                "lowpass_feedback_all_pass",
                LowpassFeedbackAllPass::new(line(225.0), 0.7, 0.2)
                    .unwrap()
                    .into(),
            ),
        ];

        for (name, mut filter) in filters {
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.process_block(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
