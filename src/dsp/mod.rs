//! Sample-by-sample DSP primitives for algorithmic reverberation.
//!
//! Every component owns its buffers outright, allocates only at construction
//! and runs `tick` in bounded time, so instances can be embedded directly in a
//! processing loop. Data only flows downward: a component reads the previous
//! `output` of the parts it owns, ticks each of them once, and exposes one new
//! sample.

/// Feedback comb and allpass sections.
pub mod comb;
/// Fractional multi-tap delay.
pub mod delay;
/// Interpolation kernels for fractional reads.
pub mod interpolation;
/// Damping lowpass used inside feedback loops.
pub mod lowpass;
/// Comb/allpass with a lowpass in the loop (Moorer).
pub mod moorer;
/// Whole-sample averaging multi-tap delay.
pub mod multitap;
/// Schroeder allpass reverberator.
pub mod reverb;
/// Circular sample storage with oldest/newest addressing.
pub mod ring_buffer;

pub use comb::{AllPassDelay, AllPassForm, CombFilter};
pub use delay::{Delay, DelayTime};
pub use interpolation::Interpolation;
pub use lowpass::FeedbackLowPass;
pub use moorer::{LowpassFeedbackAllPass, LowpassFeedbackCombFilter};
pub use multitap::MultiTapDelay;
pub use reverb::{AllPassStage, SchroederReverb};
pub use ring_buffer::RingBuffer;

use crate::processor::Processor;

/*
| variant        | owns                      | feedback law              |
| -------------- | ------------------------- | ------------------------- |
| Delay          | RingBuffer                | none                      |
| Comb           | Delay                     | g · d                     |
| AllPass        | Delay                     | g · d, feed-forward −g    |
| LowPass        | 1-sample Delay            | damp · d                  |
| MoorerComb     | Delay + LowPass           | g · LPF(y)                |
| MoorerAllPass  | Delay + LowPass           | g · LPF(g · d)            |
| MultiTap       | RingBuffer                | none                      |
| Schroeder      | Delay + AllPass cascade   | g2 · AP_S                 |
*/

/// Closed set of every processor in this module
///
/// Lets heterogeneous chains and configuration-built filters dispatch without
/// boxing.
#[derive(Debug)]
pub enum Filter {
    Delay(Delay),
    Comb(CombFilter),
    AllPass(AllPassDelay),
    LowPass(FeedbackLowPass),
    MoorerComb(LowpassFeedbackCombFilter),
    MoorerAllPass(LowpassFeedbackAllPass),
    MultiTap(MultiTapDelay),
    Schroeder(SchroederReverb),
}

impl Filter {
    /// Short name of the variant, as logged when a patch is built
    pub fn kind(&self) -> &'static str {
        match self {
            Filter::Delay(_) => "delay",
            Filter::Comb(_) => "comb",
            Filter::AllPass(_) => "all_pass",
            Filter::LowPass(_) => "feedback_low_pass",
            Filter::MoorerComb(_) => "lowpass_feedback_comb",
            Filter::MoorerAllPass(_) => "lowpass_feedback_all_pass",
            Filter::MultiTap(_) => "multi_tap",
            Filter::Schroeder(_) => "schroeder",
        }
    }
}

impl Processor for Filter {
    fn tick(&mut self, input: f64) {
        match self {
            Filter::Delay(f) => f.tick(input),
            Filter::Comb(f) => f.tick(input),
            Filter::AllPass(f) => f.tick(input),
            Filter::LowPass(f) => f.tick(input),
            Filter::MoorerComb(f) => f.tick(input),
            Filter::MoorerAllPass(f) => f.tick(input),
            Filter::MultiTap(f) => f.tick(input),
            Filter::Schroeder(f) => f.tick(input),
        }
    }

    fn output(&self) -> f64 {
        match self {
            Filter::Delay(f) => f.output(),
            Filter::Comb(f) => f.output(),
            Filter::AllPass(f) => f.output(),
            Filter::LowPass(f) => f.output(),
            Filter::MoorerComb(f) => f.output(),
            Filter::MoorerAllPass(f) => f.output(),
            Filter::MultiTap(f) => f.output(),
            Filter::Schroeder(f) => f.output(),
        }
    }

    fn clear(&mut self) {
        match self {
            Filter::Delay(f) => f.clear(),
            Filter::Comb(f) => f.clear(),
            Filter::AllPass(f) => f.clear(),
            Filter::LowPass(f) => f.clear(),
            Filter::MoorerComb(f) => f.clear(),
            Filter::MoorerAllPass(f) => f.clear(),
            Filter::MultiTap(f) => f.clear(),
            Filter::Schroeder(f) => f.clear(),
        }
    }
}

macro_rules! impl_from_filter {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Filter {
                fn from(filter: $ty) -> Self {
                    Filter::$variant(filter)
                }
            }
        )*
    };
}

impl_from_filter! {
    Delay => Delay,
    Comb => CombFilter,
    AllPass => AllPassDelay,
    LowPass => FeedbackLowPass,
    MoorerComb => LowpassFeedbackCombFilter,
    MoorerAllPass => LowpassFeedbackAllPass,
    MultiTap => MultiTapDelay,
    Schroeder => SchroederReverb,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::impulse_response;

    #[test]
    fn dispatches_to_wrapped_processor() {
        let comb = CombFilter::new(Delay::from_samples(3.0, Interpolation::None).unwrap(), 0.5)
            .unwrap();
        let mut direct = CombFilter::new(Delay::from_samples(3.0, Interpolation::None).unwrap(), 0.5)
            .unwrap();
        let mut wrapped = Filter::from(comb);

        assert_eq!(wrapped.kind(), "comb");
        assert_eq!(
            impulse_response(&mut wrapped, 32),
            impulse_response(&mut direct, 32)
        );
    }

    #[test]
    fn chain_of_filters_ticks_in_order() {
        let mut chain: Vec<Filter> = vec![
            Delay::from_samples(2.0, Interpolation::None).unwrap().into(),
            MultiTapDelay::new(&[1, 3]).unwrap().into(),
        ];

        let mut response = Vec::new();
        for n in 0..8 {
            let mut signal = if n == 0 { 1.0 } else { 0.0 };
            for filter in &mut chain {
                filter.tick(signal);
                signal = filter.output();
            }
            response.push(signal);
        }
        assert_eq!(response, vec![0.0, 0.0, 0.0, 0.5, 0.0, 0.5, 0.0, 0.0]);
    }
}
