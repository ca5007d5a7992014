//! Declarative descriptions of filters and reverbs.
//!
//! Patches are plain data (serialisable with the `serde` feature) that build
//! validated processors for a given sample rate. Building is the only place
//! configuration errors surface.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{
    AllPassDelay, AllPassForm, AllPassStage, CombFilter, Delay, DelayTime, FeedbackLowPass,
    Filter, Interpolation, LowpassFeedbackAllPass, LowpassFeedbackCombFilter, MultiTapDelay,
    SchroederReverb,
};
use crate::error::ConfigError;

/// A delay length given either in milliseconds or in samples.
///
/// A nonzero sample count takes precedence over the millisecond value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DelayPatch {
    #[cfg_attr(feature = "serde", serde(default))]
    pub ms: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub samples: f64,
}

impl DelayPatch {
    pub fn ms(ms: f64) -> Self {
        Self { ms, samples: 0.0 }
    }

    pub fn samples(samples: f64) -> Self {
        Self { ms: 0.0, samples }
    }

    pub fn time(&self) -> DelayTime {
        if self.samples != 0.0 {
            DelayTime::Samples(self.samples)
        } else {
            DelayTime::Millis(self.ms)
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllPassStagePatch {
    pub delay: DelayPatch,
    pub coeff: f64,
}

impl AllPassStagePatch {
    pub fn stage(&self) -> AllPassStage {
        AllPassStage {
            delay: self.delay.time(),
            coeff: self.coeff,
        }
    }
}

/// Schroeder reverberator description
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SchroederPatch {
    pub delay: DelayPatch,
    pub gain_1: f64,
    pub gain_2: f64,
    pub all_passes: Vec<AllPassStagePatch>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub form: AllPassForm,
}

impl SchroederPatch {
    /// Five-stage network in the spirit of Schroeder's Fig. 5 tuning:
    /// allpasses at 100, 68, 60, 19.7 and 5.85 ms, all at g = 0.7, inside a
    /// 50 ms loop.
    pub fn natural() -> Self {
        let stage = |ms: f64| AllPassStagePatch {
            delay: DelayPatch::ms(ms),
            coeff: 0.7,
        };

        Self {
            delay: DelayPatch::ms(50.0),
            gain_1: 0.7,
            gain_2: 0.7,
            all_passes: vec![stage(100.0), stage(68.0), stage(60.0), stage(19.7), stage(5.85)],
            form: AllPassForm::Reference,
        }
    }

    pub fn build(&self, sample_rate: u32) -> Result<SchroederReverb, ConfigError> {
        let stages: Vec<AllPassStage> = self.all_passes.iter().map(|s| s.stage()).collect();
        SchroederReverb::with_form(
            sample_rate,
            self.delay.time(),
            self.gain_1,
            self.gain_2,
            &stages,
            self.form,
        )
    }
}

impl Default for SchroederPatch {
    fn default() -> Self {
        Self::natural()
    }
}

/// Any single processor, tagged by `type` when serialised
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPatch {
    Delay {
        taps: Vec<DelayPatch>,
        #[cfg_attr(feature = "serde", serde(default))]
        interpolation: Interpolation,
    },
    Comb {
        delay: DelayPatch,
        coeff: f64,
    },
    AllPass {
        delay: DelayPatch,
        coeff: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        form: AllPassForm,
    },
    FeedbackLowPass {
        damp: f64,
    },
    LowpassFeedbackComb {
        delay: DelayPatch,
        fb_gain: f64,
        damp: f64,
    },
    LowpassFeedbackAllPass {
        delay: DelayPatch,
        fb_gain: f64,
        damp: f64,
    },
    MultiTap {
        taps: Vec<usize>,
    },
    Schroeder(SchroederPatch),
}

impl FilterPatch {
    pub fn build(&self, sample_rate: u32) -> Result<Filter, ConfigError> {
        let line = |delay: &DelayPatch| Delay::new(sample_rate, &[delay.time()], Interpolation::None);

        let filter: Filter = match self {
            FilterPatch::Delay {
                taps,
                interpolation,
            } => {
                let taps: Vec<DelayTime> = taps.iter().map(DelayPatch::time).collect();
                Delay::new(sample_rate, &taps, *interpolation)?.into()
            }
            FilterPatch::Comb { delay, coeff } => CombFilter::new(line(delay)?, *coeff)?.into(),
            FilterPatch::AllPass { delay, coeff, form } => {
                AllPassDelay::with_form(line(delay)?, *coeff, *form)?.into()
            }
            FilterPatch::FeedbackLowPass { damp } => FeedbackLowPass::new(*damp)?.into(),
            FilterPatch::LowpassFeedbackComb {
                delay,
                fb_gain,
                damp,
            } => LowpassFeedbackCombFilter::new(line(delay)?, *fb_gain, *damp)?.into(),
            FilterPatch::LowpassFeedbackAllPass {
                delay,
                fb_gain,
                damp,
            } => LowpassFeedbackAllPass::new(line(delay)?, *fb_gain, *damp)?.into(),
            FilterPatch::MultiTap { taps } => MultiTapDelay::new(taps)?.into(),
            FilterPatch::Schroeder(patch) => patch.build(sample_rate)?.into(),
        };

        log::debug!("patch: built {} filter at {} Hz", filter.kind(), sample_rate);
        Ok(filter)
    }
}
