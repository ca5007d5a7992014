//! Reverb - Schroeder Allpass Network
//!
//! Schroeder's "Natural Sounding Artificial Reverberation" (1962), Fig. 5: a
//! single feedback delay loop whose return path runs through a cascade of
//! allpass sections. The allpasses multiply echo density without colouring the
//! spectrum; the outer loop sustains the tail.
//!
//! # Architecture
//!
//! ```text
//!          ┌──────────────────── g2 ←───────────────────────┐
//!          ↓                                                │
//! x ──┬──→(+)──→ [Delay] ──→ [AP 1] ──→ [AP 2] ─ … ─→ [AP S] ─┴─→ ×(1 - g1²) ──→(+)──→ y
//!     │                                                                         ↑
//!     └────────────────────────────── × -g1 ────────────────────────────────────┘
//! ```
//!
//! ## Per-sample order
//!
//! 1. The main delay takes the input plus `g2` times the *previous* output of
//!    the last allpass.
//! 2. The allpasses tick left to right, each consuming the output its
//!    predecessor produced a moment ago in the same tick.
//! 3. `y = AP_S · (1 - g1²) - x · g1`
//!
//! Swapping steps 1 and 2 changes the loop length and breaks the topology.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::comb::{AllPassDelay, AllPassForm};
use crate::dsp::delay::{Delay, DelayTime};
use crate::dsp::interpolation::Interpolation;
use crate::error::{check_gain, ConfigError};
use crate::processor::Processor;

/// One allpass section of the cascade
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllPassStage {
    pub delay: DelayTime,
    pub coeff: f64,
}

impl AllPassStage {
    pub fn ms(delay_ms: f64, coeff: f64) -> Self {
        Self {
            delay: DelayTime::Millis(delay_ms),
            coeff,
        }
    }
}

/// Schroeder reverberator: one loop delay feeding a fixed allpass cascade
#[derive(Debug)]
pub struct SchroederReverb {
    delay: Delay,
    allpasses: Vec<AllPassDelay>,
    gain_1: f64,
    gain_2: f64,
    output: f64,
}

impl SchroederReverb {
    /// Create a reverb at the given sample rate.
    ///
    /// - `delay`: main loop delay
    /// - `gain_1`: direct/reverberant balance, |g1| < 1
    /// - `gain_2`: loop feedback, |g2| < 1
    /// - `stages`: allpass cascade in signal order (at least one)
    pub fn new(
        sample_rate: u32,
        delay: DelayTime,
        gain_1: f64,
        gain_2: f64,
        stages: &[AllPassStage],
    ) -> Result<Self, ConfigError> {
        Self::with_form(
            sample_rate,
            delay,
            gain_1,
            gain_2,
            stages,
            AllPassForm::default(),
        )
    }

    /// Same as [`new`](Self::new), choosing the recurrence every stage uses.
    pub fn with_form(
        sample_rate: u32,
        delay: DelayTime,
        gain_1: f64,
        gain_2: f64,
        stages: &[AllPassStage],
        form: AllPassForm,
    ) -> Result<Self, ConfigError> {
        if stages.is_empty() {
            return Err(ConfigError::EmptyCascade);
        }
        let gain_1 = check_gain("gain_1", gain_1)?;
        let gain_2 = check_gain("gain_2", gain_2)?;

        let delay = Delay::new(sample_rate, &[delay], Interpolation::None)?;
        let allpasses = stages
            .iter()
            .map(|stage| {
                let line = Delay::new(sample_rate, &[stage.delay], Interpolation::None)?;
                AllPassDelay::with_form(line, stage.coeff, form)
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "schroeder reverb @ {} Hz: loop {:?} samples, {} allpass stage(s), g1 = {}, g2 = {}",
            sample_rate,
            delay.taps(),
            allpasses.len(),
            gain_1,
            gain_2
        );

        Ok(Self {
            delay,
            allpasses,
            gain_1,
            gain_2,
            output: 0.0,
        })
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn gain_1(&self) -> f64 {
        self.gain_1
    }

    pub fn gain_2(&self) -> f64 {
        self.gain_2
    }

    /// Number of allpass stages
    pub fn size(&self) -> usize {
        self.allpasses.len()
    }

    /// Process a single sample through the network
    #[inline]
    pub fn tick(&mut self, input: f64) {
        let feedback = self.last_stage_output();
        self.delay.tick(input + self.gain_2 * feedback);

        let mut signal = self.delay.output();
        for allpass in &mut self.allpasses {
            allpass.tick(signal);
            signal = allpass.output();
        }

        self.output = (signal * (1.0 - self.gain_1 * self.gain_1)) + (input * self.gain_1 * -1.0);
    }

    /// Reset the loop delay, then every stage in cascade order
    pub fn clear(&mut self) {
        self.delay.clear();
        for allpass in &mut self.allpasses {
            allpass.clear();
        }
        self.output = 0.0;
    }

    #[inline]
    fn last_stage_output(&self) -> f64 {
        self.allpasses.last().map_or(0.0, |allpass| allpass.output())
    }
}

impl Processor for SchroederReverb {
    fn tick(&mut self, input: f64) {
        SchroederReverb::tick(self, input)
    }

    fn output(&self) -> f64 {
        self.output
    }

    fn clear(&mut self) {
        SchroederReverb::clear(self)
    }
}
