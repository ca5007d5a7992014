//! Comb and Allpass Sections
//!
//! Both filters recirculate their delay's previous output through a feedback
//! gain `g`:
//!
//! ```text
//! w[n] = x[n] + g * d[n]          d[n] = delay output before this tick
//! ```
//!
//! The comb emits `d[n]` directly. The allpass mixes the feed-forward path
//! back in so the section keeps the spectrum flat and only smears phase.
//!
//! Loop length is the delay tap plus one sample: the delay itself never
//! passes its input straight through, and `d[n]` is read before the delay
//! ticks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::delay::Delay;
use crate::error::{check_gain, ConfigError};
use crate::processor::Processor;

/// Feedback comb filter
///
/// Energy recirculates scaled by `coeff`; an impulse produces a train of
/// echoes one loop length apart, each `coeff` times the previous one.
#[derive(Debug)]
pub struct CombFilter {
    delay: Delay,
    coeff: f64,
    output: f64,
}

impl CombFilter {
    pub fn new(delay: Delay, coeff: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            delay,
            coeff: check_gain("comb coefficient", coeff)?,
            output: 0.0,
        })
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn coeff(&self) -> f64 {
        self.coeff
    }

    /// Samples between successive echoes
    pub fn loop_length(&self) -> f64 {
        self.delay.taps()[0] + 1.0
    }

    #[inline]
    pub fn tick(&mut self, input: f64) {
        let delay_input = input + self.coeff * self.delay.output();
        self.output = self.delay.output();
        self.delay.tick(delay_input);
    }

    pub fn clear(&mut self) {
        self.delay.clear();
        self.output = 0.0;
    }
}

/// Which allpass recurrence an [`AllPassDelay`] evaluates
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllPassForm {
    /// `y = -g * w[n] + (1 - g²) * d[n]`
    ///
    /// Matches the reference impulse responses sample for sample. Scaling the
    /// feed-forward term by the recirculated input leaves a mild spectral tilt.
    #[default]
    Reference,
    /// `y = -g * x[n] + (1 - g²) * d[n]`
    ///
    /// The textbook Schroeder section, `(z^-M - g) / (1 - g z^-M)`, with
    /// exactly unit magnitude at every frequency.
    Unity,
}

/// Allpass section built on a feedback delay
#[derive(Debug)]
pub struct AllPassDelay {
    delay: Delay,
    coeff: f64,
    form: AllPassForm,
    output: f64,
}

impl AllPassDelay {
    pub fn new(delay: Delay, coeff: f64) -> Result<Self, ConfigError> {
        Self::with_form(delay, coeff, AllPassForm::default())
    }

    pub fn with_form(delay: Delay, coeff: f64, form: AllPassForm) -> Result<Self, ConfigError> {
        Ok(Self {
            delay,
            coeff: check_gain("allpass coefficient", coeff)?,
            form,
            output: 0.0,
        })
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn coeff(&self) -> f64 {
        self.coeff
    }

    pub fn form(&self) -> AllPassForm {
        self.form
    }

    #[inline]
    pub fn tick(&mut self, input: f64) {
        let delayed = self.delay.output();
        let delay_input = input + self.coeff * delayed;
        let feed_forward = match self.form {
            AllPassForm::Reference => delay_input,
            AllPassForm::Unity => input,
        };
        self.output =
            (-1.0 * self.coeff * feed_forward) + ((1.0 - self.coeff * self.coeff) * delayed);
        self.delay.tick(delay_input);
    }

    pub fn clear(&mut self) {
        self.delay.clear();
        self.output = 0.0;
    }
}

impl Processor for CombFilter {
    fn tick(&mut self, input: f64) {
        CombFilter::tick(self, input)
    }

    fn output(&self) -> f64 {
        self.output
    }

    fn clear(&mut self) {
        CombFilter::clear(self)
    }
}

impl Processor for AllPassDelay {
    fn tick(&mut self, input: f64) {
        AllPassDelay::tick(self, input)
    }

    fn output(&self) -> f64 {
        self.output
    }

    fn clear(&mut self) {
        AllPassDelay::clear(self)
    }
}
