//! Lowpass-Feedback Comb and Allpass (Moorer)
//!
//! Moorer's refinement of the Schroeder sections puts a damping lowpass in the
//! feedback loop, so every recirculation loses a little more high-frequency
//! energy, the way real wall reflections do:
//!
//! ```text
//! x ──(+)──→ [Delay] ──┬──→ y
//!      ↑               │
//!      └── g ← [LPF] ←─┘
//! ```
//!
//! The two variants tap the lowpass from different points. The comb drives it
//! with its own output (the delay's pre-update value); the allpass drives it
//! with the delay output already scaled by the feedback gain, so the allpass
//! loop effectively recirculates with `g²`. Both wirings are kept exactly as
//! they are tuned.

use crate::dsp::delay::Delay;
use crate::dsp::lowpass::FeedbackLowPass;
use crate::error::{check_gain, ConfigError};
use crate::processor::Processor;

#[derive(Debug)]
pub struct LowpassFeedbackCombFilter {
    delay: Delay,
    lowpass: FeedbackLowPass,
    fb_gain: f64,
    output: f64,
}

impl LowpassFeedbackCombFilter {
    /// - `fb_gain`: feedback gain, |g| < 1
    /// - `damp`: lowpass damping, 0 (bright) to just under 1 (dark)
    pub fn new(delay: Delay, fb_gain: f64, damp: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            delay,
            lowpass: FeedbackLowPass::new(damp)?,
            fb_gain: check_gain("feedback gain", fb_gain)?,
            output: 0.0,
        })
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn fb_gain(&self) -> f64 {
        self.fb_gain
    }

    pub fn damp(&self) -> f64 {
        self.lowpass.damp()
    }

    #[inline]
    pub fn tick(&mut self, input: f64) {
        self.output = self.delay.output();
        let delay_input = input + self.fb_gain * self.lowpass.output();
        self.lowpass.tick(self.output);
        self.delay.tick(delay_input);
    }

    pub fn clear(&mut self) {
        self.delay.clear();
        self.lowpass.clear();
        self.output = 0.0;
    }
}

#[derive(Debug)]
pub struct LowpassFeedbackAllPass {
    delay: Delay,
    lowpass: FeedbackLowPass,
    fb_gain: f64,
    output: f64,
}

impl LowpassFeedbackAllPass {
    pub fn new(delay: Delay, fb_gain: f64, damp: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            delay,
            lowpass: FeedbackLowPass::new(damp)?,
            fb_gain: check_gain("feedback gain", fb_gain)?,
            output: 0.0,
        })
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn fb_gain(&self) -> f64 {
        self.fb_gain
    }

    pub fn damp(&self) -> f64 {
        self.lowpass.damp()
    }

    #[inline]
    pub fn tick(&mut self, input: f64) {
        let delayed = self.delay.output();
        let delay_input = input + self.fb_gain * self.lowpass.output();
        self.output = (-1.0 * self.fb_gain * delay_input)
            + ((1.0 - self.fb_gain * self.fb_gain) * delayed);
        self.lowpass.tick(delayed * self.fb_gain);
        self.delay.tick(delay_input);
    }

    pub fn clear(&mut self) {
        self.delay.clear();
        self.lowpass.clear();
        self.output = 0.0;
    }
}

impl Processor for LowpassFeedbackCombFilter {
    fn tick(&mut self, input: f64) {
        LowpassFeedbackCombFilter::tick(self, input)
    }

    fn output(&self) -> f64 {
        self.output
    }

    fn clear(&mut self) {
        LowpassFeedbackCombFilter::clear(self)
    }
}

impl Processor for LowpassFeedbackAllPass {
    fn tick(&mut self, input: f64) {
        LowpassFeedbackAllPass::tick(self, input)
    }

    fn output(&self) -> f64 {
        self.output
    }

    fn clear(&mut self) {
        LowpassFeedbackAllPass::clear(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{energy, impulse_response};
    use crate::dsp::interpolation::Interpolation;

    fn delay(samples: f64) -> Delay {
        Delay::from_samples(samples, Interpolation::None).unwrap()
    }

    #[test]
    fn undamped_comb_recirculates_through_lowpass_state() {
        // The lowpass output lags one tick, so echoes are tap + 2 apart
        let mut comb = LowpassFeedbackCombFilter::new(delay(3.0), 0.5, 0.0).unwrap();
        let response = impulse_response(&mut comb, 15);

        let mut expected = vec![0.0; 15];
        expected[4] = 1.0;
        expected[9] = 0.5;
        expected[14] = 0.25;
        assert_eq!(response, expected);
    }

    #[test]
    fn undamped_allpass_feeds_back_scaled_delay() {
        let g = 0.5;
        let mut allpass = LowpassFeedbackAllPass::new(delay(3.0), g, 0.0).unwrap();
        let response = impulse_response(&mut allpass, 6);

        assert_eq!(response[0], -0.5);
        assert_eq!(response[1], 0.0);
        assert_eq!(response[4], 0.75);
        assert_eq!(response[5], -0.125);
    }

    #[test]
    fn damping_shortens_the_tail() {
        let mut bright = LowpassFeedbackCombFilter::new(delay(20.0), 0.8, 0.0).unwrap();
        let mut dark = LowpassFeedbackCombFilter::new(delay(20.0), 0.8, 0.7).unwrap();

        let bright_tail = impulse_response(&mut bright, 4000);
        let dark_tail = impulse_response(&mut dark, 4000);

        assert!(energy(&dark_tail[200..]) < energy(&bright_tail[200..]));
        assert!(dark_tail.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn stable_settings_decay_to_silence() {
        let mut allpass = LowpassFeedbackAllPass::new(delay(17.0), 0.9, 0.4).unwrap();
        let response = impulse_response(&mut allpass, 20_000);
        let tail_peak = response[19_000..]
            .iter()
            .fold(0.0_f64, |peak, s| peak.max(s.abs()));
        assert!(tail_peak < 1e-6, "tail peak {tail_peak}");
    }

    #[test]
    fn clear_resets_lowpass_state() {
        let mut comb = LowpassFeedbackCombFilter::new(delay(2.0), 0.7, 0.3).unwrap();
        for _ in 0..50 {
            comb.tick(1.0);
        }
        comb.clear();
        for _ in 0..10 {
            comb.tick(0.0);
            assert_eq!(comb.output(), 0.0);
        }
    }

    #[test]
    fn validates_gain_and_damping() {
        assert!(LowpassFeedbackCombFilter::new(delay(4.0), 1.0, 0.2).is_err());
        assert!(LowpassFeedbackAllPass::new(delay(4.0), 0.5, 1.0).is_err());
    }
}
