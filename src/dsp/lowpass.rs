use crate::dsp::delay::Delay;
use crate::dsp::interpolation::Interpolation;
use crate::error::{check_damping, ConfigError};
use crate::processor::Processor;

/// Damping lowpass for feedback paths.
///
/// ```text
/// y[n] = damp * d[n] + (1 - damp) * x[n]      d = single-sample delay of y
/// ```
///
/// `d[n]` is the delay's output from the previous tick, so the recursion
/// reaches back two samples and the poles sit at `±sqrt(damp)`. DC passes at
/// unity gain, the band around a quarter of the sample rate is cut by
/// `(1 - damp) / (1 + damp)`.
#[derive(Debug)]
pub struct FeedbackLowPass {
    delay: Delay,
    damp: f64,
    output: f64,
}

impl FeedbackLowPass {
    pub fn new(damp: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            delay: Delay::from_samples(1.0, Interpolation::None)?,
            damp: check_damping(damp)?,
            output: 0.0,
        })
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn damp(&self) -> f64 {
        self.damp
    }

    #[inline]
    pub fn tick(&mut self, input: f64) {
        self.output = self.damp * self.delay.output() + (1.0 - self.damp) * input;
        self.delay.tick(self.output);
    }

    pub fn clear(&mut self) {
        self.delay.clear();
        self.output = 0.0;
    }
}

impl Processor for FeedbackLowPass {
    fn tick(&mut self, input: f64) {
        FeedbackLowPass::tick(self, input)
    }

    fn output(&self) -> f64 {
        self.output
    }

    fn clear(&mut self) {
        FeedbackLowPass::clear(self)
    }
}
