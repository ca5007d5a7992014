//! Delay - Fractional Taps over a Ring Buffer
//!
//! A delay reads one or more taps out of its history, sums them, and only then
//! writes the new input:
//!
//! ```text
//! y[n] = Σ x[n - tap_k]        (tap_k ≥ 1, possibly fractional)
//! ```
//!
//! Reading before writing means the output for a given input is never the
//! input itself; a tap of `T` samples puts an impulse fed at `n = 0` on the
//! output at `n = T`.
//!
//! Fractional taps go through one of the [`Interpolation`] kernels. The buffer
//! keeps two spare slots past the longest tap so the Hermite kernel can always
//! reach its outer neighbours.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::interpolation::{self, Interpolation};
use crate::dsp::ring_buffer::RingBuffer;
use crate::error::ConfigError;
use crate::processor::Processor;

/// Length of a tap, either wall-clock or in samples
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelayTime {
    Millis(f64),
    Samples(f64),
}

impl DelayTime {
    /// Resolve to a (possibly fractional) sample count.
    pub fn in_samples(self, sample_rate: u32) -> f64 {
        match self {
            DelayTime::Millis(ms) => ms * (sample_rate as f64 / 1000.0),
            DelayTime::Samples(samples) => samples,
        }
    }
}

#[derive(Debug)]
pub struct Delay {
    buffer: RingBuffer,
    taps: Vec<f64>,
    interpolation: Interpolation,
    output: f64,
}

impl Delay {
    /// Longest tap accepted, in samples (a little over six minutes at 44.1 kHz)
    pub const MAX_TAP_SAMPLES: f64 = 16_777_216.0;

    /// Build a delay with one or more taps.
    ///
    /// The buffer holds `ceil(longest tap) + 2` samples.
    pub fn new(
        sample_rate: u32,
        taps: &[DelayTime],
        interpolation: Interpolation,
    ) -> Result<Self, ConfigError> {
        if sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if taps.is_empty() {
            return Err(ConfigError::NoTaps);
        }

        let taps = taps
            .iter()
            .map(|time| {
                let tap = time.in_samples(sample_rate);
                if !tap.is_finite() || tap <= 0.0 || tap > Self::MAX_TAP_SAMPLES {
                    return Err(ConfigError::InvalidDelayTime(tap));
                }
                let minimum = interpolation.min_tap();
                if tap < minimum {
                    return Err(ConfigError::TapTooShort { tap, minimum });
                }
                Ok(tap)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let longest = taps.iter().copied().fold(0.0, f64::max);
        let buffer = RingBuffer::new(longest.ceil() as usize + Interpolation::MARGIN)?;

        log::debug!(
            "delay: {} tap(s) {:?} samples, {} interpolation, buffer {} samples",
            taps.len(),
            taps,
            interpolation,
            buffer.len()
        );

        Ok(Self {
            buffer,
            taps,
            interpolation,
            output: 0.0,
        })
    }

    /// Single tap given in milliseconds.
    pub fn from_ms(
        sample_rate: u32,
        delay_ms: f64,
        interpolation: Interpolation,
    ) -> Result<Self, ConfigError> {
        Self::new(sample_rate, &[DelayTime::Millis(delay_ms)], interpolation)
    }

    /// Single tap given directly in samples.
    ///
    /// The sample rate only matters for millisecond taps, so any positive
    /// value works here.
    pub fn from_samples(samples: f64, interpolation: Interpolation) -> Result<Self, ConfigError> {
        Self::new(1, &[DelayTime::Samples(samples)], interpolation)
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Tap positions in samples
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Read every tap, then store `input`.
    #[inline]
    pub fn tick(&mut self, input: f64) {
        let mut sum = 0.0;
        for &tap in &self.taps {
            sum += self.interpolate(tap);
        }
        self.output = sum;
        self.buffer.push(input);
    }

    /// Value `position` samples in the past, relative to the last write.
    ///
    /// `position` must be a validated tap.
    #[inline]
    fn interpolate(&self, position: f64) -> f64 {
        let floor = position.floor();
        let remainder = position - floor;
        let floor = floor as usize;

        match self.interpolation {
            Interpolation::None => self.buffer.age(position.round() as usize),
            Interpolation::Linear => interpolation::linear(
                remainder,
                self.buffer.age(floor),
                self.buffer.age(floor + 1),
            ),
            Interpolation::Hermite => interpolation::hermite(
                remainder,
                self.buffer.age(floor - 1),
                self.buffer.age(floor),
                self.buffer.age(floor + 1),
                self.buffer.age(floor + 2),
            ),
        }
    }

    /// Flush the line with silence.
    ///
    /// Pushes one more zero than the buffer holds; the extra push only shifts
    /// the write pointer, which reads are relative to anyway.
    pub fn clear(&mut self) {
        for _ in 0..self.buffer.len() + 1 {
            self.buffer.push(0.0);
        }
        self.output = 0.0;
    }
}

impl Processor for Delay {
    fn tick(&mut self, input: f64) {
        Delay::tick(self, input)
    }

    fn output(&self) -> f64 {
        self.output
    }

    fn clear(&mut self) {
        Delay::clear(self)
    }
}
