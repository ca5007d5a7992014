use crate::dsp::ring_buffer::RingBuffer;
use crate::error::ConfigError;
use crate::processor::Processor;

/// Average of several whole-sample taps.
///
/// Taps are delays in samples (`1..=longest`), read before the input is
/// stored. No interpolation, so the buffer holds exactly the longest tap.
#[derive(Debug)]
pub struct MultiTapDelay {
    buffer: RingBuffer,
    taps: Vec<usize>,
    scale: f64,
    output: f64,
}

impl MultiTapDelay {
    pub fn new(taps: &[usize]) -> Result<Self, ConfigError> {
        if taps.is_empty() {
            return Err(ConfigError::NoTaps);
        }
        if taps.contains(&0) {
            return Err(ConfigError::ZeroTap);
        }

        let longest = taps.iter().copied().max().unwrap_or(1);
        log::debug!("multi-tap delay: taps {:?}, buffer {} samples", taps, longest);

        Ok(Self {
            buffer: RingBuffer::new(longest)?,
            taps: taps.to_vec(),
            scale: 1.0 / taps.len() as f64,
            output: 0.0,
        })
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn taps(&self) -> &[usize] {
        &self.taps
    }

    #[inline]
    pub fn tick(&mut self, input: f64) {
        let mut sum = 0.0;
        for &tap in &self.taps {
            sum += self.buffer.age(tap);
        }
        self.output = self.scale * sum;
        self.buffer.push(input);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.output = 0.0;
    }
}

impl Processor for MultiTapDelay {
    fn tick(&mut self, input: f64) {
        MultiTapDelay::tick(self, input)
    }

    fn output(&self) -> f64 {
        self.output
    }

    fn clear(&mut self) {
        MultiTapDelay::clear(self)
    }
}
