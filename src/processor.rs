/// One tick's worth of output.
///
/// Mono processors produce a single value; stereo processors produce a
/// left/right pair. The driving loop checks [`Processor::is_stereo`] to decide
/// how many channels to collect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    Mono(f64),
    Stereo([f64; 2]),
}

impl Frame {
    /// Number of channels carried by this frame
    pub fn channels(&self) -> usize {
        match self {
            Frame::Mono(_) => 1,
            Frame::Stereo(_) => 2,
        }
    }
}

/// Core trait for sample-by-sample processors
///
/// `tick` must be called exactly once per input sample, in time order. The
/// result is then read with `output` (or `frame` for stereo-aware drivers)
/// before the next call.
pub trait Processor: Send {
    fn tick(&mut self, input: f64);

    fn output(&self) -> f64;

    /// Reset all internal state to silence.
    ///
    /// Safe to call at any time, including before the first tick.
    fn clear(&mut self);

    /// Whether `frame` yields a channel pair instead of a single value
    ///
    /// Default implementation reports mono.
    fn is_stereo(&self) -> bool {
        false
    }

    fn frame(&self) -> Frame {
        Frame::Mono(self.output())
    }

    /// Run a block of samples in place, replacing each input with the output
    fn process_block(&mut self, block: &mut [f64]) {
        for sample in block.iter_mut() {
            self.tick(*sample);
            *sample = self.output();
        }
    }
}

/// Allow boxed processors to be used as processors (for dynamic dispatch)
impl Processor for Box<dyn Processor> {
    fn tick(&mut self, input: f64) {
        (**self).tick(input)
    }

    fn output(&self) -> f64 {
        (**self).output()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn is_stereo(&self) -> bool {
        (**self).is_stereo()
    }

    fn frame(&self) -> Frame {
        (**self).frame()
    }

    fn process_block(&mut self, block: &mut [f64]) {
        (**self).process_block(block)
    }
}
