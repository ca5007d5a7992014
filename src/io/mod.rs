// Purpose - in-memory driving loop and sample format conversions

pub mod converter;

pub use converter::{pcm16_to_sample, sample_to_pcm16, PCM16_SCALE};

use crate::processor::{Frame, Processor};

#[derive(Debug, Default)]
pub struct AudioInput {
    pub buffers: Vec<Vec<f64>>,
}

#[derive(Debug, Default)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f64>>,
}

impl AudioOutput {
    pub fn channels(&self) -> usize {
        self.buffers.len()
    }

    /// Frames rendered (length of the first channel)
    pub fn len(&self) -> usize {
        self.buffers.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run `processor` over `input`, one tick per sample in order.
///
/// Collects one output channel, or two when the processor reports stereo.
pub fn render<P: Processor + ?Sized>(processor: &mut P, input: &[f64]) -> AudioOutput {
    let channels = if processor.is_stereo() { 2 } else { 1 };
    let mut buffers = vec![Vec::with_capacity(input.len()); channels];

    for &sample in input {
        processor.tick(sample);
        match processor.frame() {
            Frame::Mono(value) => {
                for buffer in buffers.iter_mut() {
                    buffer.push(value);
                }
            }
            Frame::Stereo([left, right]) => {
                buffers[0].push(left);
                if let Some(buffer) = buffers.get_mut(1) {
                    buffer.push(right);
                }
            }
        }
    }

    AudioOutput { buffers }
}

/// Render every channel of `input` through its own processor.
///
/// Channels beyond the number of processors are skipped.
pub fn render_channels<P: Processor>(processors: &mut [P], input: &AudioInput) -> AudioOutput {
    let buffers = processors
        .iter_mut()
        .zip(input.buffers.iter())
        .flat_map(|(processor, channel)| render(processor, channel).buffers)
        .collect();

    AudioOutput { buffers }
}

/// 16-bit PCM in, 16-bit PCM out: normalise, render, rescale.
pub fn render_pcm16<P: Processor + ?Sized>(processor: &mut P, input: &[i16]) -> Vec<Vec<i16>> {
    let normalised: Vec<f64> = input.iter().copied().map(pcm16_to_sample).collect();
    render(processor, &normalised)
        .buffers
        .into_iter()
        .map(|channel| channel.into_iter().map(sample_to_pcm16).collect())
        .collect()
}
