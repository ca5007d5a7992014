pub mod analysis; // Impulse/frequency response measurements
pub mod dsp;
pub mod error;
pub mod io;
pub mod patch; // Declarative filter and reverb configuration
pub mod processor;

pub use dsp::{
    AllPassDelay, AllPassForm, AllPassStage, CombFilter, Delay, DelayTime, FeedbackLowPass, Filter,
    Interpolation, LowpassFeedbackAllPass, LowpassFeedbackCombFilter, MultiTapDelay, RingBuffer,
    SchroederReverb,
};
pub use error::ConfigError;
pub use patch::{FilterPatch, SchroederPatch};
pub use processor::{Frame, Processor};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
