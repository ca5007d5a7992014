//! Offline measurements of a processor's response.
//!
//! Used to check filter behaviour (allpass flatness, comb spacing, reverb
//! decay) without any plotting: everything returns plain numbers.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::processor::Processor;

/// Clear `processor`, feed it a unit impulse followed by silence, and collect
/// `len` output samples.
pub fn impulse_response<P: Processor + ?Sized>(processor: &mut P, len: usize) -> Vec<f64> {
    processor.clear();
    (0..len)
        .map(|n| {
            processor.tick(if n == 0 { 1.0 } else { 0.0 });
            processor.output()
        })
        .collect()
}

/// Magnitude of the DFT of `signal`, bins `0..=len / 2` (DC to Nyquist).
pub fn magnitude_response(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }

    let mut spectrum: Vec<Complex<f64>> = signal.iter().map(|&s| Complex::new(s, 0.0)).collect();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(spectrum.len());
    fft.process(&mut spectrum);

    spectrum
        .iter()
        .take(signal.len() / 2 + 1)
        .map(|bin| bin.norm())
        .collect()
}

/// Magnitude in decibels, floored at -300 dB so silence stays finite
pub fn to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.max(1e-15).log10()
}

/// Sum of squares
pub fn energy(signal: &[f64]) -> f64 {
    signal.iter().map(|s| s * s).sum()
}

/// Time in seconds for the backward-integrated energy of `signal` to fall
/// `drop_db` below its starting level.
///
/// Uses Schroeder's integrated impulse method. Returns `None` for silence or
/// when the decay never gets that deep within the signal.
pub fn decay_time(signal: &[f64], sample_rate: u32, drop_db: f64) -> Option<f64> {
    let total = energy(signal);
    if total <= 0.0 || sample_rate == 0 {
        return None;
    }

    // Energy ratio, so 10·log10
    let mut remaining = total;
    for (n, &sample) in signal.iter().enumerate() {
        if 10.0 * (remaining / total).max(1e-30).log10() <= -drop_db {
            return Some(n as f64 / sample_rate as f64);
        }
        remaining -= sample * sample;
    }

    None
}
