//! Impulse response summary

use std::fmt;

use algoverb::analysis::{decay_time, energy, magnitude_response, to_db};

pub struct Report {
    pub samples: usize,
    pub peak: f64,
    pub energy: f64,
    /// Seconds to decay 60 dB, measured or extrapolated from the first 20 dB
    pub rt60: Option<(f64, bool)>,
    pub min_db: f64,
    pub max_db: f64,
}

impl Report {
    pub fn measure(response: &[f64], sample_rate: u32) -> Self {
        let peak = response.iter().fold(0.0_f64, |peak, s| peak.max(s.abs()));

        let rt60 = decay_time(response, sample_rate, 60.0)
            .map(|t| (t, false))
            .or_else(|| decay_time(response, sample_rate, 20.0).map(|t20| (t20 * 3.0, true)));

        let magnitude = magnitude_response(response);
        let (min_db, max_db) = magnitude
            .iter()
            .map(|&m| to_db(m))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), db| {
                (lo.min(db), hi.max(db))
            });

        Self {
            samples: response.len(),
            peak,
            energy: energy(response),
            rt60,
            min_db,
            max_db,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Impulse response: {} samples", self.samples)?;
        writeln!(f, "Peak: {:.4}", self.peak)?;
        writeln!(f, "Energy: {:.4}", self.energy)?;
        match self.rt60 {
            Some((t, false)) => writeln!(f, "RT60: {:.3} s", t)?,
            Some((t, true)) => writeln!(f, "RT60: ~{:.3} s (extrapolated from T20)", t)?,
            None => writeln!(f, "RT60: tail longer than the render")?,
        }
        writeln!(
            f,
            "Magnitude response: {:.1} dB to {:.1} dB",
            self.min_db, self.max_db
        )
    }
}
