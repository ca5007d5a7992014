/// Full-scale magnitude of 16-bit PCM
pub const PCM16_SCALE: f64 = 32768.0;

/// Normalise a 16-bit PCM sample to the floating range [-1, 1).
#[inline]
pub fn pcm16_to_sample(pcm: i16) -> f64 {
    pcm as f64 / PCM16_SCALE
}

/// Scale a floating sample back to 16-bit PCM, saturating at the rails.
#[inline]
pub fn sample_to_pcm16(sample: f64) -> i16 {
    let scaled = (sample * PCM16_SCALE).round();
    scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcm_extremes_map_to_unit_range() {
        assert_eq!(pcm16_to_sample(i16::MIN), -1.0);
        assert_eq!(pcm16_to_sample(0), 0.0);
        assert!(pcm16_to_sample(i16::MAX) < 1.0);
    }

    #[test]
    fn conversion_round_trips_every_value_in_range() {
        for pcm in [i16::MIN, -12_345, -1, 0, 1, 999, i16::MAX] {
            assert_eq!(sample_to_pcm16(pcm16_to_sample(pcm)), pcm);
        }
    }

    #[test]
    fn out_of_range_samples_saturate() {
        assert_eq!(sample_to_pcm16(1.5), i16::MAX);
        assert_eq!(sample_to_pcm16(-3.0), i16::MIN);
        assert_eq!(sample_to_pcm16(f64::NAN), 0);
    }
}
