use thiserror::Error;

/// Construction-time failures.
///
/// Every component validates its parameters when it is built so that `tick`
/// and `clear` can never fail. Nothing is clamped: a bad value is reported
/// here instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ring buffer length must be at least 1 sample")]
    ZeroLength,

    #[error("sample rate must be a positive number of Hz")]
    ZeroSampleRate,

    #[error("at least one tap is required")]
    NoTaps,

    #[error("delay time must be finite, positive and at most 16777216 samples, got {0}")]
    InvalidDelayTime(f64),

    #[error("tap of {tap} samples is shorter than the {minimum} samples this interpolation needs")]
    TapTooShort { tap: f64, minimum: f64 },

    #[error("multi-tap offsets must be at least 1 sample")]
    ZeroTap,

    #[error("unknown interpolation mode `{0}` (expected none, linear or hermite)")]
    UnknownInterpolation(String),

    #[error("{name} must satisfy |g| < 1 for a stable feedback path, got {value}")]
    UnstableGain { name: &'static str, value: f64 },

    #[error("damping must lie in [0, 1), got {0}")]
    DampingOutOfRange(f64),

    #[error("allpass cascade needs at least one stage")]
    EmptyCascade,
}

/// Reject feedback gains outside the open interval (-1, 1).
pub(crate) fn check_gain(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value.abs() < 1.0 {
        Ok(value)
    } else {
        Err(ConfigError::UnstableGain { name, value })
    }
}

/// Reject damping factors outside [0, 1).
pub(crate) fn check_damping(value: f64) -> Result<f64, ConfigError> {
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::DampingOutOfRange(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_must_be_strictly_inside_unit_interval() {
        assert_eq!(check_gain("coeff", 0.7), Ok(0.7));
        assert_eq!(check_gain("coeff", -0.99), Ok(-0.99));
        assert!(check_gain("coeff", 1.0).is_err());
        assert!(check_gain("coeff", -1.0).is_err());
        assert!(check_gain("coeff", f64::NAN).is_err());
    }

    #[test]
    fn damping_is_half_open() {
        assert_eq!(check_damping(0.0), Ok(0.0));
        assert!(check_damping(1.0).is_err());
        assert!(check_damping(-0.1).is_err());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = ConfigError::UnstableGain {
            name: "gain_2",
            value: 1.5,
        };
        assert!(err.to_string().contains("gain_2"));
        assert!(err.to_string().contains("1.5"));
    }
}
