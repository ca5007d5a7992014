use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/*
| mode    | reads                    | order  | min tap |
| ------- | ------------------------ | ------ | ------- |
| none    | nearest slot             | 0      | 0.5     |
| linear  | x[n], x[n+1]             | 1      | 1       |
| hermite | x[n-1], x[n] ... x[n+2]  | 3      | 2       |
*/

/// Kernel used to read a delay line at a fractional position
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Round to the nearest whole sample
    #[default]
    None,
    Linear,
    /// 4-point, 3rd-order Hermite (Catmull-Rom slopes)
    Hermite,
}

impl Interpolation {
    /// Smallest tap, in samples, this kernel can read without needing a
    /// sample that has not been written yet.
    pub fn min_tap(self) -> f64 {
        match self {
            Interpolation::None => 0.5,
            Interpolation::Linear => 1.0,
            Interpolation::Hermite => 2.0,
        }
    }

    /// Extra buffer slots needed beyond the longest tap
    pub const MARGIN: usize = 2;
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Interpolation::None => "none",
            Interpolation::Linear => "linear",
            Interpolation::Hermite => "hermite",
        };
        f.write_str(name)
    }
}

impl FromStr for Interpolation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Interpolation::None),
            "linear" => Ok(Interpolation::Linear),
            "hermite" => Ok(Interpolation::Hermite),
            _ => Err(ConfigError::UnknownInterpolation(s.to_string())),
        }
    }
}

/// Straight-line blend between `y1` (at 0) and `y2` (at 1).
#[inline]
pub fn linear(remainder: f64, y1: f64, y2: f64) -> f64 {
    y1 + (y2 - y1) * remainder
}

/// Cubic Hermite through `y1` (at 0) and `y2` (at 1), slopes taken from the
/// outer neighbours `y0` and `y3`.
///
/// Horner form; operation order is fixed so results stay reproducible.
#[inline]
pub fn hermite(remainder: f64, y0: f64, y1: f64, y2: f64, y3: f64) -> f64 {
    let slope0 = (y2 - y0) / 2.0;
    let slope1 = (y3 - y1) / 2.0;
    let v = y1 - y2;
    let w = slope0 + v;
    let a = w + v + slope1;
    let b = w + a;

    ((a * remainder - b) * remainder + slope0) * remainder + y1
}
