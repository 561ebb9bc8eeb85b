// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use core::fmt;

/// Errors returned when a configuration change is rejected.
///
/// A rejected change leaves the chart exactly as it was before the call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `max` must be strictly greater than `min`.
    InvalidValueRange {
        /// Requested minimum value.
        min: i32,
        /// Requested maximum value.
        max: i32,
    },
    /// Angles must be finite and `end` must not precede `start`.
    InvalidAngleRange {
        /// Requested start angle in degrees.
        start: f64,
        /// Requested end angle in degrees.
        end: f64,
    },
    /// Stroke widths must be finite and positive.
    InvalidStrokeWidth(f64),
    /// The host density factor must be finite and positive.
    InvalidDensity(f64),
    /// A `Decelerate` easing factor must be finite and positive.
    InvalidEasingFactor(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValueRange { min, max } => {
                write!(f, "value range [{min}, {max}] is empty or inverted")
            }
            Self::InvalidAngleRange { start, end } => {
                write!(f, "angle range [{start}, {end}] is inverted or not finite")
            }
            Self::InvalidStrokeWidth(width) => write!(f, "stroke width {width} is not positive"),
            Self::InvalidDensity(density) => write!(f, "density {density} is not positive"),
            Self::InvalidEasingFactor(factor) => {
                write!(f, "easing factor {factor} is not positive")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn display_names_the_offending_range() {
        let err = ConfigError::InvalidValueRange { min: 10, max: 10 };
        assert_eq!(err.to_string(), "value range [10, 10] is empty or inverted");

        let err = ConfigError::InvalidAngleRange {
            start: 90.0,
            end: 45.0,
        };
        assert_eq!(
            err.to_string(),
            "angle range [90, 45] is inverted or not finite"
        );

        let err = ConfigError::InvalidEasingFactor(-1.0);
        assert_eq!(err.to_string(), "easing factor -1 is not positive");
    }
}
