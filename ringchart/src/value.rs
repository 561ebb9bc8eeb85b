// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Values and the value model (angle range, value range, ordered values).

extern crate alloc;

use alloc::vec::Vec;

use peniko::Color;

use crate::error::ConfigError;

/// Default start angle, in degrees clockwise from 3 o'clock.
pub const DEFAULT_START_ANGLE: f64 = 0.0;
/// Default end angle, in degrees clockwise from 3 o'clock.
pub const DEFAULT_END_ANGLE: f64 = 360.0;
/// Default minimum of the value range.
pub const DEFAULT_MIN_VALUE: i32 = 0;
/// Default maximum of the value range.
pub const DEFAULT_MAX_VALUE: i32 = 100;
/// Default color of the background track (`0xFFCCCCCC`).
pub const DEFAULT_BACKGROUND_COLOR: Color = argb_color(0xFFCC_CCCC);

/// Converts a packed `0xAARRGGBB` color into a [`Color`].
pub const fn argb_color(argb: u32) -> Color {
    let [a, r, g, b] = argb.to_be_bytes();
    Color::from_rgba8(r, g, b, a)
}

/// One colored segment of the ring.
///
/// `value` is expressed in the same units as the model's value range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Value {
    /// Segment length in value-range units.
    pub value: u32,
    /// Stroke color of the segment.
    pub color: Color,
}

impl Value {
    /// Creates a new value.
    pub const fn new(value: u32, color: Color) -> Self {
        Self { value, color }
    }

    /// Creates a new value from a packed `0xAARRGGBB` color.
    pub const fn argb(value: u32, argb: u32) -> Self {
        Self::new(value, argb_color(argb))
    }
}

/// Angle range, value range and the ordered values of a ring chart.
///
/// `total_value` is cached and recomputed whenever values are assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueModel {
    start_angle: f64,
    end_angle: f64,
    min_value: i32,
    max_value: i32,
    values: Option<Vec<Value>>,
    total_value: u64,
}

impl Default for ValueModel {
    fn default() -> Self {
        Self {
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            values: None,
            total_value: 0,
        }
    }
}

impl ValueModel {
    /// Creates a model with the default ranges and no values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both angle endpoints.
    ///
    /// Rejects non-finite angles and `end < start`; the model is unchanged on error.
    pub fn set_angle_range(&mut self, start: f64, end: f64) -> Result<&mut Self, ConfigError> {
        if !start.is_finite() || !end.is_finite() || end < start {
            return Err(ConfigError::InvalidAngleRange { start, end });
        }
        self.start_angle = start;
        self.end_angle = end;
        Ok(self)
    }

    /// Replaces both value endpoints.
    ///
    /// Rejects `max <= min`; the model is unchanged on error.
    pub fn set_value_range(&mut self, min: i32, max: i32) -> Result<&mut Self, ConfigError> {
        if max <= min {
            return Err(ConfigError::InvalidValueRange { min, max });
        }
        self.min_value = min;
        self.max_value = max;
        Ok(self)
    }

    /// Copies `values` into the model and recomputes the cached total.
    pub fn set_values(&mut self, values: &[Value]) -> &mut Self {
        self.total_value = values.iter().map(|v| u64::from(v.value)).sum();
        self.values = Some(values.to_vec());
        self
    }

    /// Drops all values, returning the model to the "no values" state.
    pub fn clear_values(&mut self) -> &mut Self {
        self.values = None;
        self.total_value = 0;
        self
    }

    /// Start angle in degrees.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// End angle in degrees.
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// The drawable sweep, `end_angle - start_angle`.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Minimum of the value range.
    pub fn min_value(&self) -> i32 {
        self.min_value
    }

    /// Maximum of the value range.
    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    /// The normalizing span, `max_value - min_value`.
    pub fn span(&self) -> f64 {
        f64::from(self.max_value) - f64::from(self.min_value)
    }

    /// The assigned values, or `None` if values were never assigned.
    pub fn values(&self) -> Option<&[Value]> {
        self.values.as_deref()
    }

    /// Sum of all assigned values.
    pub fn total_value(&self) -> u64 {
        self.total_value
    }

    /// Converts a partial total in value units into a sweep in degrees.
    ///
    /// Totals beyond the span are not clamped: the sweep then exceeds [`Self::sweep`].
    pub fn sweep_for(&self, total: f64) -> f64 {
        self.sweep() * total / self.span()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn defaults_match_the_documented_table() {
        let model = ValueModel::new();
        assert_eq!(model.start_angle(), 0.0);
        assert_eq!(model.end_angle(), 360.0);
        assert_eq!(model.min_value(), 0);
        assert_eq!(model.max_value(), 100);
        assert_eq!(model.values(), None);
        assert_eq!(model.total_value(), 0);
    }

    #[test]
    fn argb_unpacks_channels() {
        let rgba = argb_color(0x80FF_4020).to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (0xFF, 0x40, 0x20, 0x80));

        let bg = DEFAULT_BACKGROUND_COLOR.to_rgba8();
        assert_eq!((bg.r, bg.g, bg.b, bg.a), (0xCC, 0xCC, 0xCC, 0xFF));
    }

    #[test]
    fn total_is_cached_on_assignment() {
        let mut model = ValueModel::new();
        model.set_values(&[
            Value::new(25, css::RED),
            Value::new(0, css::GREEN),
            Value::new(u32::MAX, css::BLUE),
        ]);
        assert_eq!(model.total_value(), 25 + u64::from(u32::MAX));

        model.set_values(&[]);
        assert_eq!(model.total_value(), 0);
        assert_eq!(model.values(), Some(&[][..]));

        model.clear_values();
        assert_eq!(model.values(), None);
    }

    #[test]
    fn assigned_values_are_copied() {
        let mut source = vec![Value::new(10, css::RED), Value::new(20, css::GREEN)];
        let mut model = ValueModel::new();
        model.set_values(&source);

        source[0] = Value::new(99, css::BLACK);
        source.push(Value::new(1, css::WHITE));

        let values = model.values().expect("values were assigned");
        assert_eq!(values, &[Value::new(10, css::RED), Value::new(20, css::GREEN)]);
        assert_eq!(model.total_value(), 30);
    }

    #[test]
    fn inverted_value_range_is_rejected() {
        let mut model = ValueModel::new();
        assert_eq!(
            model.set_value_range(50, 50),
            Err(ConfigError::InvalidValueRange { min: 50, max: 50 })
        );
        assert!(model.set_value_range(10, -10).is_err(), "max below min");
        assert_eq!((model.min_value(), model.max_value()), (0, 100));

        model.set_value_range(-50, 50).expect("valid range");
        assert_eq!(model.span(), 100.0);
    }

    #[test]
    fn inverted_or_non_finite_angle_range_is_rejected() {
        let mut model = ValueModel::new();
        assert!(model.set_angle_range(90.0, 45.0).is_err(), "end before start");
        assert!(model.set_angle_range(f64::NAN, 45.0).is_err(), "NaN start");
        assert!(model.set_angle_range(0.0, f64::INFINITY).is_err(), "inf end");
        assert_eq!(model.sweep(), 360.0);

        model.set_angle_range(90.0, 90.0).expect("empty sweep is allowed");
        assert_eq!(model.sweep(), 0.0);
    }

    #[test]
    fn sweep_for_scales_by_the_span() {
        let mut model = ValueModel::new();
        model
            .set_angle_range(90.0, 270.0)
            .expect("valid angles")
            .set_value_range(0, 50)
            .expect("valid values");
        assert_eq!(model.sweep_for(25.0), 90.0);
        assert_eq!(model.sweep_for(100.0), 360.0);
    }
}
