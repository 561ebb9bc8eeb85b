// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart facade: configuration, redraw policy and painting.
//!
//! [`RingChart`] owns the [`ValueModel`] and an [`Animator`], and talks to its
//! environment through two seams:
//! - a [`Host`], which supplies the density factor, schedules frames and repaints;
//! - an [`ArcRenderer`], which receives the arcs of each painted frame in order.
//!
//! Every configuration change requests a redraw. In [`AnimationMode::None`], or on
//! hosts without animation support, the redraw is immediate at fraction 1. Otherwise
//! the animator is (re)started and the host is asked for frames, which it delivers
//! through [`RingChart::on_frame`].
//!
//! All calls are expected on the host's rendering thread.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::{Insets, Size};
use peniko::Color;

use crate::animation::{Animator, DEFAULT_DURATION, Easing};
use crate::error::ConfigError;
use crate::geometry::ring_bounds;
use crate::layout::{AnimationMode, ArcDescriptor, RingLayout};
use crate::trace::{ConfigRejectedEvent, DegenerateGeometryEvent, TraceSink, Tracer};
use crate::value::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_END_ANGLE, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE,
    DEFAULT_START_ANGLE, Value, ValueModel,
};

/// Default stroke width in logical units (scaled by [`Host::density`]).
pub const DEFAULT_STROKE_WIDTH: f64 = 16.0;

/// Consumes the arcs of a painted frame.
///
/// Arcs arrive in paint order; later arcs must be drawn over earlier ones.
pub trait ArcRenderer {
    /// Draws one stroked arc.
    fn draw_arc(&mut self, arc: &ArcDescriptor);
}

/// Records arcs instead of drawing them.
impl ArcRenderer for Vec<ArcDescriptor> {
    fn draw_arc(&mut self, arc: &ArcDescriptor) {
        self.push(*arc);
    }
}

/// The widget environment a chart is embedded in.
pub trait Host {
    /// Logical-to-device scale factor for stroke widths.
    fn density(&self) -> f64 {
        1.0
    }

    /// Whether the host can deliver animation frames.
    fn supports_animation(&self) -> bool {
        true
    }

    /// Asks for a call to [`RingChart::on_frame`] on the next frame.
    fn request_frame(&mut self);

    /// Asks for the chart to be painted again.
    fn invalidate(&mut self);

    /// Called after the final frame of an animation run.
    fn animation_finished(&mut self) {}
}

/// Construction-time configuration for a [`RingChart`].
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Start angle in degrees, clockwise from 3 o'clock.
    pub start_angle: f64,
    /// End angle in degrees; must not precede `start_angle`.
    pub end_angle: f64,
    /// Minimum of the value range.
    pub min_value: i32,
    /// Maximum of the value range; must exceed `min_value`.
    pub max_value: i32,
    /// Foreground stroke width in logical units.
    pub stroke_width: f64,
    /// Background stroke width in logical units; `None` uses `stroke_width`.
    pub background_width: Option<f64>,
    /// Background track color.
    pub background_color: Color,
    /// How values animate in on redraw.
    pub animation_mode: AnimationMode,
    /// Duration of one animation run.
    pub animation_duration: Duration,
    /// Easing curve of animation runs.
    pub easing: Easing,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            background_width: None,
            background_color: DEFAULT_BACKGROUND_COLOR,
            animation_mode: AnimationMode::default(),
            animation_duration: DEFAULT_DURATION,
            easing: Easing::default(),
        }
    }
}

impl ChartConfig {
    /// Sets the angle range.
    pub fn with_angle_range(mut self, start: f64, end: f64) -> Self {
        self.start_angle = start;
        self.end_angle = end;
        self
    }

    /// Sets the value range.
    pub fn with_value_range(mut self, min: i32, max: i32) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Sets the foreground stroke width (logical units).
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Sets a distinct background stroke width (logical units).
    pub fn with_background_width(mut self, width: f64) -> Self {
        self.background_width = Some(width);
        self
    }

    /// Sets the background track color.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Sets the animation mode.
    pub fn with_animation_mode(mut self, mode: AnimationMode) -> Self {
        self.animation_mode = mode;
        self
    }

    /// Sets the animation duration.
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

fn device_width(logical: f64, density: f64) -> Result<f64, ConfigError> {
    if !logical.is_finite() || logical <= 0.0 {
        return Err(ConfigError::InvalidStrokeWidth(logical));
    }
    Ok(logical * density)
}

fn tracer(sink: &mut Option<Box<dyn TraceSink>>) -> Tracer<'_> {
    match sink {
        Some(sink) => Tracer::new(&mut **sink),
        None => Tracer::none(),
    }
}

/// A ring chart bound to a [`Host`].
pub struct RingChart<H: Host> {
    model: ValueModel,
    stroke_width: f64,
    background_width: f64,
    background_color: Color,
    mode: AnimationMode,
    fraction: f64,
    animator: Animator,
    arcs: Vec<ArcDescriptor>,
    host: H,
    trace_sink: Option<Box<dyn TraceSink>>,
}

impl<H: Host> fmt::Debug for RingChart<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingChart")
            .field("model", &self.model)
            .field("stroke_width", &self.stroke_width)
            .field("background_width", &self.background_width)
            .field("mode", &self.mode)
            .field("fraction", &self.fraction)
            .field("animator", &self.animator)
            .finish_non_exhaustive()
    }
}

impl<H: Host> RingChart<H> {
    /// Creates a chart from `config`, converting stroke widths with `host.density()`.
    ///
    /// The chart starts fully drawn (fraction 1) with no values.
    pub fn new(config: ChartConfig, host: H) -> Result<Self, ConfigError> {
        let density = host.density();
        if !density.is_finite() || density <= 0.0 {
            return Err(ConfigError::InvalidDensity(density));
        }
        match config.easing {
            Easing::Decelerate { factor } if !config.easing.is_valid() => {
                return Err(ConfigError::InvalidEasingFactor(factor));
            }
            _ => {}
        }
        let stroke_width = device_width(config.stroke_width, density)?;
        let background_width = match config.background_width {
            Some(width) => device_width(width, density)?,
            None => stroke_width,
        };

        let mut model = ValueModel::new();
        model
            .set_angle_range(config.start_angle, config.end_angle)?
            .set_value_range(config.min_value, config.max_value)?;

        Ok(Self {
            model,
            stroke_width,
            background_width,
            background_color: config.background_color,
            mode: config.animation_mode,
            fraction: 1.0,
            animator: Animator::new(config.animation_duration, config.easing),
            arcs: Vec::new(),
            host,
            trace_sink: None,
        })
    }

    /// Routes diagnostics to `sink` (only dispatched with the `trace` feature).
    pub fn set_trace_sink(&mut self, sink: impl TraceSink + 'static) -> &mut Self {
        self.trace_sink = Some(Box::new(sink));
        self
    }

    /// Sets the animation mode used by later redraws. Does not redraw.
    pub fn with_animation_mode(&mut self, mode: AnimationMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Sets the start angle, keeping the current end angle.
    pub fn with_start_angle(&mut self, start: f64) -> Result<&mut Self, ConfigError> {
        self.with_angle_range(start, self.model.end_angle())
    }

    /// Sets the end angle, keeping the current start angle.
    pub fn with_end_angle(&mut self, end: f64) -> Result<&mut Self, ConfigError> {
        self.with_angle_range(self.model.start_angle(), end)
    }

    /// Sets both angles and redraws.
    pub fn with_angle_range(&mut self, start: f64, end: f64) -> Result<&mut Self, ConfigError> {
        let result = self.model.set_angle_range(start, end).map(|_| ());
        self.apply(result)
    }

    /// Sets the minimum value, keeping the current maximum.
    pub fn with_min_value(&mut self, min: i32) -> Result<&mut Self, ConfigError> {
        self.with_value_range(min, self.model.max_value())
    }

    /// Sets the maximum value, keeping the current minimum.
    pub fn with_max_value(&mut self, max: i32) -> Result<&mut Self, ConfigError> {
        self.with_value_range(self.model.min_value(), max)
    }

    /// Sets both value endpoints and redraws.
    pub fn with_value_range(&mut self, min: i32, max: i32) -> Result<&mut Self, ConfigError> {
        let result = self.model.set_value_range(min, max).map(|_| ());
        self.apply(result)
    }

    /// Copies `values` into the chart and redraws.
    pub fn with_values(&mut self, values: &[Value]) -> &mut Self {
        self.model.set_values(values);
        self.invalidate();
        self
    }

    /// Requests a redraw according to the animation mode.
    pub fn invalidate(&mut self) {
        if self.mode == AnimationMode::None || !self.host.supports_animation() {
            self.animator.cancel();
            self.fraction = 1.0;
            self.host.invalidate();
        } else {
            self.fraction = 0.0;
            self.animator.start_traced(&mut tracer(&mut self.trace_sink));
            self.host.request_frame();
        }
    }

    /// Advances the animation to the host clock reading `now`.
    ///
    /// Returns `true` while more frames are wanted.
    pub fn on_frame(&mut self, now: Duration) -> bool {
        let mut tracer = tracer(&mut self.trace_sink);
        let Some(frame) = self.animator.tick_traced(now, &mut tracer) else {
            return false;
        };
        self.fraction = frame.fraction;
        self.host.invalidate();
        if frame.finished {
            self.host.animation_finished();
            false
        } else {
            self.host.request_frame();
            true
        }
    }

    /// The layout for the current frame, or `None` if the container is too small.
    pub fn ring_layout(&self, container: Size, padding: Insets) -> Option<RingLayout> {
        let rect = ring_bounds(
            container,
            padding,
            self.stroke_width,
            self.background_width,
        )?;
        Some(
            RingLayout::new(rect, self.stroke_width)
                .with_background_width(self.background_width)
                .with_background_color(self.background_color)
                .with_mode(self.mode)
                .with_fraction(self.fraction),
        )
    }

    /// Paints the current frame into `renderer`.
    ///
    /// Draws nothing when the container is too small for a ring.
    pub fn paint(&mut self, container: Size, padding: Insets, renderer: &mut impl ArcRenderer) {
        let Some(layout) = self.ring_layout(container, padding) else {
            tracer(&mut self.trace_sink)
                .degenerate_geometry(&DegenerateGeometryEvent { container, padding });
            return;
        };

        let mut tracer = tracer(&mut self.trace_sink);
        self.arcs.clear();
        layout.extend_arcs_traced(&self.model, &mut self.arcs, &mut tracer);
        for arc in &self.arcs {
            renderer.draw_arc(arc);
        }
    }

    /// Returns the arcs [`Self::paint`] would draw.
    pub fn layout(&mut self, container: Size, padding: Insets) -> Vec<ArcDescriptor> {
        let mut arcs = Vec::new();
        self.paint(container, padding, &mut arcs);
        arcs
    }

    /// The value model.
    pub fn model(&self) -> &ValueModel {
        &self.model
    }

    /// The animation mode.
    pub fn animation_mode(&self) -> AnimationMode {
        self.mode
    }

    /// The current animation fraction.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Whether an animation run is in flight.
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Foreground stroke width in device units.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Background stroke width in device units.
    pub fn background_width(&self) -> f64 {
        self.background_width
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn apply(&mut self, result: Result<(), ConfigError>) -> Result<&mut Self, ConfigError> {
        match result {
            Ok(()) => {
                self.invalidate();
                Ok(self)
            }
            Err(error) => {
                tracer(&mut self.trace_sink).config_rejected(&ConfigRejectedEvent { error });
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use kurbo::Rect;
    use peniko::color::palette::css;

    use super::*;

    #[derive(Debug, Default)]
    struct TestHost {
        density: Option<f64>,
        no_animation: bool,
        frame_requests: u32,
        invalidations: u32,
        finished: u32,
    }

    impl Host for TestHost {
        fn density(&self) -> f64 {
            self.density.unwrap_or(1.0)
        }

        fn supports_animation(&self) -> bool {
            !self.no_animation
        }

        fn request_frame(&mut self) {
            self.frame_requests += 1;
        }

        fn invalidate(&mut self) {
            self.invalidations += 1;
        }

        fn animation_finished(&mut self) {
            self.finished += 1;
        }
    }

    const SQUARE: Size = Size::new(100.0, 100.0);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn values() -> [Value; 3] {
        [
            Value::new(25, css::RED),
            Value::new(25, css::GREEN),
            Value::new(50, css::BLUE),
        ]
    }

    fn sweeps(arcs: &[ArcDescriptor]) -> Vec<f64> {
        arcs.iter().map(|a| a.sweep_angle).collect()
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let host = TestHost::default;
        assert_eq!(
            RingChart::new(ChartConfig::default().with_value_range(5, 5), host()).err(),
            Some(ConfigError::InvalidValueRange { min: 5, max: 5 })
        );
        assert_eq!(
            RingChart::new(ChartConfig::default().with_stroke_width(0.0), host()).err(),
            Some(ConfigError::InvalidStrokeWidth(0.0))
        );
        assert_eq!(
            RingChart::new(ChartConfig::default().with_background_width(-1.0), host()).err(),
            Some(ConfigError::InvalidStrokeWidth(-1.0))
        );
        assert!(
            RingChart::new(ChartConfig::default().with_angle_range(10.0, 0.0), host()).is_err(),
            "inverted angles"
        );
        let dense = TestHost {
            density: Some(0.0),
            ..TestHost::default()
        };
        assert_eq!(
            RingChart::new(ChartConfig::default(), dense).err(),
            Some(ConfigError::InvalidDensity(0.0))
        );
        for factor in [0.0, -2.0] {
            assert_eq!(
                RingChart::new(
                    ChartConfig::default().with_easing(Easing::Decelerate { factor }),
                    host()
                )
                .err(),
                Some(ConfigError::InvalidEasingFactor(factor))
            );
        }
        assert!(
            RingChart::new(
                ChartConfig::default().with_easing(Easing::Decelerate { factor: f64::NAN }),
                host()
            )
            .is_err(),
            "NaN easing factor"
        );
    }

    #[test]
    fn stroke_widths_scale_with_density() {
        let host = TestHost {
            density: Some(2.0),
            ..TestHost::default()
        };
        let mut chart = RingChart::new(ChartConfig::default(), host).expect("valid config");
        assert_eq!(chart.stroke_width(), 32.0);
        assert_eq!(chart.background_width(), 32.0);

        let arcs = chart.layout(Size::new(200.0, 200.0), Insets::ZERO);
        assert_eq!(arcs.len(), 1, "no values yet");
        assert_eq!(arcs[0].rect, Rect::new(16.0, 16.0, 184.0, 184.0));
        assert_eq!(arcs[0].stroke_width, 32.0);
    }

    #[test]
    fn none_mode_redraws_immediately_at_full_fraction() {
        let config = ChartConfig::default().with_animation_mode(AnimationMode::None);
        let mut chart = RingChart::new(config, TestHost::default()).expect("valid config");
        chart.with_values(&values());

        assert_eq!(chart.fraction(), 1.0);
        assert!(!chart.is_animating(), "no animation in None mode");
        assert_eq!(chart.host().invalidations, 1);
        assert_eq!(chart.host().frame_requests, 0);
        assert!(!chart.on_frame(ms(16)), "nothing to animate");

        let arcs = chart.layout(SQUARE, Insets::ZERO);
        assert_eq!(sweeps(&arcs), vec![360.0, 360.0, 180.0, 90.0]);
    }

    #[test]
    fn hosts_without_animation_redraw_immediately() {
        let host = TestHost {
            no_animation: true,
            ..TestHost::default()
        };
        let mut chart = RingChart::new(ChartConfig::default(), host).expect("valid config");
        chart.with_values(&values());
        assert_eq!(chart.fraction(), 1.0);
        assert_eq!(chart.host().invalidations, 1);
        assert_eq!(chart.host().frame_requests, 0);
    }

    #[test]
    fn animated_redraw_runs_to_completion() {
        let mut chart =
            RingChart::new(ChartConfig::default(), TestHost::default()).expect("valid config");
        chart.with_values(&values());
        assert_eq!(chart.fraction(), 0.0);
        assert!(chart.is_animating(), "sequential mode animates");
        assert_eq!(chart.host().frame_requests, 1);

        assert!(chart.on_frame(ms(5_000)), "first frame");
        assert_eq!(chart.fraction(), 0.0);
        assert!(chart.on_frame(ms(5_500)), "mid frame");
        assert_eq!(chart.fraction(), 0.75);

        // Sequential at 0.75: target 75 lands in the third value.
        let arcs = chart.layout(SQUARE, Insets::ZERO);
        assert_eq!(sweeps(&arcs), vec![360.0, 270.0, 180.0, 90.0]);

        assert!(!chart.on_frame(ms(6_000)), "final frame");
        assert_eq!(chart.fraction(), 1.0);
        assert_eq!(chart.host().finished, 1);
        assert_eq!(chart.host().invalidations, 3);
        assert_eq!(chart.host().frame_requests, 3);
        assert!(!chart.on_frame(ms(6_016)), "run is over");
    }

    #[test]
    fn new_configuration_supersedes_a_running_animation() {
        let mut chart =
            RingChart::new(ChartConfig::default(), TestHost::default()).expect("valid config");
        chart.with_values(&values());
        chart.on_frame(ms(0));
        chart.on_frame(ms(900));
        assert!(chart.fraction() > 0.9, "nearly done");

        chart.with_max_value(200).expect("valid range");
        assert_eq!(chart.fraction(), 0.0);
        assert!(chart.on_frame(ms(950)), "restarted run");
        assert_eq!(chart.fraction(), 0.0);
        assert!(chart.on_frame(ms(1_900)), "still running on the new clock");
        assert_eq!(chart.host().finished, 0);
    }

    #[test]
    fn single_angle_setters_keep_the_other_endpoint() {
        let config = ChartConfig::default().with_animation_mode(AnimationMode::None);
        let mut chart = RingChart::new(config, TestHost::default()).expect("valid config");
        chart
            .with_start_angle(90.0)
            .expect("valid")
            .with_end_angle(270.0)
            .expect("valid");
        assert_eq!(chart.model().start_angle(), 90.0);
        assert_eq!(chart.model().end_angle(), 270.0);

        chart
            .with_min_value(10)
            .expect("valid")
            .with_max_value(60)
            .expect("valid");
        assert_eq!(chart.model().span(), 50.0);
        assert_eq!(chart.host().invalidations, 4);
    }

    #[test]
    fn rejected_changes_leave_the_chart_untouched() {
        let config = ChartConfig::default().with_animation_mode(AnimationMode::None);
        let mut chart = RingChart::new(config, TestHost::default()).expect("valid config");
        assert!(chart.with_end_angle(-10.0).is_err(), "end before start");
        assert!(chart.with_min_value(100).is_err(), "empty range");
        assert!(chart.with_max_value(-1).is_err(), "inverted range");
        assert_eq!(chart.model(), &ValueModel::new());
        assert_eq!(chart.host().invalidations, 0);
    }

    #[test]
    fn tiny_containers_paint_nothing() {
        let mut chart =
            RingChart::new(ChartConfig::default(), TestHost::default()).expect("valid config");
        chart.with_values(&values());
        assert!(chart.layout(Size::new(16.0, 400.0), Insets::ZERO).is_empty(), "too narrow");
        assert!(
            chart
                .layout(SQUARE, Insets::new(0.0, 60.0, 0.0, 40.0))
                .is_empty(),
            "padding consumes the height"
        );
    }

    #[test]
    fn caller_buffers_are_copied() {
        let config = ChartConfig::default().with_animation_mode(AnimationMode::Parallel);
        let mut chart = RingChart::new(config, TestHost::default()).expect("valid config");
        let mut source = vec![Value::new(50, css::RED)];
        chart.with_values(&source);
        chart.on_frame(ms(0));
        chart.on_frame(ms(1_000));
        source[0] = Value::new(100, css::BLACK);

        let arcs = chart.layout(SQUARE, Insets::ZERO);
        assert_eq!(arcs[1].sweep_angle, 180.0);
        assert_eq!(arcs[1].color, css::RED);
    }

    #[test]
    fn paint_reuses_the_arc_buffer() {
        let config = ChartConfig::default().with_animation_mode(AnimationMode::None);
        let mut chart = RingChart::new(config, TestHost::default()).expect("valid config");
        chart.with_values(&values());
        let mut first = Vec::new();
        chart.paint(SQUARE, Insets::ZERO, &mut first);
        let mut second = Vec::new();
        chart.paint(SQUARE, Insets::ZERO, &mut second);
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_sink_sees_rejections_and_degenerate_frames() {
        use alloc::rc::Rc;
        use core::cell::Cell;

        use crate::trace::LayoutEvent;

        #[derive(Default)]
        struct Counts {
            layouts: Cell<u32>,
            degenerate: Cell<u32>,
            rejected: Cell<u32>,
        }

        struct Sink(Rc<Counts>);

        impl TraceSink for Sink {
            fn on_layout(&mut self, _e: &LayoutEvent) {
                self.0.layouts.set(self.0.layouts.get() + 1);
            }

            fn on_degenerate_geometry(&mut self, _e: &DegenerateGeometryEvent) {
                self.0.degenerate.set(self.0.degenerate.get() + 1);
            }

            fn on_config_rejected(&mut self, _e: &ConfigRejectedEvent) {
                self.0.rejected.set(self.0.rejected.get() + 1);
            }
        }

        let counts = Rc::new(Counts::default());
        let mut chart =
            RingChart::new(ChartConfig::default(), TestHost::default()).expect("valid config");
        chart.set_trace_sink(Sink(Rc::clone(&counts)));

        assert!(chart.with_value_range(3, 1).is_err(), "inverted range");
        chart.layout(SQUARE, Insets::ZERO);
        chart.layout(Size::ZERO, Insets::ZERO);

        assert_eq!(counts.rejected.get(), 1);
        assert_eq!(counts.layouts.get(), 1);
        assert_eq!(counts.degenerate.get(), 1);
    }
}
