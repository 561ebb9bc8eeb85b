// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc layout for a single frame.
//!
//! A frame is one background arc spanning the whole angle range, followed by the
//! foreground arcs in **reverse input order**. Every foreground arc starts at the
//! model's start angle; because later arcs overpaint earlier ones, the first value
//! ends up on top and each color remains visible only along its own segment.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Arc, Cap, Point, Rect, Stroke, Vec2};
use peniko::Color;

use crate::trace::{LayoutEvent, Tracer};
use crate::value::{DEFAULT_BACKGROUND_COLOR, Value, ValueModel};

/// How foreground arcs grow as the animation fraction rises.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationMode {
    /// No animation; laid out like [`AnimationMode::Parallel`].
    None,
    /// Segments fill one after another.
    #[default]
    Sequential,
    /// All segments grow together.
    Parallel,
}

/// One stroked arc to be drawn, in paint order.
///
/// Angles are in degrees, clockwise from the positive x axis (y points down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcDescriptor {
    /// Bounding rectangle of the arc's center line.
    pub rect: Rect,
    /// Start angle in degrees.
    pub start_angle: f64,
    /// Sweep in degrees. May exceed the configured range for oversubscribed values.
    pub sweep_angle: f64,
    /// Stroke color.
    pub color: Color,
    /// Stroke width in device units.
    pub stroke_width: f64,
    /// Stroke cap style.
    pub cap: Cap,
    /// Whether the arc is filled to the center (always `false` for ring charts).
    pub filled: bool,
}

impl ArcDescriptor {
    /// Center of the arc.
    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Radii of the arc's center line.
    pub fn radii(&self) -> Vec2 {
        Vec2::new(self.rect.width() / 2.0, self.rect.height() / 2.0)
    }

    /// Converts to a `kurbo` arc (radians).
    pub fn to_arc(&self) -> Arc {
        Arc {
            center: self.center(),
            radii: self.radii(),
            start_angle: self.start_angle.to_radians(),
            sweep_angle: self.sweep_angle.to_radians(),
            x_rotation: 0.0,
        }
    }

    /// The stroke style used to draw this arc.
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.stroke_width).with_caps(self.cap)
    }
}

/// Where the sequential fill currently stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequentialCut {
    /// Index of the value being filled.
    pub index: usize,
    /// Sum of the values strictly before `index`.
    pub prefix: f64,
    /// Filled portion of the value at `index`.
    pub partial: f64,
}

impl SequentialCut {
    /// The filled total, `prefix + partial`.
    pub fn target(&self) -> f64 {
        self.prefix + self.partial
    }
}

/// Layout inputs for one frame of a ring chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingLayout {
    /// Bounding rectangle of the ring's center line (see [`crate::ring_bounds`]).
    pub rect: Rect,
    /// Foreground stroke width in device units.
    pub stroke_width: f64,
    /// Background stroke width in device units.
    pub background_width: f64,
    /// Background track color.
    pub background_color: Color,
    /// Animation mode.
    pub mode: AnimationMode,
    /// Animation fraction, clamped to `[0, 1]` when laying out.
    pub fraction: f64,
}

impl RingLayout {
    /// Creates a fully drawn layout using one stroke width for both rings.
    pub fn new(rect: Rect, stroke_width: f64) -> Self {
        Self {
            rect,
            stroke_width,
            background_width: stroke_width,
            background_color: DEFAULT_BACKGROUND_COLOR,
            mode: AnimationMode::default(),
            fraction: 1.0,
        }
    }

    /// Sets the background track color.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Sets the background stroke width.
    pub fn with_background_width(mut self, width: f64) -> Self {
        self.background_width = width;
        self
    }

    /// Sets the animation mode.
    pub fn with_mode(mut self, mode: AnimationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the animation fraction.
    pub fn with_fraction(mut self, fraction: f64) -> Self {
        self.fraction = fraction;
        self
    }

    /// Returns the arcs for this frame: background first, then foregrounds.
    pub fn arcs(&self, model: &ValueModel) -> Vec<ArcDescriptor> {
        let mut out = Vec::new();
        self.extend_arcs(model, &mut out);
        out
    }

    /// Appends the arcs for this frame to `out`.
    pub fn extend_arcs(&self, model: &ValueModel, out: &mut Vec<ArcDescriptor>) {
        self.extend_arcs_traced(model, out, &mut Tracer::none());
    }

    /// Like [`Self::extend_arcs`], reporting a [`LayoutEvent`] to `tracer`.
    pub fn extend_arcs_traced(
        &self,
        model: &ValueModel,
        out: &mut Vec<ArcDescriptor>,
        tracer: &mut Tracer<'_>,
    ) {
        let fraction = self.clamped_fraction();
        out.push(self.arc(
            model,
            model.sweep(),
            self.background_color,
            self.background_width,
        ));

        let first_foreground = out.len();
        let mut cut = None;
        if let Some(values) = model.values().filter(|_| model.total_value() > 0) {
            match self.mode {
                AnimationMode::None | AnimationMode::Parallel => {
                    self.push_parallel(model, values, fraction, out);
                }
                AnimationMode::Sequential => {
                    cut = sequential_cut(values, model.total_value(), fraction);
                    if let Some(cut) = cut {
                        self.push_sequential(model, values, cut, out);
                    }
                }
            }
        }

        tracer.layout(&LayoutEvent {
            mode: self.mode,
            fraction,
            foreground_arcs: out.len() - first_foreground,
            cut,
        });
    }

    /// Computes the sequential cut for `model` at this layout's fraction.
    ///
    /// Returns `None` when there are no values or they sum to zero.
    pub fn sequential_cut(&self, model: &ValueModel) -> Option<SequentialCut> {
        sequential_cut(
            model.values()?,
            model.total_value(),
            self.clamped_fraction(),
        )
    }

    fn clamped_fraction(&self) -> f64 {
        if self.fraction.is_nan() {
            0.0
        } else {
            self.fraction.clamp(0.0, 1.0)
        }
    }

    fn push_parallel(
        &self,
        model: &ValueModel,
        values: &[Value],
        fraction: f64,
        out: &mut Vec<ArcDescriptor>,
    ) {
        let mut cumulative = model.total_value() as f64;
        for value in values.iter().rev() {
            let sweep = model.sweep_for(cumulative) * fraction;
            out.push(self.arc(model, sweep, value.color, self.stroke_width));
            cumulative -= f64::from(value.value);
        }
    }

    fn push_sequential(
        &self,
        model: &ValueModel,
        values: &[Value],
        cut: SequentialCut,
        out: &mut Vec<ArcDescriptor>,
    ) {
        let filling = values[cut.index];
        out.push(self.arc(
            model,
            model.sweep_for(cut.target()),
            filling.color,
            self.stroke_width,
        ));

        let mut cumulative = cut.prefix;
        for value in values[..cut.index].iter().rev() {
            out.push(self.arc(
                model,
                model.sweep_for(cumulative),
                value.color,
                self.stroke_width,
            ));
            cumulative -= f64::from(value.value);
        }
    }

    fn arc(&self, model: &ValueModel, sweep: f64, color: Color, width: f64) -> ArcDescriptor {
        ArcDescriptor {
            rect: self.rect,
            start_angle: model.start_angle(),
            sweep_angle: sweep,
            color,
            stroke_width: width,
            cap: Cap::Round,
            filled: false,
        }
    }
}

/// Finds the first value whose cumulative sum reaches `total * fraction`.
///
/// At `fraction == 1` the cut is always the last value, so trailing zero-length
/// values still get their (fully overpainted) arc.
fn sequential_cut(values: &[Value], total: u64, fraction: f64) -> Option<SequentialCut> {
    if total == 0 {
        return None;
    }
    let target = total as f64 * fraction;
    let last = values.len().checked_sub(1)?;

    let mut prefix = 0.0;
    for (index, value) in values.iter().enumerate() {
        let cumulative = prefix + f64::from(value.value);
        if index == last || (fraction < 1.0 && cumulative >= target) {
            return Some(SequentialCut {
                index,
                prefix,
                partial: target - prefix,
            });
        }
        prefix = cumulative;
    }
    None
}
