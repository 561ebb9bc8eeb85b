// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for layout and animation.
//!
//! [`TraceSink`] has one method per event, each defaulting to a no-op, so a sink
//! only implements what it cares about.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. Without the `trace` feature
//! every `Tracer` method compiles to nothing; with it, each call is a single
//! `Option` branch before dispatch.

use core::time::Duration;

use kurbo::{Insets, Size};

use crate::error::ConfigError;
use crate::layout::{AnimationMode, SequentialCut};

/// Emitted after a frame has been laid out.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEvent {
    /// Animation mode used for the frame.
    pub mode: AnimationMode,
    /// Clamped animation fraction.
    pub fraction: f64,
    /// Number of foreground arcs emitted after the background arc.
    pub foreground_arcs: usize,
    /// Sequential cut, for sequential frames with a positive total.
    pub cut: Option<SequentialCut>,
}

/// Emitted when a container is too small to hold any ring.
#[derive(Clone, Copy, Debug)]
pub struct DegenerateGeometryEvent {
    /// Container size.
    pub container: Size,
    /// Container padding.
    pub padding: Insets,
}

/// Emitted when an animation run starts.
#[derive(Clone, Copy, Debug)]
pub struct AnimationStartEvent {
    /// Generation of the new run.
    pub generation: u64,
    /// Whether a still-running animation was replaced.
    pub superseded: bool,
    /// Nominal duration of the run.
    pub duration: Duration,
}

/// Emitted for every animation frame.
#[derive(Clone, Copy, Debug)]
pub struct AnimationFrameEvent {
    /// Generation of the run.
    pub generation: u64,
    /// Time since the run's first frame.
    pub elapsed: Duration,
    /// Eased fraction for the frame.
    pub fraction: f64,
}

/// Emitted once the final frame of a run has been delivered.
#[derive(Clone, Copy, Debug)]
pub struct AnimationEndEvent {
    /// Generation of the run.
    pub generation: u64,
    /// Frames delivered, including the final one.
    pub frames: u32,
}

/// Emitted when a configuration change is rejected.
#[derive(Clone, Copy, Debug)]
pub struct ConfigRejectedEvent {
    /// Why the change was rejected.
    pub error: ConfigError,
}

/// Receives diagnostic events.
pub trait TraceSink {
    /// Called after each frame layout.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }

    /// Called when nothing can be drawn because the container is too small.
    fn on_degenerate_geometry(&mut self, e: &DegenerateGeometryEvent) {
        _ = e;
    }

    /// Called when an animation run starts.
    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        _ = e;
    }

    /// Called for each animation frame.
    fn on_animation_frame(&mut self, e: &AnimationFrameEvent) {
        _ = e;
    }

    /// Called when an animation run completes.
    fn on_animation_end(&mut self, e: &AnimationEndEvent) {
        _ = e;
    }

    /// Called when a configuration change is rejected.
    fn on_config_rejected(&mut self, e: &ConfigRejectedEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident, $e:ident) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    }};
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`LayoutEvent`].
    #[inline]
    pub fn layout(&mut self, e: &LayoutEvent) {
        dispatch!(self, on_layout, e);
    }

    /// Emits a [`DegenerateGeometryEvent`].
    #[inline]
    pub fn degenerate_geometry(&mut self, e: &DegenerateGeometryEvent) {
        dispatch!(self, on_degenerate_geometry, e);
    }

    /// Emits an [`AnimationStartEvent`].
    #[inline]
    pub fn animation_start(&mut self, e: &AnimationStartEvent) {
        dispatch!(self, on_animation_start, e);
    }

    /// Emits an [`AnimationFrameEvent`].
    #[inline]
    pub fn animation_frame(&mut self, e: &AnimationFrameEvent) {
        dispatch!(self, on_animation_frame, e);
    }

    /// Emits an [`AnimationEndEvent`].
    #[inline]
    pub fn animation_end(&mut self, e: &AnimationEndEvent) {
        dispatch!(self, on_animation_end, e);
    }

    /// Emits a [`ConfigRejectedEvent`].
    #[inline]
    pub fn config_rejected(&mut self, e: &ConfigRejectedEvent) {
        dispatch!(self, on_config_rejected, e);
    }
}
