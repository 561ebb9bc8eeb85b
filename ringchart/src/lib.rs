// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment layout and animation frames for ring (doughnut) charts.
//!
//! A ring chart draws an ordered list of colored values as stroked arcs along a
//! circular track. This crate computes *what* to draw; drawing is left to a
//! downstream renderer:
//! - **Geometry** ([`ring_bounds`]) inscribes the arc rectangle in a padded container.
//! - **Values** ([`ValueModel`]) hold the angle range, value range and the ordered values.
//! - **Layout** ([`RingLayout`]) emits the background arc followed by the foreground
//!   arcs for a given [`AnimationMode`] and animation fraction.
//! - **Animation** ([`Animator`]) turns host frame timestamps into eased fractions.
//! - **Facade** ([`RingChart`]) ties these together behind a fluent configuration API.
//!
//! Arcs are emitted in paint order: later arcs overpaint earlier ones, so the first
//! value ends up visually on top.
//!
//! # Crate features
//!
//! - `std` (disabled by default): enables `std` support in dependencies.
//! - `libm` (enabled by default): float math for `no_std` builds.
//! - `trace` (disabled by default): dispatches diagnostics to a [`TraceSink`].

#![no_std]

extern crate alloc;

mod animation;
mod chart;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod layout;
pub mod trace;
mod value;

pub use animation::{AnimationFrame, Animator, DEFAULT_DURATION, Easing};
pub use chart::{ArcRenderer, ChartConfig, DEFAULT_STROKE_WIDTH, Host, RingChart};
pub use error::ConfigError;
pub use geometry::ring_bounds;
pub use layout::{AnimationMode, ArcDescriptor, RingLayout, SequentialCut};
pub use trace::{NoopSink, TraceSink, Tracer};
pub use value::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_END_ANGLE, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE,
    DEFAULT_START_ANGLE, Value, ValueModel, argb_color,
};
