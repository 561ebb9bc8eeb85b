// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation fractions driven by a host frame clock.
//!
//! The [`Animator`] never schedules anything itself. The host calls
//! [`Animator::tick`] once per frame with its monotonic clock reading; the first
//! tick after [`Animator::start`] latches the start time. Starting again while a
//! run is in flight supersedes it: the old run's remaining frames are never
//! produced.

use core::f64::consts::PI;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::trace::{AnimationEndEvent, AnimationFrameEvent, AnimationStartEvent, Tracer};

/// Nominal duration of a chart animation.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

/// Monotone easing curves mapping `[0, 1]` onto `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// `x`.
    Linear,
    /// `1 - (1 - x)^(2 * factor)`; starts fast and slows down.
    Decelerate {
        /// Strength of the deceleration. `1.0` gives `1 - (1 - x)^2`.
        factor: f64,
    },
    /// `cos((x + 1) * pi) / 2 + 0.5`; slow at both ends.
    AccelerateDecelerate,
}

impl Default for Easing {
    fn default() -> Self {
        Self::Decelerate { factor: 1.0 }
    }
}

impl Easing {
    /// Whether the curve's parameters are usable (a `Decelerate` factor must be
    /// finite and positive).
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::Decelerate { factor } => factor.is_finite() && factor > 0.0,
            Self::Linear | Self::AccelerateDecelerate => true,
        }
    }

    /// Evaluates the curve. Inputs outside `[0, 1]` are clamped, and so is the
    /// result.
    pub fn ease(&self, x: f64) -> f64 {
        if x.is_nan() || x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        match *self {
            Self::Linear => x,
            Self::Decelerate { factor } => {
                let rest = 1.0 - x;
                let eased = if factor == 1.0 {
                    1.0 - rest * rest
                } else {
                    1.0 - rest.powf(2.0 * factor)
                };
                // A non-positive or NaN factor degenerates to a step at 1.
                if eased.is_nan() { 0.0 } else { eased.clamp(0.0, 1.0) }
            }
            Self::AccelerateDecelerate => ((x + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

/// One frame produced by [`Animator::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrame {
    /// Generation of the run that produced this frame.
    pub generation: u64,
    /// Time since the run's first frame.
    pub elapsed: Duration,
    /// Eased fraction in `[0, 1]`.
    pub fraction: f64,
    /// Whether this is the run's final frame (`fraction == 1`).
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Armed,
    Running { start: Duration },
}

/// Produces eased fractions over a fixed duration.
#[derive(Clone, Debug)]
pub struct Animator {
    duration: Duration,
    easing: Easing,
    state: State,
    generation: u64,
    frames: u32,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, Easing::default())
    }
}

impl Animator {
    /// Creates an idle animator.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            state: State::Idle,
            generation: 0,
            frames: 0,
        }
    }

    /// The run duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The easing curve.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Generation of the most recent run (0 before the first start).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a run has been started and has not finished or been cancelled.
    pub fn is_running(&self) -> bool {
        self.state != State::Idle
    }

    /// Arms a new run, superseding any run in flight. Returns its generation.
    pub fn start(&mut self) -> u64 {
        self.start_traced(&mut Tracer::none())
    }

    /// Like [`Self::start`], reporting an [`AnimationStartEvent`].
    pub fn start_traced(&mut self, tracer: &mut Tracer<'_>) -> u64 {
        let superseded = self.is_running();
        self.generation = self.generation.wrapping_add(1);
        self.state = State::Armed;
        self.frames = 0;
        tracer.animation_start(&AnimationStartEvent {
            generation: self.generation,
            superseded,
            duration: self.duration,
        });
        self.generation
    }

    /// Stops the current run without delivering a final frame.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    /// Advances the run to the host clock reading `now`.
    ///
    /// Returns `None` when no run is active.
    pub fn tick(&mut self, now: Duration) -> Option<AnimationFrame> {
        self.tick_traced(now, &mut Tracer::none())
    }

    /// Like [`Self::tick`], reporting frame and completion events.
    pub fn tick_traced(&mut self, now: Duration, tracer: &mut Tracer<'_>) -> Option<AnimationFrame> {
        let start = match self.state {
            State::Idle => return None,
            State::Armed => {
                self.state = State::Running { start: now };
                now
            }
            State::Running { start } => start,
        };

        let elapsed = now.saturating_sub(start);
        let linear = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        let finished = linear >= 1.0;
        let fraction = if finished {
            1.0
        } else {
            self.easing.ease(linear)
        };
        self.frames = self.frames.saturating_add(1);

        tracer.animation_frame(&AnimationFrameEvent {
            generation: self.generation,
            elapsed,
            fraction,
        });
        if finished {
            self.state = State::Idle;
            tracer.animation_end(&AnimationEndEvent {
                generation: self.generation,
                frames: self.frames,
            });
        }

        Some(AnimationFrame {
            generation: self.generation,
            elapsed,
            fraction,
            finished,
        })
    }
}
